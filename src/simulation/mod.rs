pub mod atom;
pub mod solver;
