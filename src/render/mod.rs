pub mod bohr;
pub mod cloud;
pub mod color;
