pub mod app;
pub mod atom;
pub mod config;
pub mod constants;
pub mod physics;
pub mod render;
pub mod simulation;
pub mod ui;

pub use app::{App, AppError, AppResult};
pub use config::SimulationConfig;
pub use render::color::{Theme, ThemeSelection, heatmap_color};
pub use simulation::solver::sample_particle_position;
