// Simulation units: lengths in Bohr radii, charges in elementary charges.

// Orbital shapes are always rendered as pure hydrogenic clouds.
pub const Z_VISUAL: f64 = 1.0;

pub const RADIUS_ATTEMPTS: usize = 2000;
pub const ANGLE_ATTEMPTS: usize = 100;
pub const RADIUS_ENVELOPE_SPAN: f64 = 7.0; // r_max / r_peak
pub const ANGLE_ENVELOPE: f64 = 0.8;

// Visual density tuning, not physical constants.
pub const PARTICLES_PER_ELECTRON: usize = 20_000;
pub const DISPLAY_SCALE: f32 = 30.0;
