use crate::constants::{ANGLE_ATTEMPTS, DISPLAY_SCALE, PARTICLES_PER_ELECTRON, RADIUS_ATTEMPTS};
use crate::render::color::Theme;
use crate::simulation::solver::{SampleConfig, SamplingLimits};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tuning for cloud generation. Every field may be omitted from the JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Samples drawn per occupied electron of an orbital.
    pub particles_per_electron: usize,
    /// Bohr radii to scene units.
    pub display_scale: f32,
    pub radius_attempts: usize,
    pub angle_attempts: usize,
    pub seed: u64,
    pub parallel: bool,
    pub default_theme: Theme,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particles_per_electron: PARTICLES_PER_ELECTRON,
            display_scale: DISPLAY_SCALE,
            radius_attempts: RADIUS_ATTEMPTS,
            angle_attempts: ANGLE_ATTEMPTS,
            seed: 42,
            parallel: true,
            default_theme: Theme::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn limits(&self) -> SamplingLimits {
        SamplingLimits {
            radius_attempts: self.radius_attempts,
            angle_attempts: self.angle_attempts,
        }
    }

    /// Sampling request for an orbital holding `electrons` electrons.
    pub fn sample_config(&self, electrons: u32) -> SampleConfig {
        SampleConfig::new(self.particles_per_electron * electrons as usize)
            .with_limits(self.limits())
            .parallel(self.parallel)
    }
}
