use crate::atom::model::{AtomConfigError, AtomDescriptor, OrbitalDescriptor};
use crate::config::SimulationConfig;
use crate::physics::nucleus::{Nucleus, NucleusBuilder};
use crate::render::cloud::CloudVertex;
use crate::render::color::{Rgb, Theme, heatmap_color};
use crate::simulation::solver::{CloudSample, MonteCarloSampler};
use glam::Vec3;
use log::{debug, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Point cloud for one occupied orbital, normalized and colored.
#[derive(Clone, Debug, Serialize)]
pub struct OrbitalCloud {
    pub descriptor: OrbitalDescriptor,
    /// Scene-space positions (Bohr radii times the display scale).
    pub positions: Vec<Vec3>,
    /// Density divided by the cloud's maximum, in [0, 1].
    pub alphas: Vec<f32>,
    pub colors: Vec<Rgb>,
    pub fallback_count: usize,
}

impl OrbitalCloud {
    pub fn from_samples(
        descriptor: OrbitalDescriptor,
        samples: &[CloudSample],
        display_scale: f32,
        theme: Theme,
    ) -> Self {
        let max_density = samples.iter().map(|s| s.density).fold(0.0_f64, f64::max);

        let positions = samples
            .iter()
            .map(|s| s.position.as_vec3() * display_scale)
            .collect();
        let alphas: Vec<f32> = samples
            .iter()
            .map(|s| {
                if max_density > 0.0 {
                    (s.density / max_density) as f32
                } else {
                    0.0
                }
            })
            .collect();
        let colors = alphas.iter().map(|&a| heatmap_color(a, theme)).collect();

        Self {
            descriptor,
            positions,
            alphas,
            colors,
            fallback_count: samples.iter().filter(|s| s.used_fallback).count(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Recomputes colors from the stored normalized densities.
    pub fn recolor(&mut self, theme: Theme) {
        for (color, &alpha) in self.colors.iter_mut().zip(&self.alphas) {
            *color = heatmap_color(alpha, theme);
        }
    }

    pub fn vertices(&self) -> Vec<CloudVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .zip(&self.alphas)
            .map(|((&position, &color), &alpha)| CloudVertex::new(position, color, alpha))
            .collect()
    }

    /// Mean distance from the nucleus in Bohr radii.
    pub fn mean_radius(&self, display_scale: f32) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let total: f32 = self.positions.iter().map(|p| p.length()).sum();
        total / (self.len() as f32 * display_scale)
    }
}

/// Everything drawn for one loaded atom: nucleus cluster plus one cloud per
/// occupied orbital.
#[derive(Clone, Debug)]
pub struct AtomScene {
    atom: AtomDescriptor,
    nucleus: Nucleus,
    clouds: Vec<OrbitalCloud>,
    theme: Theme,
}

impl AtomScene {
    pub fn build(
        atom: AtomDescriptor,
        config: &SimulationConfig,
        sampler: &mut MonteCarloSampler,
        theme: Theme,
    ) -> Result<Self, AtomConfigError> {
        let mut nucleus_rng =
            ChaCha8Rng::seed_from_u64(config.seed ^ u64::from(atom.atomic_number));
        let nucleus = NucleusBuilder::new(atom.nuclide())
            .with_proton_color(atom.nucleus_rgb()?)
            .build(&mut nucleus_rng);

        let clouds = atom
            .occupied_orbitals()
            .map(|descriptor| {
                let orbital = descriptor.orbital();
                if !orbital.has_tabulated_harmonic() {
                    warn!(
                        "{} ({}) has no tabulated harmonic for l={}, m={}; rendering it as spherical",
                        descriptor.name, atom.symbol, orbital.l, orbital.m
                    );
                }
                let request = config.sample_config(descriptor.current_electrons);
                let samples = sampler.sample_orbital(atom.atomic_number, &orbital, request);
                OrbitalCloud::from_samples(
                    descriptor.clone(),
                    &samples,
                    config.display_scale,
                    theme,
                )
            })
            .collect::<Vec<_>>();

        debug!(
            "built {} with {} clouds and {} nucleons",
            atom.name,
            clouds.len(),
            nucleus.proton_count() + nucleus.neutron_count()
        );

        Ok(Self {
            atom,
            nucleus,
            clouds,
            theme,
        })
    }

    pub fn atom(&self) -> &AtomDescriptor {
        &self.atom
    }

    pub fn nucleus(&self) -> &Nucleus {
        &self.nucleus
    }

    pub fn clouds(&self) -> &[OrbitalCloud] {
        &self.clouds
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Applies one theme to every cloud.
    pub fn recolor(&mut self, theme: Theme) {
        self.theme = theme;
        for cloud in &mut self.clouds {
            cloud.recolor(theme);
        }
    }

    pub fn particle_count(&self) -> usize {
        self.clouds.iter().map(OrbitalCloud::len).sum()
    }

    /// All cloud points packed into one vertex list.
    pub fn vertices(&self) -> Vec<CloudVertex> {
        self.clouds.iter().flat_map(OrbitalCloud::vertices).collect()
    }
}
