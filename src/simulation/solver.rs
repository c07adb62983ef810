use crate::constants::{
    ANGLE_ATTEMPTS, ANGLE_ENVELOPE, RADIUS_ATTEMPTS, RADIUS_ENVELOPE_SPAN, Z_VISUAL,
};
use crate::physics::electron::{Orbital, peak_radius, radial_wave_function};
use crate::physics::special::real_spherical_harmonic;
use glam::DVec3;
use log::{debug, trace, warn};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::f64::consts::{PI, TAU};

/// Samples drawn from one ChaCha stream. Fixed so results do not depend on
/// how many worker threads pick up the chunks.
const CHUNK_SIZE: usize = 4096;

/// A sampled value and whether the attempt budget ran out before acceptance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Draw<T> {
    pub value: T,
    pub used_fallback: bool,
}

impl<T> Draw<T> {
    fn accepted(value: T) -> Self {
        Self {
            value,
            used_fallback: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            used_fallback: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Angles {
    pub theta: f64,
    pub phi: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct CloudSample {
    /// Cartesian position in Bohr radii.
    pub position: DVec3,
    /// Unnormalized |psi|^2 at `position`.
    pub density: f64,
    pub used_fallback: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingLimits {
    pub radius_attempts: usize,
    pub angle_attempts: usize,
}

impl Default for SamplingLimits {
    fn default() -> Self {
        Self {
            radius_attempts: RADIUS_ATTEMPTS,
            angle_attempts: ANGLE_ATTEMPTS,
        }
    }
}

/// Draws r with density proportional to r^2 R_nl(r)^2.
///
/// The envelope is the value at the empirical peak n^2/Z, which is not the
/// true maximum for every (n, l). On exhaustion the peak radius is returned.
pub fn sample_radius<R: Rng + ?Sized>(
    rng: &mut R,
    n: u32,
    l: u32,
    z_eff: f64,
    max_attempts: usize,
) -> Draw<f64> {
    let r_peak = peak_radius(n, z_eff);
    let r_max = r_peak * RADIUS_ENVELOPE_SPAN;
    let peak = radial_wave_function(n, l, r_peak, z_eff);
    let envelope = r_peak * r_peak * peak * peak;

    for _ in 0..max_attempts {
        let r = rng.r#gen::<f64>() * r_max;
        let radial = radial_wave_function(n, l, r, z_eff);
        let p = r * r * radial * radial;
        if rng.r#gen::<f64>() < p / envelope {
            return Draw::accepted(r);
        }
    }

    Draw::fallback(r_peak)
}

/// Draws (theta, phi) with density proportional to Y_lm^2 sin(theta).
///
/// Uses a constant envelope of 0.8. On exhaustion the direction is uniform
/// over the sphere instead of following Y^2.
pub fn sample_angles<R: Rng + ?Sized>(
    rng: &mut R,
    l: u32,
    m: i32,
    max_attempts: usize,
) -> Draw<Angles> {
    for _ in 0..max_attempts {
        let theta = rng.r#gen::<f64>() * PI;
        let phi = rng.r#gen::<f64>() * TAU;
        let y = real_spherical_harmonic(l, m, theta, phi);
        let p = y * y * theta.sin();
        if rng.r#gen::<f64>() < p / ANGLE_ENVELOPE {
            return Draw::accepted(Angles { theta, phi });
        }
    }

    let u = rng.r#gen::<f64>();
    let v = rng.r#gen::<f64>();
    Draw::fallback(Angles {
        theta: (2.0 * u - 1.0).acos(),
        phi: TAU * v,
    })
}

/// One stochastic point of the orbital cloud.
///
/// The shape is always evaluated at [`Z_VISUAL`] and the returned density is
/// taken at that same charge. `atomic_number` is only logged.
pub fn sample_particle_position<R: Rng + ?Sized>(
    rng: &mut R,
    orbital: &Orbital,
    atomic_number: u32,
    limits: SamplingLimits,
) -> CloudSample {
    let radius = sample_radius(rng, orbital.n, orbital.l, Z_VISUAL, limits.radius_attempts);
    let angles = sample_angles(rng, orbital.l, orbital.m, limits.angle_attempts);

    let r = radius.value;
    let Angles { theta, phi } = angles.value;
    trace!("Z = {atomic_number}: r = {r:.3}, theta = {theta:.3}, phi = {phi:.3}");
    let (sin_t, cos_t) = theta.sin_cos();

    CloudSample {
        position: DVec3::new(r * sin_t * phi.cos(), r * sin_t * phi.sin(), r * cos_t),
        density: orbital.density_at(r, theta, phi, Z_VISUAL),
        used_fallback: radius.used_fallback || angles.used_fallback,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SampleConfig {
    pub samples: usize,
    pub limits: SamplingLimits,
    pub parallel: bool,
}

impl SampleConfig {
    pub const fn new(samples: usize) -> Self {
        Self {
            samples,
            limits: SamplingLimits {
                radius_attempts: RADIUS_ATTEMPTS,
                angle_attempts: ANGLE_ATTEMPTS,
            },
            parallel: false,
        }
    }

    pub const fn with_limits(mut self, limits: SamplingLimits) -> Self {
        self.limits = limits;
        self
    }

    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

pub struct MonteCarloSampler {
    rng: ChaCha8Rng,
}

impl Default for MonteCarloSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl MonteCarloSampler {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws `config.samples` points for one orbital of element `atomic_number`.
    ///
    /// Serial and parallel runs from the same sampler state return the same
    /// points in the same order.
    pub fn sample_orbital(
        &mut self,
        atomic_number: u32,
        orbital: &Orbital,
        config: SampleConfig,
    ) -> Vec<CloudSample> {
        if config.samples == 0 {
            return Vec::new();
        }

        let base_seed: u64 = self.rng.r#gen();
        let chunks: Vec<(u64, usize)> = (0..config.samples)
            .step_by(CHUNK_SIZE)
            .enumerate()
            .map(|(index, start)| (index as u64, CHUNK_SIZE.min(config.samples - start)))
            .collect();

        let draw_chunk = |&(stream, len): &(u64, usize)| {
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
            rng.set_stream(stream);
            (0..len)
                .map(|_| {
                    sample_particle_position(&mut rng, orbital, atomic_number, config.limits)
                })
                .collect::<Vec<_>>()
        };

        let samples: Vec<CloudSample> = if config.parallel {
            chunks.par_iter().map(draw_chunk).collect::<Vec<_>>().concat()
        } else {
            chunks.iter().flat_map(draw_chunk).collect()
        };

        let fallbacks = samples.iter().filter(|s| s.used_fallback).count();
        debug!(
            "sampled {} points for {} (Z = {}), {} fallbacks",
            samples.len(),
            orbital.subshell_label(),
            atomic_number,
            fallbacks
        );
        if fallbacks * 100 > samples.len() {
            warn!(
                "Monte Carlo sampling fell back on {} / {} points for {}-orbital (n={}, l={}, m={})",
                fallbacks,
                samples.len(),
                orbital.subshell_label(),
                orbital.n,
                orbital.l,
                orbital.m
            );
        }

        samples
    }
}
