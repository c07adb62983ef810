use crate::physics::special::{
    factorial, generalized_laguerre, is_tabulated, real_spherical_harmonic,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Quantum numbers that define a hydrogen-like orbital.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orbital {
    pub n: u32,
    pub l: u32,
    pub m: i32,
}

impl Orbital {
    pub fn new(n: u32, l: u32, m: i32) -> Self {
        debug_assert!(n > 0, "Principal quantum number n must be >= 1");
        debug_assert!(l < n, "Azimuthal quantum number l must satisfy l < n");
        debug_assert!(
            m.unsigned_abs() <= l,
            "Magnetic quantum number |m| must be <= l"
        );
        Self { n, l, m }
    }

    pub fn try_new(n: u32, l: u32, m: i32) -> Option<Self> {
        if n == 0 || l >= n || m.unsigned_abs() > l {
            return None;
        }
        Some(Self { n, l, m })
    }

    pub fn ground_state() -> Self {
        Self { n: 1, l: 0, m: 0 }
    }

    /// Spectroscopic subshell label, e.g. `3d`.
    pub fn subshell_label(&self) -> String {
        let letter = match self.l {
            0 => 's',
            1 => 'p',
            2 => 'd',
            3 => 'f',
            4 => 'g',
            _ => 'h',
        };
        format!("{}{}", self.n, letter)
    }

    pub fn has_tabulated_harmonic(&self) -> bool {
        is_tabulated(self.l, self.m)
    }

    /// |psi|^2 at a point given in spherical coordinates.
    pub fn density_at(&self, r: f64, theta: f64, phi: f64, z: f64) -> f64 {
        probability_density(self.n, self.l, self.m, r, theta, phi, z)
    }

    /// |psi|^2 at a Cartesian position (Bohr radii).
    pub fn probability_density(&self, position: DVec3, z: f64) -> f64 {
        let r = position.length();
        if r == 0.0 {
            return self.density_at(0.0, 0.0, 0.0, z);
        }
        let theta = (position.z / r).clamp(-1.0, 1.0).acos();
        let phi = position.y.atan2(position.x);
        self.density_at(r, theta, phi, z)
    }
}

/// Empirical location of the radial probability peak, n^2 / Z.
pub fn peak_radius(n: u32, z_eff: f64) -> f64 {
    f64::from(n * n) / z_eff
}

/// Hydrogen-like radial wavefunction R_nl(r) for nuclear charge `z`.
///
/// Evaluated as N * rho^l * exp(-rho/2) * L^{2l+1}_{n-l-1}(rho), one factor at
/// a time, so the large power and the small exponential never meet in a
/// single intermediate.
pub fn radial_wave_function(n: u32, l: u32, r: f64, z: f64) -> f64 {
    let n_f = f64::from(n);
    let rho = 2.0 * z * r / n_f;

    let norm = ((2.0 * z / n_f).powi(3) * factorial(n - l - 1)
        / (2.0 * n_f * factorial(n + l)))
    .sqrt();

    norm * rho.powi(l as i32)
        * (-rho / 2.0).exp()
        * generalized_laguerre(n - l - 1, f64::from(2 * l + 1), rho)
}

/// (R(r) * Y(theta, phi))^2.
pub fn probability_density(
    n: u32,
    l: u32,
    m: i32,
    r: f64,
    theta: f64,
    phi: f64,
    z: f64,
) -> f64 {
    let psi = radial_wave_function(n, l, r, z) * real_spherical_harmonic(l, m, theta, phi);
    psi * psi
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn quantum_number_validation() {
        assert!(Orbital::try_new(1, 0, 0).is_some());
        assert!(Orbital::try_new(2, 1, -1).is_some());
        assert!(Orbital::try_new(3, 2, 2).is_some());

        assert!(Orbital::try_new(0, 0, 0).is_none());
        assert!(Orbital::try_new(2, 2, 0).is_none());
        assert!(Orbital::try_new(2, 1, 2).is_none());
    }

    #[test]
    fn radial_values_at_origin() {
        // R_10(0) = 2, R_20(0) = 1/sqrt(2), p and d orbitals vanish.
        assert!((radial_wave_function(1, 0, 0.0, 1.0) - 2.0).abs() < 1e-12);
        assert!((radial_wave_function(2, 0, 0.0, 1.0) - 0.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(radial_wave_function(2, 1, 0.0, 1.0), 0.0);
        assert_eq!(radial_wave_function(3, 2, 0.0, 1.0), 0.0);
    }

    #[test]
    fn radial_matches_closed_forms() {
        let r: f64 = 1.3;
        let r10 = 2.0 * (-r).exp();
        let r21 = r * (-r / 2.0).exp() / 24.0_f64.sqrt();
        assert!((radial_wave_function(1, 0, r, 1.0) - r10).abs() < 1e-12);
        assert!((radial_wave_function(2, 1, r, 1.0) - r21).abs() < 1e-12);
    }

    #[test]
    fn radial_scales_with_charge() {
        // R_10 for charge Z is 2 Z^{3/2} exp(-Z r).
        let z = 3.0_f64;
        let r = 0.4;
        let expected = 2.0 * z.powf(1.5) * (-z * r).exp();
        assert!((radial_wave_function(1, 0, r, z) - expected).abs() < 1e-10);
    }

    #[test]
    fn radial_is_finite_across_shells() {
        for n in 1..=7u32 {
            let r_limit = 50.0 * f64::from(n * n);
            for l in 0..n {
                for step in 0..=500 {
                    let r = r_limit * step as f64 / 500.0;
                    let value = radial_wave_function(n, l, r, 1.0);
                    assert!(value.is_finite(), "R_{n}{l}({r}) = {value}");
                }
            }
        }
    }

    #[test]
    fn radial_functions_are_normalized() {
        for n in 1..=4u32 {
            for l in 0..n {
                let r_max = 60.0 * f64::from(n * n);
                let steps = 40_000;
                let dr = r_max / steps as f64;
                let integral: f64 = (0..steps)
                    .map(|i| {
                        let r = (i as f64 + 0.5) * dr;
                        let radial = radial_wave_function(n, l, r, 1.0);
                        r * r * radial * radial * dr
                    })
                    .sum();
                assert!((integral - 1.0).abs() < 1e-3, "n={n} l={l}: {integral}");
            }
        }
    }

    #[test]
    fn density_is_never_negative() {
        for n in 1..=4u32 {
            for l in 0..n {
                for m in -(l as i32)..=(l as i32) {
                    for i in 0..20 {
                        let r = i as f64 * 0.7;
                        let theta = i as f64 * PI / 19.0;
                        let phi = i as f64 * 0.9;
                        assert!(probability_density(n, l, m, r, theta, phi, 1.0) >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn cartesian_density_matches_spherical() {
        let orbital = Orbital::new(2, 1, 1);
        let (r, theta, phi): (f64, f64, f64) = (2.5, 1.1, 0.6);
        let position = DVec3::new(
            r * theta.sin() * phi.cos(),
            r * theta.sin() * phi.sin(),
            r * theta.cos(),
        );
        let expected = orbital.density_at(r, theta, phi, 1.0);
        assert!((orbital.probability_density(position, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn subshell_labels() {
        assert_eq!(Orbital::ground_state().subshell_label(), "1s");
        assert_eq!(Orbital::new(3, 2, -1).subshell_label(), "3d");
        assert_eq!(Orbital::new(4, 3, 0).subshell_label(), "4f");
    }
}
