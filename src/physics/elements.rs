/// Proton and neutron counts for the nucleus glyph of element `Z`.
///
/// The neutron count is a decorative piecewise fit, not an isotope table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nuclide {
    pub protons: u32,
    pub neutrons: u32,
}

impl Nuclide {
    pub fn for_element(atomic_number: u32) -> Self {
        Self {
            protons: atomic_number,
            neutrons: neutron_count(atomic_number),
        }
    }

    pub fn mass_number(&self) -> u32 {
        self.protons + self.neutrons
    }
}

/// Approximate mass number A: 2Z up to calcium, then 2.3Z and 2.55Z.
pub fn mass_number(atomic_number: u32) -> u32 {
    let z = f64::from(atomic_number);
    match atomic_number {
        0..=20 => atomic_number * 2,
        21..=50 => (z * 2.3).round() as u32,
        _ => (z * 2.55).round() as u32,
    }
}

pub fn neutron_count(atomic_number: u32) -> u32 {
    mass_number(atomic_number) - atomic_number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_elements_double_up() {
        assert_eq!(neutron_count(1), 1);
        assert_eq!(neutron_count(6), 6);
        assert_eq!(neutron_count(20), 20);
        assert_eq!(mass_number(8), 16);
    }

    #[test]
    fn heavier_elements_follow_piecewise_fit() {
        assert_eq!(mass_number(26), 60);
        assert_eq!(neutron_count(26), 34);
        assert_eq!(mass_number(92), 235);
        assert_eq!(neutron_count(92), (92.0_f64 * 2.55).round() as u32 - 92);
        assert_eq!(neutron_count(92), 143);
    }

    #[test]
    fn nuclide_counts() {
        let iron = Nuclide::for_element(26);
        assert_eq!(iron.protons, 26);
        assert_eq!(iron.neutrons, 34);
        assert_eq!(iron.mass_number(), 60);
    }
}
