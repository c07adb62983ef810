use crate::physics::elements::Nuclide;
use glam::Vec3;
use rand::Rng;
use rand_distr::{Distribution, UnitBall};
use serde::Serialize;

/// Rendered sphere radius of a single nucleon.
pub const NUCLEON_SCALE: f32 = 2.0;
const CLUSTER_PACKING: f32 = 1.3;
const GLOW_SPAN: f32 = 10.0;
pub const NEUTRON_COLOR: [u8; 3] = [0xdd, 0xdd, 0xdd];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NucleonKind {
    Proton,
    Neutron,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nucleon {
    pub kind: NucleonKind,
    pub position: Vec3,
}

/// Per-instance data for drawing one nucleon sphere.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NucleonInstance {
    pub position: Vec3,
    pub scale: f32,
    pub color: [f32; 3],
}

/// Nucleon cluster, protons first.
#[derive(Clone, Debug)]
pub struct Nucleus {
    pub nucleons: Vec<Nucleon>,
    pub proton_color: [u8; 3],
    pub cluster_radius: f32,
}

impl Nucleus {
    pub fn proton_count(&self) -> usize {
        self.count(NucleonKind::Proton)
    }

    pub fn neutron_count(&self) -> usize {
        self.count(NucleonKind::Neutron)
    }

    fn count(&self, kind: NucleonKind) -> usize {
        self.nucleons.iter().filter(|n| n.kind == kind).count()
    }

    /// Side length of the additive glow sprite behind the cluster.
    pub fn glow_scale(&self) -> f32 {
        self.cluster_radius * GLOW_SPAN
    }

    pub fn instances(&self) -> Vec<NucleonInstance> {
        let proton_color = normalized_rgb(self.proton_color);
        let neutron_color = normalized_rgb(NEUTRON_COLOR);

        self.nucleons
            .iter()
            .map(|nucleon| NucleonInstance {
                position: nucleon.position,
                scale: NUCLEON_SCALE,
                color: match nucleon.kind {
                    NucleonKind::Proton => proton_color,
                    NucleonKind::Neutron => neutron_color,
                },
            })
            .collect()
    }
}

pub struct NucleusBuilder {
    proton_count: usize,
    neutron_count: usize,
    proton_color: [u8; 3],
}

impl NucleusBuilder {
    pub fn new(nuclide: Nuclide) -> Self {
        Self {
            proton_count: nuclide.protons as usize,
            neutron_count: nuclide.neutrons as usize,
            proton_color: [0xff, 0xff, 0xff],
        }
    }

    pub fn with_proton_color(mut self, color: [u8; 3]) -> Self {
        self.proton_color = color;
        self
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Nucleus {
        let total = self.proton_count + self.neutron_count;
        let cluster_radius = cluster_radius(total);

        let kinds = std::iter::repeat_n(NucleonKind::Proton, self.proton_count)
            .chain(std::iter::repeat_n(NucleonKind::Neutron, self.neutron_count));
        let nucleons = kinds
            .map(|kind| Nucleon {
                kind,
                position: random_point_in_ball(rng, cluster_radius),
            })
            .collect();

        Nucleus {
            nucleons,
            proton_color: self.proton_color,
            cluster_radius,
        }
    }
}

/// Visual cluster radius, growing with the cube root of the nucleon count.
pub fn cluster_radius(nucleons: usize) -> f32 {
    (nucleons as f32).cbrt() * NUCLEON_SCALE * CLUSTER_PACKING
}

fn random_point_in_ball<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let [x, y, z]: [f32; 3] = UnitBall.sample(rng);
    Vec3::new(x, y, z) * radius
}

fn normalized_rgb(color: [u8; 3]) -> [f32; 3] {
    color.map(|c| f32::from(c) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn carbon_nucleus_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let nucleus = NucleusBuilder::new(Nuclide::for_element(6)).build(&mut rng);
        assert_eq!(nucleus.proton_count(), 6);
        assert_eq!(nucleus.neutron_count(), 6);
        assert_eq!(nucleus.nucleons.len(), 12);
        assert!(nucleus.nucleons[..6].iter().all(|n| n.kind == NucleonKind::Proton));
        assert!(nucleus.nucleons[6..].iter().all(|n| n.kind == NucleonKind::Neutron));
    }

    #[test]
    fn nucleons_stay_inside_cluster() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let nucleus = NucleusBuilder::new(Nuclide::for_element(26)).build(&mut rng);
        let limit = nucleus.cluster_radius + 1e-4;
        assert!(nucleus.instances().iter().all(|i| i.position.length() <= limit));
        assert!((nucleus.cluster_radius - 60.0_f32.cbrt() * 2.6).abs() < 1e-5);
        assert!((nucleus.glow_scale() - nucleus.cluster_radius * 10.0).abs() < 1e-5);
    }

    #[test]
    fn instances_are_colored_protons_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let nucleus = NucleusBuilder::new(Nuclide::for_element(2))
            .with_proton_color([255, 0, 0])
            .build(&mut rng);
        let instances = nucleus.instances();
        assert_eq!(instances.len(), 4);
        assert_eq!(instances[0].color, [1.0, 0.0, 0.0]);
        assert_eq!(instances[1].color, [1.0, 0.0, 0.0]);
        assert_eq!(instances[3].color, normalized_rgb(NEUTRON_COLOR));
        assert_eq!(bytemuck::cast_slice::<_, u8>(&instances).len(), 4 * 28);
    }
}
