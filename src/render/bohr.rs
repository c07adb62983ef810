//! Flat Bohr-model diagram: nucleus dot, one ring per occupied shell, and
//! electrons spaced evenly around each ring starting at 12 o'clock.

use crate::atom::model::AtomDescriptor;
use glam::Vec2;
use serde::Serialize;
use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, Serialize)]
pub struct BohrStyle {
    pub nucleus_radius: f32,
    pub nucleus_glow: f32,
    pub electron_radius: f32,
    pub electron_color: &'static str,
    pub ring_color: [f32; 4],
    pub ring_width: f32,
    /// Gap kept between the outermost ring and the canvas edge.
    pub margin: f32,
    /// Offset added to every ring radius so shell 1 clears the nucleus.
    pub ring_offset: f32,
}

impl Default for BohrStyle {
    fn default() -> Self {
        Self {
            nucleus_radius: 6.0,
            nucleus_glow: 10.0,
            electron_radius: 3.0,
            electron_color: "#58a6ff",
            ring_color: [1.0, 1.0, 1.0, 0.15],
            ring_width: 1.0,
            margin: 10.0,
            ring_offset: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BohrShell {
    pub n: u32,
    pub radius: f32,
    pub electrons: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BohrLayout {
    pub center: Vec2,
    pub nucleus_color: String,
    pub shells: Vec<BohrShell>,
    pub style: BohrStyle,
}

/// Electrons per principal quantum number, summed over every orbital.
pub fn shell_occupancy(atom: &AtomDescriptor) -> BTreeMap<u32, u32> {
    let mut shells = BTreeMap::new();
    for orbital in &atom.orbitals {
        *shells.entry(orbital.n).or_insert(0) += orbital.current_electrons;
    }
    shells
}

pub fn layout_bohr_model(
    atom: &AtomDescriptor,
    width: f32,
    height: f32,
    style: BohrStyle,
) -> BohrLayout {
    let center = Vec2::new(width / 2.0, height / 2.0);
    let occupancy = shell_occupancy(atom);
    let max_n = occupancy.keys().copied().max().unwrap_or(0);

    let max_radius = width.min(height) / 2.0 - style.margin;
    let step = max_radius / (max_n as f32 + 0.5);

    let shells = occupancy
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(n, count)| {
            let radius = step * n as f32 + style.ring_offset;
            let angle_step = TAU / count as f32;
            let electrons = (0..count)
                .map(|i| {
                    let angle = -FRAC_PI_2 + angle_step * i as f32;
                    center + Vec2::new(angle.cos(), angle.sin()) * radius
                })
                .collect();
            BohrShell { n, radius, electrons }
        })
        .collect();

    BohrLayout {
        center,
        nucleus_color: atom.nucleus.color.clone(),
        shells,
        style,
    }
}
