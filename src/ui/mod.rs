//! Side-panel content for the loaded atom: headline facts, the electron
//! configuration, subshell occupancy bars and the orbital box diagram.

use crate::atom::model::{AtomDescriptor, OrbitalDescriptor};
use crate::physics::elements::{mass_number, neutron_count};
use serde::Serialize;
use std::fmt;

/// Subshell a named orbital belongs to: the first `<digits><s|p|d|f>` run in
/// the name, so `2px` -> `2p` and `x3dxy` -> `3d`. Names without one are their
/// own group.
pub fn subshell_key(name: &str) -> String {
    let bytes = name.as_bytes();
    for start in 0..bytes.len() {
        let digits = bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            continue;
        }
        let end = start + digits;
        if matches!(bytes.get(end), Some(b's' | b'p' | b'd' | b'f')) {
            return name[start..=end].to_owned();
        }
    }
    name.to_owned()
}

/// Sort key: principal number first, then s < p < d < f.
fn subshell_order(key: &str) -> (u32, u8) {
    let digits: String = key.chars().take_while(char::is_ascii_digit).collect();
    let n = digits.parse().unwrap_or(0);
    let rank = match key[digits.len()..].chars().next() {
        Some('p') => 1,
        Some('d') => 2,
        Some('f') => 3,
        _ => 0,
    };
    (n, rank)
}

/// Bar color for a subshell, by its letter.
pub fn subshell_color(key: &str) -> &'static str {
    if key.contains('s') {
        "#ff9999"
    } else if key.contains('p') {
        "#99ff99"
    } else if key.contains('d') {
        "#9999ff"
    } else if key.contains('f') {
        "#ffff99"
    } else {
        "#ffffff"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubshellGroup {
    pub name: String,
    pub orbitals: Vec<OrbitalDescriptor>,
    pub electrons: u32,
    pub capacity: u32,
}

pub fn group_subshells(atom: &AtomDescriptor) -> Vec<SubshellGroup> {
    let mut groups: Vec<SubshellGroup> = Vec::new();
    for orbital in &atom.orbitals {
        let key = subshell_key(&orbital.name);
        let index = match groups.iter().position(|g| g.name == key) {
            Some(index) => index,
            None => {
                groups.push(SubshellGroup {
                    name: key,
                    orbitals: Vec::new(),
                    electrons: 0,
                    capacity: 0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.orbitals.push(orbital.clone());
        group.electrons += orbital.current_electrons;
        group.capacity += orbital.max_electrons;
    }
    groups.sort_by_key(|g| subshell_order(&g.name));
    groups
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectronConfiguration {
    pub subshells: Vec<(String, u32)>,
}

impl fmt::Display for ElectronConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, count)) in self.subshells.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}{}", superscript(*count))?;
        }
        Ok(())
    }
}

fn superscript(value: u32) -> String {
    value
        .to_string()
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            _ => '⁹',
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyCard {
    pub subshell: String,
    pub electrons: u32,
    pub capacity: u32,
    pub percent: f32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoxFill {
    Empty,
    Up,
    Paired,
}

impl BoxFill {
    pub fn arrows(self) -> &'static str {
        match self {
            BoxFill::Empty => "",
            BoxFill::Up => "↑",
            BoxFill::Paired => "↑↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrbitalRow {
    pub subshell: String,
    pub boxes: Vec<BoxFill>,
}

/// Boxes for one orbital entry. Entries with capacity above two stand for a
/// whole subshell and are filled pairwise, left to right.
pub fn orbital_boxes(orbital: &OrbitalDescriptor) -> Vec<BoxFill> {
    let max = orbital.max_electrons;
    let count = orbital.current_electrons;

    if max <= 2 {
        let fill = match count {
            2 => BoxFill::Paired,
            1 => BoxFill::Up,
            _ => BoxFill::Empty,
        };
        return vec![fill];
    }

    let pairs = count / 2;
    (0..max / 2)
        .map(|i| {
            if i < pairs {
                BoxFill::Paired
            } else if i == pairs && count % 2 == 1 {
                BoxFill::Up
            } else {
                BoxFill::Empty
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoPanel {
    pub name: String,
    pub symbol: String,
    pub symbol_color: String,
    pub atomic_number: u32,
    pub mass_number: u32,
    pub neutrons: u32,
    pub configuration: ElectronConfiguration,
    pub cards: Vec<OccupancyCard>,
    pub rows: Vec<OrbitalRow>,
}

impl InfoPanel {
    pub fn new(atom: &AtomDescriptor) -> Self {
        let groups = group_subshells(atom);

        let configuration = ElectronConfiguration {
            subshells: groups.iter().map(|g| (g.name.clone(), g.electrons)).collect(),
        };

        let cards = groups
            .iter()
            .filter(|g| g.electrons > 0)
            .map(|g| OccupancyCard {
                subshell: g.name.clone(),
                electrons: g.electrons,
                capacity: g.capacity,
                percent: if g.capacity > 0 {
                    g.electrons as f32 / g.capacity as f32 * 100.0
                } else {
                    0.0
                },
                color: subshell_color(&g.name),
            })
            .collect();

        let rows = groups
            .iter()
            .map(|g| OrbitalRow {
                subshell: g.name.clone(),
                boxes: g.orbitals.iter().flat_map(orbital_boxes).collect(),
            })
            .collect();

        Self {
            name: atom.name.clone(),
            symbol: atom.symbol.clone(),
            symbol_color: atom.nucleus.color.clone(),
            atomic_number: atom.atomic_number,
            mass_number: mass_number(atom.atomic_number),
            neutrons: neutron_count(atom.atomic_number),
            configuration,
            cards,
            rows,
        }
    }
}
