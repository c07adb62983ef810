use crate::physics::electron::Orbital;
use crate::physics::elements::Nuclide;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtomConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid atom document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<AtomConfigError>,
    },
    #[error("atomic number must be at least 1")]
    ZeroAtomicNumber,
    #[error("orbital `{name}` has invalid quantum numbers (n={n}, l={l}, m={m})")]
    QuantumNumbers { name: String, n: u32, l: u32, m: i32 },
    #[error("orbital `{name}` holds {current} electrons but only fits {max}")]
    OverCapacity { name: String, current: u32, max: u32 },
    #[error("invalid nucleus color `{0}`, expected #rgb or #rrggbb")]
    Color(String),
}

fn default_max_electrons() -> u32 {
    2
}

/// One orbital of an atom document, as listed in the atom JSON files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalDescriptor {
    pub n: u32,
    pub l: u32,
    pub m: i32,
    pub name: String,
    pub current_electrons: u32,
    #[serde(default = "default_max_electrons")]
    pub max_electrons: u32,
}

impl OrbitalDescriptor {
    pub fn orbital(&self) -> Orbital {
        Orbital::new(self.n, self.l, self.m)
    }

    pub fn is_occupied(&self) -> bool {
        self.current_electrons > 0
    }

    fn validate(&self) -> Result<(), AtomConfigError> {
        if Orbital::try_new(self.n, self.l, self.m).is_none() {
            return Err(AtomConfigError::QuantumNumbers {
                name: self.name.clone(),
                n: self.n,
                l: self.l,
                m: self.m,
            });
        }
        if self.current_electrons > self.max_electrons {
            return Err(AtomConfigError::OverCapacity {
                name: self.name.clone(),
                current: self.current_electrons,
                max: self.max_electrons,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NucleusStyle {
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomDescriptor {
    pub atomic_number: u32,
    pub name: String,
    pub symbol: String,
    pub nucleus: NucleusStyle,
    pub orbitals: Vec<OrbitalDescriptor>,
}

impl AtomDescriptor {
    /// Parses and validates one atom document.
    pub fn from_json_str(json: &str) -> Result<Self, AtomConfigError> {
        let atom: AtomDescriptor = serde_json::from_str(json)?;
        atom.validate()?;
        Ok(atom)
    }

    /// Checks quantum numbers, capacities and the nucleus color.
    ///
    /// An electron total that differs from Z is allowed (ions) and only logged.
    pub fn validate(&self) -> Result<(), AtomConfigError> {
        if self.atomic_number == 0 {
            return Err(AtomConfigError::ZeroAtomicNumber);
        }
        for orbital in &self.orbitals {
            orbital.validate()?;
        }
        parse_hex_color(&self.nucleus.color)?;

        let electrons = self.electron_count();
        if electrons != self.atomic_number {
            warn!(
                "{} lists {} electrons for Z = {}",
                self.name, electrons, self.atomic_number
            );
        }
        Ok(())
    }

    pub fn electron_count(&self) -> u32 {
        self.orbitals.iter().map(|o| o.current_electrons).sum()
    }

    pub fn occupied_orbitals(&self) -> impl Iterator<Item = &OrbitalDescriptor> {
        self.orbitals.iter().filter(|o| o.is_occupied())
    }

    pub fn nuclide(&self) -> Nuclide {
        Nuclide::for_element(self.atomic_number)
    }

    pub fn nucleus_rgb(&self) -> Result<[u8; 3], AtomConfigError> {
        parse_hex_color(&self.nucleus.color)
    }
}

/// Parses `#rgb` or `#rrggbb`.
pub fn parse_hex_color(value: &str) -> Result<[u8; 3], AtomConfigError> {
    let invalid = || AtomConfigError::Color(value.to_owned());
    let digits = value.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                let nibble = channel(&digits[i..i + 1])?;
                *slot = nibble * 17;
            }
            Ok(rgb)
        }
        6 => Ok([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARBON: &str = r##"{
        "atomicNumber": 6,
        "name": "Carbon",
        "symbol": "C",
        "nucleus": { "color": "#909090" },
        "orbitals": [
            { "n": 1, "l": 0, "m": 0, "name": "1s", "currentElectrons": 2, "maxElectrons": 2 },
            { "n": 2, "l": 0, "m": 0, "name": "2s", "currentElectrons": 2, "maxElectrons": 2 },
            { "n": 2, "l": 1, "m": 1, "name": "2px", "currentElectrons": 1 },
            { "n": 2, "l": 1, "m": -1, "name": "2py", "currentElectrons": 1 },
            { "n": 2, "l": 1, "m": 0, "name": "2pz", "currentElectrons": 0 }
        ]
    }"##;

    #[test]
    fn parses_camel_case_document() {
        let atom = AtomDescriptor::from_json_str(CARBON).unwrap();
        assert_eq!(atom.atomic_number, 6);
        assert_eq!(atom.symbol, "C");
        assert_eq!(atom.orbitals.len(), 5);
        assert_eq!(atom.orbitals[2].max_electrons, 2);
        assert_eq!(atom.orbitals[2].orbital(), Orbital::new(2, 1, 1));
        assert_eq!(atom.electron_count(), 6);
        assert_eq!(atom.occupied_orbitals().count(), 4);
        assert_eq!(atom.nucleus_rgb().unwrap(), [0x90, 0x90, 0x90]);
        assert_eq!(atom.nuclide().neutrons, 6);
    }

    #[test]
    fn rejects_invalid_quantum_numbers() {
        let json = CARBON.replace(r#""n": 2, "l": 1, "m": 0"#, r#""n": 2, "l": 2, "m": 0"#);
        let err = AtomDescriptor::from_json_str(&json).unwrap_err();
        assert!(matches!(err, AtomConfigError::QuantumNumbers { l: 2, .. }));
    }

    #[test]
    fn rejects_overfilled_orbital() {
        let json = CARBON.replace(
            r#""name": "2px", "currentElectrons": 1"#,
            r#""name": "2px", "currentElectrons": 3"#,
        );
        let err = AtomDescriptor::from_json_str(&json).unwrap_err();
        assert!(matches!(err, AtomConfigError::OverCapacity { current: 3, max: 2, .. }));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            AtomDescriptor::from_json_str("{ \"atomicNumber\": 1 }"),
            Err(AtomConfigError::Json(_))
        ));
        let json = CARBON.replace("\"atomicNumber\": 6", "\"atomicNumber\": 0");
        assert!(matches!(
            AtomDescriptor::from_json_str(&json),
            Err(AtomConfigError::ZeroAtomicNumber)
        ));
    }

    #[test]
    fn ions_are_accepted() {
        let json = CARBON.replace(
            r#""name": "2py", "currentElectrons": 1"#,
            r#""name": "2py", "currentElectrons": 0"#,
        );
        let atom = AtomDescriptor::from_json_str(&json).unwrap();
        assert_eq!(atom.electron_count(), 5);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#fff").unwrap(), [255, 255, 255]);
        assert_eq!(parse_hex_color("#1a0033").unwrap(), [0x1a, 0x00, 0x33]);
        assert!(parse_hex_color("1a0033").is_err());
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#+1+2+3").is_err());
    }
}
