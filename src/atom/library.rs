use crate::atom::model::{AtomConfigError, AtomDescriptor};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Atom documents keyed by file stem (`hydrogen.json` -> `hydrogen`),
/// ordered by atomic number.
#[derive(Clone, Debug, Default)]
pub struct AtomLibrary {
    entries: Vec<(String, AtomDescriptor)>,
}

impl AtomLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` document in `dir`.
    ///
    /// Only a missing or unreadable directory is an error. Files that fail to
    /// parse or validate are logged and skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, AtomConfigError> {
        let dir = dir.as_ref();
        let io_error = |source| AtomConfigError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_error)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut library = Self::new();
        for path in paths {
            match load_file(&path) {
                Ok(atom) => {
                    let key = path
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    library.insert(key, atom);
                }
                Err(err) => warn!("skipping atom document: {err}"),
            }
        }

        info!("loaded {} atom documents from {}", library.len(), dir.display());
        Ok(library)
    }

    /// Adds or replaces the document stored under `key`, keeping Z order.
    pub fn insert(&mut self, key: impl Into<String>, atom: AtomDescriptor) {
        let key = key.into();
        self.entries.retain(|(existing, _)| *existing != key);
        let index = self
            .entries
            .partition_point(|(_, a)| a.atomic_number <= atom.atomic_number);
        self.entries.insert(index, (key, atom));
    }

    pub fn get(&self, key: &str) -> Option<&AtomDescriptor> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, atom)| atom)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AtomDescriptor)> {
        self.entries.iter().map(|(key, atom)| (key.as_str(), atom))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Selector labels such as `6. Carbon`.
    pub fn labels(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(key, atom)| (key.to_owned(), format!("{}. {}", atom.atomic_number, atom.name)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn load_file(path: &Path) -> Result<AtomDescriptor, AtomConfigError> {
    let text = fs::read_to_string(path).map_err(|source| AtomConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    AtomDescriptor::from_json_str(&text).map_err(|source| AtomConfigError::InFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}
