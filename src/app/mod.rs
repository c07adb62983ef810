use crate::atom::library::AtomLibrary;
use crate::atom::model::AtomConfigError;
use crate::config::{ConfigError, SimulationConfig};
use crate::physics::nucleus::NucleonInstance;
use crate::render::bohr::{BohrLayout, BohrStyle, layout_bohr_model};
use crate::render::cloud::CloudBuffer;
use crate::render::color::{Gradient, Theme, ThemeSelection};
use crate::simulation::atom::{AtomScene, OrbitalCloud};
use crate::simulation::solver::MonteCarloSampler;
use crate::ui::InfoPanel;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Atom(#[from] AtomConfigError),
    #[error("no atom named `{0}` in the library")]
    UnknownAtom(String),
    #[error("no atom loaded")]
    NoAtomLoaded,
    #[error("failed to export scene: {0}")]
    Export(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Headless viewer state: the atom library, the active scene and the point
/// buffer a renderer would upload.
pub struct App {
    library: AtomLibrary,
    config: SimulationConfig,
    sampler: MonteCarloSampler,
    theme: ThemeSelection,
    scene: Option<AtomScene>,
    cloud_buffer: CloudBuffer,
}

impl App {
    pub fn new(library: AtomLibrary, config: SimulationConfig) -> Self {
        let sampler = MonteCarloSampler::with_seed(config.seed);
        let theme = ThemeSelection::new(config.default_theme);
        Self {
            library,
            config,
            sampler,
            theme,
            scene: None,
            cloud_buffer: CloudBuffer::new(),
        }
    }

    pub fn initialize(atoms_dir: impl AsRef<Path>, config: SimulationConfig) -> AppResult<Self> {
        let library = AtomLibrary::load_dir(atoms_dir)?;
        Ok(Self::new(library, config))
    }

    pub fn library(&self) -> &AtomLibrary {
        &self.library
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<&AtomScene> {
        self.scene.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn cloud_buffer(&self) -> &CloudBuffer {
        &self.cloud_buffer
    }

    /// Samples every occupied orbital of the atom stored under `key` and
    /// makes it the active scene.
    pub fn load_atom(&mut self, key: &str) -> AppResult<&AtomScene> {
        let atom = self
            .library
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::UnknownAtom(key.to_owned()))?;
        info!("loading {} (Z = {})", atom.name, atom.atomic_number);

        let scene = AtomScene::build(atom, &self.config, &mut self.sampler, self.theme.current())?;
        Ok(self.install(scene))
    }

    /// Switches the color theme and recolors the active scene. Unknown names
    /// change nothing; the returned gradient is always the one in effect.
    pub fn set_theme(&mut self, name: &str) -> Gradient {
        if !self.theme.set_theme(name) {
            warn!("ignoring unknown theme `{name}`");
            return self.theme.gradient();
        }

        let theme = self.theme.current();
        if let Some(scene) = self.scene.as_mut() {
            scene.recolor(theme);
            self.cloud_buffer.write_points(&scene.vertices());
        }
        self.theme.gradient()
    }

    /// Draws a fresh set of points for the active atom.
    pub fn resample(&mut self) -> AppResult<&AtomScene> {
        let atom = self
            .scene
            .as_ref()
            .map(|scene| scene.atom().clone())
            .ok_or(AppError::NoAtomLoaded)?;
        let scene = AtomScene::build(atom, &self.config, &mut self.sampler, self.theme.current())?;
        Ok(self.install(scene))
    }

    pub fn info_panel(&self) -> Option<InfoPanel> {
        self.scene.as_ref().map(|scene| InfoPanel::new(scene.atom()))
    }

    pub fn bohr_layout(&self, width: f32, height: f32) -> Option<BohrLayout> {
        self.scene
            .as_ref()
            .map(|scene| layout_bohr_model(scene.atom(), width, height, BohrStyle::default()))
    }

    pub fn export(&self) -> AppResult<SceneExport<'_>> {
        let scene = self.scene.as_ref().ok_or(AppError::NoAtomLoaded)?;
        Ok(SceneExport::new(scene))
    }

    pub fn export_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.export()?)?)
    }

    fn install(&mut self, scene: AtomScene) -> &AtomScene {
        let grew = self.cloud_buffer.write_points(&scene.vertices());
        if grew {
            debug!(
                "cloud buffer grew to {} vertices ({} bytes)",
                self.cloud_buffer.capacity(),
                self.cloud_buffer.size_in_bytes()
            );
        }
        self.scene.insert(scene)
    }
}

#[derive(Debug, Serialize)]
pub struct NucleusExport {
    pub protons: usize,
    pub neutrons: usize,
    pub cluster_radius: f32,
    pub glow_scale: f32,
    pub instances: Vec<NucleonInstance>,
}

/// Serializable snapshot of a built scene.
#[derive(Debug, Serialize)]
pub struct SceneExport<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub atomic_number: u32,
    pub theme: Theme,
    pub gradient: String,
    pub nucleus: NucleusExport,
    pub clouds: &'a [OrbitalCloud],
}

impl<'a> SceneExport<'a> {
    pub fn new(scene: &'a AtomScene) -> Self {
        let atom = scene.atom();
        let nucleus = scene.nucleus();
        Self {
            name: &atom.name,
            symbol: &atom.symbol,
            atomic_number: atom.atomic_number,
            theme: scene.theme(),
            gradient: scene.theme().gradient().to_css(),
            nucleus: NucleusExport {
                protons: nucleus.proton_count(),
                neutrons: nucleus.neutron_count(),
                cluster_radius: nucleus.cluster_radius,
                glow_scale: nucleus.glow_scale(),
                instances: nucleus.instances(),
            },
            clouds: scene.clouds(),
        }
    }
}
