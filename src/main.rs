use clap::Parser;
use orbital_cloud::render::color::Theme;
use orbital_cloud::{App, SimulationConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orbital-cloud", about = "Sample hydrogen-like orbital clouds for an atom")]
struct Cli {
    /// Directory of atom JSON documents
    #[arg(long, default_value = "atoms")]
    atoms: PathBuf,

    /// Atom to load, by file stem
    #[arg(long, default_value = "hydrogen")]
    atom: String,

    /// Color theme: thermal, electric, spectral or neon
    #[arg(long)]
    theme: Option<String>,

    /// Simulation config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    particles_per_electron: Option<usize>,

    /// Sample on the current thread only
    #[arg(long)]
    serial: bool,

    /// Write the built scene as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn simulation_config(&self) -> Result<SimulationConfig, orbital_cloud::config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(count) = self.particles_per_electron {
            config.particles_per_electron = count;
        }
        if self.serial {
            config.parallel = false;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    if let Some(name) = &cli.theme {
        name.parse::<Theme>()?;
    }

    let mut app = App::initialize(&cli.atoms, cli.simulation_config()?)?;
    app.load_atom(&cli.atom)?;
    let gradient = match &cli.theme {
        Some(name) => app.set_theme(name),
        None => app.theme().gradient(),
    };

    if let Some(panel) = app.info_panel() {
        println!("{} ({})  Z = {}", panel.name, panel.symbol, panel.atomic_number);
        println!("~{} u, {} neutrons", panel.mass_number, panel.neutrons);
        println!("{}", panel.configuration);
        for card in &panel.cards {
            println!(
                "  {:<4} {:>2} / {:<2} e-  {:>5.1}%",
                card.subshell, card.electrons, card.capacity, card.percent
            );
        }
        for row in &panel.rows {
            let boxes: Vec<String> = row
                .boxes
                .iter()
                .map(|fill| format!("[{:^2}]", fill.arrows()))
                .collect();
            println!("  {:<4} {}", row.subshell, boxes.join(""));
        }
    }

    if let Some(scene) = app.scene() {
        let scale = app.config().display_scale;
        for cloud in scene.clouds() {
            println!(
                "{:<5} {:>7} points  <r> = {:>6.2} a0  fallbacks {}",
                cloud.descriptor.name,
                cloud.len(),
                cloud.mean_radius(scale),
                cloud.fallback_count
            );
        }
        println!(
            "{} points, {} nucleons",
            scene.particle_count(),
            scene.nucleus().proton_count() + scene.nucleus().neutron_count()
        );
    }
    println!("{}: {}", app.theme().label(), gradient.to_css());

    if let Some(path) = &cli.output {
        fs::write(path, app.export_json()?)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
