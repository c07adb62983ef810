use orbital_cloud::atom::library::AtomLibrary;
use orbital_cloud::render::color::Theme;
use orbital_cloud::{App, AppError, SimulationConfig};
use std::fs;

const ATOMS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/atoms");

fn small_config() -> SimulationConfig {
    SimulationConfig {
        particles_per_electron: 200,
        ..SimulationConfig::default()
    }
}

#[test]
fn bundled_atoms_load_in_atomic_number_order() {
    let library = AtomLibrary::load_dir(ATOMS_DIR).unwrap();
    let numbers: Vec<u32> = library.iter().map(|(_, atom)| atom.atomic_number).collect();

    assert_eq!(numbers, [1, 2, 6, 8, 11, 21]);
    for (_, atom) in library.iter() {
        assert_eq!(atom.electron_count(), atom.atomic_number, "{}", atom.name);
    }
    assert_eq!(library.labels()[0].1, "1. Hydrogen");
}

#[test]
fn every_bundled_atom_builds_a_scene() {
    let mut app = App::initialize(ATOMS_DIR, small_config()).unwrap();
    let keys: Vec<String> = app.library().keys().map(str::to_owned).collect();

    for key in keys {
        let scene = app.load_atom(&key).unwrap();
        let electrons = scene.atom().electron_count() as usize;
        assert_eq!(scene.particle_count(), electrons * 200, "{key}");
        assert!(
            scene
                .clouds()
                .iter()
                .all(|cloud| cloud.positions.iter().all(|p| p.is_finite())),
            "{key}"
        );
    }
}

#[test]
fn scandium_d_electron_shows_in_the_panel() {
    let mut app = App::initialize(ATOMS_DIR, small_config()).unwrap();
    app.load_atom("scandium").unwrap();

    let panel = app.info_panel().unwrap();
    assert_eq!(panel.configuration.to_string(), "1s² 2s² 2p⁶ 3s² 3p⁶ 3d¹ 4s²");
    assert_eq!(panel.mass_number, 48);

    let d_card = panel.cards.iter().find(|c| c.subshell == "3d").unwrap();
    assert_eq!((d_card.electrons, d_card.capacity), (1, 10));
    assert_eq!(d_card.color, "#9999ff");

    let layout = app.bohr_layout(300.0, 300.0).unwrap();
    let counts: Vec<usize> = layout.shells.iter().map(|s| s.electrons.len()).collect();
    assert_eq!(counts, [2, 8, 9, 2]);
}

#[test]
fn exported_scene_round_trips_through_a_file() {
    let mut app = App::initialize(ATOMS_DIR, small_config()).unwrap();
    app.load_atom("carbon").unwrap();
    app.set_theme("spectral");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carbon.json");
    fs::write(&path, app.export_json().unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["theme"], "spectral");
    assert_eq!(json["gradient"], Theme::Spectral.gradient().to_css());
    assert_eq!(json["clouds"].as_array().unwrap().len(), 4);
    assert_eq!(json["nucleus"]["neutrons"], 6);
}

#[test]
fn broken_documents_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        format!("{ATOMS_DIR}/hydrogen.json"),
        dir.path().join("hydrogen.json"),
    )
    .unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(
        dir.path().join("impossible.json"),
        r##"{ "atomicNumber": 1, "name": "X", "symbol": "X", "nucleus": { "color": "#fff" },
             "orbitals": [ { "n": 1, "l": 1, "m": 0, "name": "1p", "currentElectrons": 1 } ] }"##,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let mut app = App::initialize(dir.path(), small_config()).unwrap();
    assert_eq!(app.library().len(), 1);
    assert!(matches!(app.load_atom("broken"), Err(AppError::UnknownAtom(_))));
    assert!(app.load_atom("hydrogen").is_ok());
}
