use std::fs;

use bst_visualizer::{App, ExportOptions, VisualizerConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn sample_app() -> App {
    let mut app = App::default();
    for value in [50, 30, 70, 20] {
        app.insert_value(value);
    }
    app
}

#[test]
fn test_save_json() {
    let dir = TempDir::new().unwrap();
    let app = sample_app();

    let path = app.save_json(dir.path()).unwrap().unwrap();
    assert_eq!(path, dir.path().join("bst-data.json"));

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(Some(written), app.export_json().unwrap());

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed["value"], 50);
    assert_eq!(parsed["left"]["left"]["value"], 20);
    assert_eq!(parsed["left"]["left"]["depth"], 2);
    assert_eq!(parsed["height"], 2);
    assert!(parsed["right"]["right"].is_null());
}

#[test]
fn test_save_png() {
    let dir = TempDir::new().unwrap();
    let app = sample_app();

    let path = app.save_png(dir.path()).unwrap().unwrap();
    assert_eq!(path, dir.path().join("bst-visualization.png"));

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE[..]);
}

#[test]
fn test_configured_file_names() {
    let dir = TempDir::new().unwrap();
    let export = ExportOptions {
        json_file_name: "tree.json".to_string(),
        png_file_name: "tree.png".to_string(),
        ..ExportOptions::default()
    };
    let mut app = App::new(VisualizerConfig::new().export(export));
    app.insert_value(1);

    assert_eq!(
        app.save_json(dir.path()).unwrap(),
        Some(dir.path().join("tree.json"))
    );
    assert_eq!(
        app.save_png(dir.path()).unwrap(),
        Some(dir.path().join("tree.png"))
    );
}

#[test]
fn test_empty_tree_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let app = App::default();

    assert_eq!(app.save_json(dir.path()).unwrap(), None);
    assert_eq!(app.save_png(dir.path()).unwrap(), None);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let app = sample_app();

    let err = app.save_json(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to write export"));
    assert!(app.save_png(&missing).is_err());
}

#[test]
fn test_load_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("visualizer.json");
    fs::write(&path, r#"{ "layout": { "vertical_spacing": 100.0 } }"#).unwrap();

    let config = VisualizerConfig::load(&path).unwrap();
    assert_eq!(config.layout.vertical_spacing, 100.0);

    let mut app = App::new(config);
    app.insert_value(2);
    app.insert_value(1);
    assert_eq!(app.layout().position_of(1).map(|p| p.y), Some(100.0));
}
