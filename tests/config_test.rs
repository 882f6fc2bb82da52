//! Tests for configuration files

use hand_particle_morph::{
    color::Rgb,
    config::{Config, EXAMPLE_CONFIG},
    templates::Template,
    Error,
};
use tempfile::TempDir;

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("particles.yaml");

    let mut config = Config::default();
    config.particles.point_count = 1200;
    config.particles.template = Template::Flower;
    config.particles.color = Rgb::new(0xff, 0x00, 0x55);
    config.gesture.filter = "exponential:0.35".to_string();
    config.animation.settling_lerp = 0.1;
    config.session.max_frames = Some(600);
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert!(loaded.validate().is_ok());
    assert_eq!(loaded.particles.point_count, 1200);
    assert_eq!(loaded.particles.template, Template::Flower);
    assert_eq!(loaded.particles.color, Rgb::new(0xff, 0x00, 0x55));
    assert_eq!(loaded.gesture.filter, "exponential:0.35");
    assert_eq!(loaded.animation, config.animation);
    assert_eq!(loaded.session.max_frames, Some(600));
}

#[test]
fn test_saved_file_is_readable_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("particles.yaml");
    Config::default().to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("template: sphere"));
    assert!(text.contains("'#00ffcc'") || text.contains("\"#00ffcc\""));
}

#[test]
fn test_example_config_loads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("example.yaml");
    std::fs::write(&path, EXAMPLE_CONFIG).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert!(loaded.validate().is_ok());
    assert_eq!(loaded.particles.template, Template::Sphere);
    assert_eq!(loaded.session.target_fps, 60);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Config::from_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "particles: [not, a, map]\n").unwrap();

    let result = Config::from_file(&path);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_unknown_template_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cube.yaml");
    std::fs::write(&path, "particles:\n  template: cube\n").unwrap();

    assert!(Config::from_file(&path).is_err());
}
