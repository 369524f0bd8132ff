//! Environment overrides live in their own test binary: they mutate process
//! state that every other `Settings::load` call would observe.

use std::env;
use std::fs;

use tempfile::TempDir;

use otcirc::config::Settings;

#[test]
fn given_env_vars_when_load_then_they_override_local_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("otcirc.toml");
    fs::write(&path, "[canvas]\nsize = 600.0\nmargin = 20.0\n").unwrap();

    env::set_var("OTCIRC__CANVAS__SIZE", "500");
    env::set_var("OTCIRC__STYLE__BACKGROUND", "ivory");
    let loaded = Settings::load(Some(&path));
    env::remove_var("OTCIRC__CANVAS__SIZE");
    env::remove_var("OTCIRC__STYLE__BACKGROUND");

    let settings = loaded.expect("load settings");
    assert_eq!(settings.canvas.size, 500.0);
    assert_eq!(settings.canvas.margin, 20.0);
    assert_eq!(settings.style.background, "ivory");
    assert_eq!(settings.style.stroke, "black");
}
