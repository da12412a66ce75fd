use std::fs;
use std::path::PathBuf;

use steam_leak_manager::config::{load_or_default, Config, ConfigError, EconomicConstants};

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("steam_leak_config_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch dir");
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn missing_file_is_created_with_defaults() {
    let path = scratch_path("defaults.toml");
    let cfg = load_or_default(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());

    let reloaded = load_or_default(&path).expect("reload");
    assert_eq!(reloaded, cfg);
}

#[test]
fn edited_constants_survive_save() {
    let path = scratch_path("edited.toml");
    let mut cfg = Config::default();
    cfg.economics.fuel_cost = 4.25;
    cfg.economics.boiler_efficiency = 0.85;
    cfg.save(&path).expect("save");

    let loaded = load_or_default(&path).expect("load");
    assert_eq!(loaded.economics.fuel_cost, 4.25);
    assert_eq!(loaded.economics.boiler_efficiency, 0.85);
}

#[test]
fn missing_constant_is_a_parse_error() {
    let path = scratch_path("partial.toml");
    fs::write(
        &path,
        "register_path = \"leaks.toml\"\n\n[economics]\nfuel_cost = 6.0\nwater_cost = 1.17\n",
    )
    .expect("write");
    assert!(matches!(load_or_default(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn invalid_constant_in_file_is_rejected() {
    let path = scratch_path("negative.toml");
    let mut cfg = Config::default();
    cfg.economics.net_heating_value = -900.0;
    cfg.save(&path).expect("save");
    assert!(matches!(
        load_or_default(&path),
        Err(ConfigError::NonPositive {
            field: "net_heating_value",
            ..
        })
    ));
}

#[test]
fn validation_bounds() {
    assert!(EconomicConstants::default().validate().is_ok());

    let free = EconomicConstants {
        fuel_cost: 0.0,
        water_cost: 0.0,
        ..EconomicConstants::default()
    };
    assert!(free.validate().is_ok());

    let negative_cost = EconomicConstants {
        water_cost: -1.0,
        ..EconomicConstants::default()
    };
    assert!(matches!(
        negative_cost.validate(),
        Err(ConfigError::OutOfRange {
            field: "water_cost",
            ..
        })
    ));

    let over_unity = EconomicConstants {
        boiler_efficiency: 1.2,
        ..EconomicConstants::default()
    };
    assert!(matches!(
        over_unity.validate(),
        Err(ConfigError::OutOfRange {
            field: "boiler_efficiency",
            ..
        })
    ));

    let nan = EconomicConstants {
        fuel_carbon_content: f64::NAN,
        ..EconomicConstants::default()
    };
    assert!(matches!(
        nan.validate(),
        Err(ConfigError::NonPositive { .. })
    ));
}
