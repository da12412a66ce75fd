use std::fs;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use steam_leak_manager::leak_register::{
    LeakRegister, LeakSite, LeakStatus, LeakSurvey, RecordFilter, RegisterError,
    RepairPrerequisites,
};
use steam_leak_manager::steam::SteamLeakReport;

fn report(rate: f64, accumulated_cost: f64) -> SteamLeakReport {
    SteamLeakReport {
        temp_f: 750.0,
        press_psia: 614.7,
        superheat: true,
        enthalpy_btu_lb: 1_377.0,
        entropy_btu_lb_r: 1.6,
        rate,
        fuel_cost: accumulated_cost * 0.9,
        water_cost: accumulated_cost * 0.1,
        accumulated_cost,
        gas_waste: 100.0,
        co2_emissions: 5.0,
    }
}

fn survey(number: &str, area: &str) -> LeakSurvey {
    LeakSurvey {
        leak_number: number.to_string(),
        site: LeakSite {
            area: area.to_string(),
            unit: "U-100".to_string(),
            location: "PSV header".to_string(),
        },
        upstream_psi: 600.0,
        orifice_diameter_in: 0.125,
        comments: None,
        prerequisites: RepairPrerequisites::default(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn sample_register() -> LeakRegister {
    let mut register = LeakRegister::default();
    let a = register.register(survey("SL-001", "Boiler"), &report(100.0, 1_000.0));
    let b = register.register(survey("SL-002", "Boiler"), &report(50.0, 500.0));
    let c = register.register(survey("SL-003", "Tank Farm"), &report(20.0, 200.0));
    register.register(survey("SL-004", "Tank Farm"), &report(10.0, 80.0));
    register.mark_complete(a, date(2024, 3, 1)).expect("complete a");
    register.mark_complete(b, date(2023, 11, 20)).expect("complete b");
    register.mark_complete(c, date(2024, 7, 9)).expect("complete c");
    register
}

#[test]
fn records_start_pending_with_report_values() {
    let mut register = LeakRegister::default();
    let id = register.register(survey("SL-010", "Boiler"), &report(42.0, 420.0));
    assert_eq!(id, 1);
    assert_eq!(register.next_id(), 2);

    let record = &register.records()[0];
    assert_eq!(record.status, LeakStatus::Pending);
    assert_eq!(record.leak_number, "SL-010");
    assert_eq!(record.steam_pressure_design, 614.7);
    assert_eq!(record.steam_pressure_pricing, 600.0);
    assert_eq!(record.size, 0.125);
    assert_eq!(record.steam_waste, 42.0);
    assert_eq!(record.loss_per_year, 420.0);
    assert_eq!(record.fuel_waste, 100.0);
    assert_eq!(record.co2, 5.0);
    assert!(record.date_completed.is_none());
}

#[test]
fn dashboard_aggregates() {
    let register = sample_register();

    assert_eq!(register.completed_count(), 3);
    assert_relative_eq!(register.completed_steam_waste(), 170.0);
    assert_relative_eq!(register.ytd_savings(2024), 1_200.0);
    assert_relative_eq!(register.ytd_savings(2023), 500.0);
    assert_relative_eq!(register.future_opportunity(), 80.0);

    let by_area = register.loss_by_area(2024);
    assert_eq!(by_area.len(), 2);
    assert_relative_eq!(by_area["Boiler"], 1_000.0);
    assert_relative_eq!(by_area["Tank Farm"], 200.0);
    assert!(register.loss_by_area(2022).is_empty());

    let summary = register.dashboard(2024);
    assert_eq!(summary.completed_count, 3);
    assert_relative_eq!(summary.ytd_savings, 1_200.0);
    assert!(summary.to_string().contains("Tank Farm"));
}

#[test]
fn completing_unknown_leak_fails() {
    let mut register = sample_register();
    assert!(matches!(
        register.mark_complete(99, date(2024, 1, 1)),
        Err(RegisterError::UnknownLeak(99))
    ));
}

#[test]
fn register_round_trips_through_toml() {
    let dir = std::env::temp_dir().join(format!("steam_leak_register_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch dir");
    let path = dir.join("register.toml");
    let _ = fs::remove_file(&path);

    assert_eq!(LeakRegister::load(&path).expect("empty"), LeakRegister::default());

    let register = sample_register();
    register.save(&path).expect("save");
    let loaded = LeakRegister::load(&path).expect("load");
    assert_eq!(loaded, register);
    assert_eq!(loaded.records()[0].date_completed, Some(date(2024, 3, 1)));
}

#[test]
fn listing_filters_by_status_and_area() {
    let register = sample_register();

    let all = register.list(&RecordFilter::default());
    let ids: Vec<u32> = all.iter().map(|r| r.leak_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let pending = register.list(&RecordFilter {
        status: Some(LeakStatus::Pending),
        area: None,
    });
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].leak_number, "SL-004");

    let tank_farm_done = register.list(&RecordFilter {
        status: Some(LeakStatus::Complete),
        area: Some("tank farm".to_string()),
    });
    assert_eq!(tank_farm_done.len(), 1);
    assert_eq!(tank_farm_done[0].leak_id, 3);

    assert!(register
        .list(&RecordFilter {
            status: None,
            area: Some("Cooling".to_string()),
        })
        .is_empty());
}

#[test]
fn repair_prerequisites_survive_save() {
    let dir = std::env::temp_dir().join(format!("steam_leak_prereq_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch dir");
    let path = dir.join("register.toml");
    let _ = fs::remove_file(&path);

    let prerequisites = RepairPrerequisites {
        scaffold: true,
        insulation: false,
        isolation: true,
        turnaround: false,
        notification: false,
        safety: true,
    };
    let mut register = LeakRegister::default();
    let id = register.register(
        LeakSurvey {
            comments: Some("flange gasket".to_string()),
            prerequisites,
            ..survey("SL-020", "Boiler")
        },
        &report(30.0, 300.0),
    );
    register.save(&path).expect("save");

    let loaded = LeakRegister::load(&path).expect("load");
    let rows = loaded.list(&RecordFilter::default());
    let record = rows[0];
    assert_eq!(record.leak_id, id);
    assert_eq!(record.prerequisites(), prerequisites);
    assert!(record.scaffold && record.isolation && record.safety);
    assert_eq!(record.comments.as_deref(), Some("flange gasket"));

    let row = record.to_string();
    assert!(row.contains("SL-020"));
    assert!(row.contains("비계,격리,안전"));
    assert!(row.contains("flange gasket"));
}

#[test]
fn rows_without_prerequisite_columns_load_as_unset() {
    let text = r#"
[[records]]
leak_id = 7
leak_number = "SL-007"
status = "Pending"
area = "Boiler"
unit = "U-100"
location = "Drum vent"
steam_pressure_design = 150.0
steam_pressure_pricing = 150.0
size = 0.0625
loss_per_year = 1200.0
steam_waste = 12.0
fuel_waste = 40.0
co2 = 2.0
"#;
    let register: LeakRegister = toml::from_str(text).expect("parse");
    let record = &register.records()[0];
    assert_eq!(record.prerequisites(), RepairPrerequisites::default());
    assert!(record.comments.is_none());
}
