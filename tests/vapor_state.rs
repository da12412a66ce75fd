//! 증기 상태의 조회 경로와 캐시 동작 검증. 호출을 기록하는 오라클로 확인한다.
use std::cell::RefCell;

use approx::assert_relative_eq;
use steam_leak_manager::steam::{
    Phase, Property, PropertyLookupError, PropertyOracle, StateInput, VaporState,
};

const SAT_TEMPERATURE_K: f64 = 400.0;

#[derive(Default)]
struct RecordingOracle {
    calls: RefCell<Vec<(Property, StateInput, StateInput)>>,
}

impl RecordingOracle {
    fn count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn call(&self, i: usize) -> (Property, StateInput, StateInput) {
        self.calls.borrow()[i]
    }
}

impl PropertyOracle for RecordingOracle {
    fn props_si(
        &self,
        output: Property,
        first: StateInput,
        second: StateInput,
    ) -> Result<f64, PropertyLookupError> {
        self.calls.borrow_mut().push((output, first, second));
        Ok(match output {
            Property::Temperature => SAT_TEMPERATURE_K,
            Property::Density => 10.0,
            Property::Enthalpy => 2.8e6,
            Property::Entropy => 6_500.0,
            Property::Viscosity => 1.5e-5,
            Property::Cp => 2_000.0,
            Property::Cv => 1_500.0,
        })
    }
}

struct FailingOracle;

impl PropertyOracle for FailingOracle {
    fn props_si(
        &self,
        _output: Property,
        _first: StateInput,
        _second: StateInput,
    ) -> Result<f64, PropertyLookupError> {
        Err(PropertyLookupError::OutOfRange {
            what: "pressure_pa",
            value: -1.0,
        })
    }
}

#[test]
fn superheated_vapor_queries_temperature_and_pressure() {
    let oracle = RecordingOracle::default();
    let state = VaporState::with_oracle(Some(750.0), 614.7, Phase::Vapor, true, &oracle);

    let h = state.enthalpy().expect("enthalpy");
    assert_relative_eq!(h, 2.8e6 / 2326.0, max_relative = 1e-12);
    assert_eq!(oracle.count(), 1);

    let (property, first, second) = oracle.call(0);
    assert_eq!(property, Property::Enthalpy);
    match (first, second) {
        (StateInput::Temperature(t_k), StateInput::Pressure(p_pa)) => {
            assert_relative_eq!(t_k, (750.0 + 459.67) / 1.8, max_relative = 1e-12);
            assert_relative_eq!(p_pa, 614.7 * 6_894.757_293_168, max_relative = 1e-12);
        }
        other => panic!("unexpected query inputs {other:?}"),
    }
    // 과열 증기는 포화 온도를 조회하지 않는다.
    assert_eq!(state.temperature_f().expect("temperature"), 750.0);
    assert_eq!(oracle.count(), 1);
}

#[test]
fn saturated_vapor_uses_saturation_temperature() {
    let oracle = RecordingOracle::default();
    let state = VaporState::with_oracle(Some(999.0), 100.0, Phase::Vapor, false, &oracle);

    let t_f = state.temperature_f().expect("temperature");
    assert_relative_eq!(t_f, SAT_TEMPERATURE_K * 1.8 - 459.67, max_relative = 1e-12);
    assert_eq!(state.supplied_temperature_f(), Some(999.0));
    assert_eq!(
        oracle.call(0),
        (
            Property::Temperature,
            StateInput::Pressure(100.0 * 6_894.757_293_168),
            StateInput::Quality(1.0)
        )
    );

    state.density().expect("density");
    let (property, first, second) = oracle.call(1);
    assert_eq!(property, Property::Density);
    assert!(matches!(first, StateInput::Pressure(_)));
    assert_eq!(second, StateInput::Quality(1.0));
}

#[test]
fn each_property_is_queried_once() {
    let oracle = RecordingOracle::default();
    let state = VaporState::with_oracle(None, 100.0, Phase::Vapor, false, &oracle);

    for _ in 0..3 {
        state.enthalpy().expect("enthalpy");
        state.density().expect("density");
        state.temperature_f().expect("temperature");
        state.temperature_kelvin().expect("temperature");
    }
    // 포화 온도 1회 + 엔탈피 1회 + 밀도 1회
    assert_eq!(oracle.count(), 3);

    state.viscosity().expect("viscosity");
    state.entropy().expect("entropy");
    state.cp().expect("cp");
    state.cv().expect("cv");
    state.viscosity().expect("viscosity");
    assert_eq!(oracle.count(), 7);
}

#[test]
fn liquid_ignores_superheat_flag() {
    let oracle = RecordingOracle::default();
    let state = VaporState::with_oracle(Some(200.0), 50.0, Phase::Liquid, true, &oracle);

    assert!(!state.is_superheated());
    assert_eq!(state.temperature_f().expect("temperature"), 200.0);
    assert_eq!(
        state.saturation_temperature(),
        Err(PropertyLookupError::NotVapor)
    );

    state.density().expect("density");
    assert_eq!(oracle.count(), 1);
    let (_, first, second) = oracle.call(0);
    assert!(matches!(first, StateInput::Pressure(_)));
    assert_eq!(second, StateInput::Quality(0.0));
}

#[test]
fn superheated_without_temperature_fails_before_lookup() {
    let oracle = RecordingOracle::default();
    let state = VaporState::with_oracle(None, 100.0, Phase::Vapor, true, &oracle);

    assert_eq!(
        state.enthalpy(),
        Err(PropertyLookupError::MissingTemperature)
    );
    assert_eq!(oracle.count(), 0);
}

#[test]
fn oracle_failure_propagates() {
    let state = VaporState::with_oracle(Some(700.0), 500.0, Phase::Vapor, true, FailingOracle);
    assert!(matches!(
        state.density(),
        Err(PropertyLookupError::OutOfRange { .. })
    ));
}

#[test]
fn report_echoes_inputs() {
    let oracle = RecordingOracle::default();
    let liquid = VaporState::with_oracle(Some(200.0), 50.0, Phase::Liquid, false, &oracle);
    let report = liquid.report().expect("report");
    assert_eq!(report.phase, Phase::Liquid);
    assert!(!report.superheat);
    assert!(report.to_string().contains("N/A"));

    let saturated = VaporState::with_oracle(None, 100.0, Phase::Vapor, false, &oracle);
    let report = saturated.report().expect("report");
    assert_relative_eq!(report.temp_f, SAT_TEMPERATURE_K * 1.8 - 459.67, max_relative = 1e-12);
    assert!(report.to_string().contains("과열: No"));
}

#[test]
fn if97_superheated_enthalpy() {
    // 614.7 psia, 750 °F 과열 증기: 증기표 약 1377 BTU/lb
    let state = VaporState::new(Some(750.0), 614.7, Phase::Vapor, true);
    let h = state.enthalpy().expect("enthalpy");
    assert!((1_360.0..1_395.0).contains(&h), "h={h}");
    let rho = state.density().expect("density");
    assert!((0.8..1.0).contains(&rho), "rho={rho}");
}

#[test]
fn if97_saturation_temperature() {
    // 114.7 psia 포화 온도 약 337.9 °F
    let state = VaporState::new(None, 114.7, Phase::Vapor, false);
    let t_f = state.temperature_f().expect("saturation temperature");
    assert!((t_f - 337.9).abs() < 1.0, "t_f={t_f}");
}

#[test]
fn superheat_margin() {
    let oracle = RecordingOracle::default();
    let superheated = VaporState::with_oracle(Some(750.0), 614.7, Phase::Vapor, true, &oracle);
    let margin = superheated.superheat_f().expect("margin").expect("superheated");
    assert_relative_eq!(margin, 750.0 - (SAT_TEMPERATURE_K * 1.8 - 459.67), max_relative = 1e-12);

    let too_cold = VaporState::with_oracle(Some(200.0), 614.7, Phase::Vapor, true, &oracle);
    assert!(too_cold.superheat_f().expect("margin").expect("superheated") < 0.0);

    let saturated = VaporState::with_oracle(None, 100.0, Phase::Vapor, false, &oracle);
    assert_eq!(saturated.superheat_f(), Ok(None));
    let liquid = VaporState::with_oracle(Some(200.0), 50.0, Phase::Liquid, true, &oracle);
    assert_eq!(liquid.superheat_f(), Ok(None));
}
