//! 증기 누설 계산 모듈 모음.

pub mod if97;
pub mod orifice_meter;
pub mod steam_cost;
pub mod steam_leak;
pub mod vapor_state;

pub use if97::{If97Water, Property, PropertyLookupError, PropertyOracle, StateInput};
pub use orifice_meter::{
    differential_pressure_meter_solver, FlowSolverError, MeterInput, MeterSolution, MeterType,
    TapStyle,
};
pub use steam_leak::{LeakCalcError, LeakCalculator, SteamLeakReport};
pub use vapor_state::{Phase, VaporState, VaporStateReport};
