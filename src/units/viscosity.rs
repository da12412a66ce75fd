use serde::{Deserialize, Serialize};

/// 점도 단위. 내부 기준은 Pa·s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViscosityUnit {
    PascalSecond,
    Centipoise,
    /// lb/(ft·s)
    PoundPerFootSecond,
}

/// 1 lb/(ft·s) = 0.45359237 kg / 0.3048 m·s
pub const PAS_PER_LB_FT_S: f64 = 0.453_592_37 / 0.3048;

fn to_pas(value: f64, unit: ViscosityUnit) -> f64 {
    match unit {
        ViscosityUnit::PascalSecond => value,
        ViscosityUnit::Centipoise => value / 1000.0,
        ViscosityUnit::PoundPerFootSecond => value * PAS_PER_LB_FT_S,
    }
}

fn from_pas(value: f64, unit: ViscosityUnit) -> f64 {
    match unit {
        ViscosityUnit::PascalSecond => value,
        ViscosityUnit::Centipoise => value * 1000.0,
        ViscosityUnit::PoundPerFootSecond => value / PAS_PER_LB_FT_S,
    }
}

/// 점도를 변환한다.
pub fn convert_viscosity(value: f64, from: ViscosityUnit, to: ViscosityUnit) -> f64 {
    if from == to {
        return value;
    }
    from_pas(to_pas(value, from), to)
}
