use serde::{Deserialize, Serialize};

/// 압력 단위. 내부 기준은 Pa(절대압)이다.
///
/// 누설 계산은 상류/하류 모두 절대압을 다루므로 게이지 보정은 하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    Psi,
}

/// 1 psi = 6894.757293168 Pa. 모든 psi↔Pa 변환은 이 값 하나만 쓴다.
pub const PA_PER_PSI: f64 = 6_894.757_293_168;

fn to_pascal(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value,
        PressureUnit::Psi => value * PA_PER_PSI,
    }
}

fn from_pascal(value_pa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value_pa,
        PressureUnit::Psi => value_pa / PA_PER_PSI,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    if from == to {
        return value;
    }
    from_pascal(to_pascal(value, from), to)
}
