use serde::{Deserialize, Serialize};

/// 비엔탈피 단위. 내부 기준은 J/kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecificEnthalpyUnit {
    JPerKg,
    BtuPerPound,
}

/// 1 BTU(IT)/lb = 2326 J/kg (정의값)
pub const J_KG_PER_BTU_LB: f64 = 2_326.0;

fn to_base(value: f64, unit: SpecificEnthalpyUnit) -> f64 {
    match unit {
        SpecificEnthalpyUnit::JPerKg => value,
        SpecificEnthalpyUnit::BtuPerPound => value * J_KG_PER_BTU_LB,
    }
}

fn from_base(value: f64, unit: SpecificEnthalpyUnit) -> f64 {
    match unit {
        SpecificEnthalpyUnit::JPerKg => value,
        SpecificEnthalpyUnit::BtuPerPound => value / J_KG_PER_BTU_LB,
    }
}

/// 비엔탈피를 변환한다.
pub fn convert_specific_enthalpy(
    value: f64,
    from: SpecificEnthalpyUnit,
    to: SpecificEnthalpyUnit,
) -> f64 {
    if from == to {
        return value;
    }
    from_base(to_base(value, from), to)
}
