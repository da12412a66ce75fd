use serde::{Deserialize, Serialize};

/// 질량유량 단위. 내부 기준은 kg/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassFlowUnit {
    KgPerSecond,
    /// PPH (lb/h)
    PoundPerHour,
}

const KG_PER_LB: f64 = 0.453_592_37;

fn to_kg_s(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KgPerSecond => value,
        MassFlowUnit::PoundPerHour => value * KG_PER_LB / 3600.0,
    }
}

fn from_kg_s(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KgPerSecond => value,
        // 1 kg/s ≈ 7936.64 lb/h
        MassFlowUnit::PoundPerHour => value * 3600.0 / KG_PER_LB,
    }
}

/// 질량유량을 변환한다.
pub fn convert_mass_flow(value: f64, from: MassFlowUnit, to: MassFlowUnit) -> f64 {
    if from == to {
        return value;
    }
    from_kg_s(to_kg_s(value, from), to)
}
