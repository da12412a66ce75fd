use serde::{Deserialize, Serialize};

/// 밀도 단위. 내부 기준은 kg/m³이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityUnit {
    KgPerCubicMeter,
    PoundPerCubicFoot,
}

/// 1 lb/ft³ = 0.45359237 kg / (0.3048 m)³
pub const KG_M3_PER_LB_FT3: f64 = 0.453_592_37 / (0.3048 * 0.3048 * 0.3048);

/// 밀도를 변환한다.
pub fn convert_density(value: f64, from: DensityUnit, to: DensityUnit) -> f64 {
    match (from, to) {
        (DensityUnit::PoundPerCubicFoot, DensityUnit::KgPerCubicMeter) => value * KG_M3_PER_LB_FT3,
        (DensityUnit::KgPerCubicMeter, DensityUnit::PoundPerCubicFoot) => value / KG_M3_PER_LB_FT3,
        _ => value,
    }
}
