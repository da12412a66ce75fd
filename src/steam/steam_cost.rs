//! 증기 누설량에서 연간 연료비, 용수비, 연료 가스 손실, CO₂ 배출량을 계산한다.

use serde::Serialize;

use crate::config::EconomicConstants;

/// 연간 운전 시간 [h]
pub const HOURS_PER_YEAR: f64 = 8760.0;
/// CO₂/C 질량비 (44/12)
pub const CO2_PER_CARBON: f64 = 44.0 / 12.0;

/// 연간 손실 계산 입력.
#[derive(Debug, Clone, Copy)]
pub struct AnnualLossInput {
    /// 누설량 [lb/h]
    pub mass_flow_pph: f64,
    /// 누설 증기 엔탈피 [BTU/lb]
    pub steam_enthalpy_btu_lb: f64,
}

impl AnnualLossInput {
    /// 연간 계산 기준 유량 R [1000 lb/h]
    pub fn rate_klb_h(&self) -> f64 {
        self.mass_flow_pph / 1000.0
    }
}

/// 연간 손실 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualLossResult {
    /// 연료비 [$/yr]
    pub fuel_cost: f64,
    /// 용수비 [$/yr]
    pub water_cost: f64,
    /// 누적 비용 = 연료비 + 용수비 [$/yr]
    pub accumulated_cost: f64,
    /// 연료 가스 손실. 보고서의 ft³/yr 열에 그대로 들어간다.
    pub gas_waste: f64,
    /// CO₂ 배출량 [ton/yr]
    pub co2_emissions: f64,
}

/// 연료비 [$/yr] = (R/1000) × 8760 × h × 연료단가 / 효율
pub fn fuel_cost_per_year(rate_klb_h: f64, enthalpy_btu_lb: f64, c: &EconomicConstants) -> f64 {
    (rate_klb_h / 1000.0) * HOURS_PER_YEAR * enthalpy_btu_lb * c.fuel_cost / c.boiler_efficiency
}

/// 용수비 [$/yr] = 용수단가 × R × 8760
pub fn water_cost_per_year(rate_klb_h: f64, c: &EconomicConstants) -> f64 {
    c.water_cost * rate_klb_h * HOURS_PER_YEAR
}

/// 연료 가스 손실 = (h - h_급수) × (R × 1000) / 효율 / 진발열량
pub fn fuel_gas_waste(rate_klb_h: f64, enthalpy_btu_lb: f64, c: &EconomicConstants) -> f64 {
    (enthalpy_btu_lb - c.feedwater_enthalpy) * (rate_klb_h * 1000.0)
        / c.boiler_efficiency
        / c.net_heating_value
}

/// CO₂ 배출량 [ton/yr] = 44/12 × 연료 가스 손실 × 탄소 함량 × 몰 부피 환산 × 0.001
pub fn co2_emissions(gas_waste: f64, c: &EconomicConstants) -> f64 {
    CO2_PER_CARBON * gas_waste * c.fuel_carbon_content * c.molar_volume_conversion * 0.001
}

/// 누설량과 엔탈피로 연간 손실 항목을 모두 계산한다.
pub fn annual_losses(input: AnnualLossInput, c: &EconomicConstants) -> AnnualLossResult {
    let rate = input.rate_klb_h();
    let fuel_cost = fuel_cost_per_year(rate, input.steam_enthalpy_btu_lb, c);
    let water_cost = water_cost_per_year(rate, c);
    let gas_waste = fuel_gas_waste(rate, input.steam_enthalpy_btu_lb, c);
    AnnualLossResult {
        fuel_cost,
        water_cost,
        accumulated_cost: fuel_cost + water_cost,
        gas_waste,
        co2_emissions: co2_emissions(gas_waste, c),
    }
}
