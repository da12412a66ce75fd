//! 오리피스 누설 증기량과 연간 비용/배출량 계산.
//!
//! 형상·압력(in, psi)을 SI로 바꿔 오리피스 유량을 구한 뒤, PPH 유량에서 연료비,
//! 용수비, 연료 가스 손실, CO₂ 배출량을 계산해 [`SteamLeakReport`]로 돌려준다.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::if97::{If97Water, PropertyLookupError, PropertyOracle};
use super::orifice_meter::{
    differential_pressure_meter_solver, FlowSolverError, MeterInput, MeterSolution, MeterType,
    TapStyle,
};
use super::steam_cost::{annual_losses, AnnualLossInput};
use super::vapor_state::VaporState;
use crate::config::{ConfigError, EconomicConstants};
use crate::units::{
    convert_density, convert_length, convert_mass_flow, convert_pressure, convert_viscosity,
    DensityUnit, LengthUnit, MassFlowUnit, PressureUnit, ViscosityUnit,
};

/// 증기 등엔트로피 지수
pub const STEAM_ISENTROPIC_EXPONENT: f64 = 1.3;
/// 누설 모델의 유량계 종류
pub const LEAK_METER_TYPE: MeterType = MeterType::Iso5167Orifice;
/// 누설 모델의 탭 위치 (D 및 D/2)
pub const LEAK_TAP_STYLE: TapStyle = TapStyle::DAndDOver2;

/// 누설 계산 오류.
#[derive(Debug, Error)]
pub enum LeakCalcError {
    /// 증기 물성 조회 실패
    #[error("물성 조회 오류: {0}")]
    PropertyLookup(#[from] PropertyLookupError),
    /// 오리피스 유량 계산 실패
    #[error("유량 계산 오류: {0}")]
    FlowSolver(#[from] FlowSolverError),
    /// 경제·환경 상수 오류
    #[error("설정 오류: {0}")]
    Configuration(#[from] ConfigError),
}

/// 증기 누설 계산기.
#[derive(Debug, Clone)]
pub struct LeakCalculator<O = If97Water> {
    vapor: VaporState<O>,
    pipe_diameter_m: f64,
    orifice_diameter_m: f64,
    upstream_pressure_pa: f64,
    downstream_pressure_pa: f64,
    economics: EconomicConstants,
}

impl<O: PropertyOracle> LeakCalculator<O> {
    /// 형상(in)과 압력(psi)을 받아 계산기를 만든다. 상수는 이 시점에 검증한다.
    pub fn new(
        vapor: VaporState<O>,
        pipe_diameter_in: f64,
        orifice_diameter_in: f64,
        upstream_psi: f64,
        downstream_psi: f64,
        economics: EconomicConstants,
    ) -> Result<Self, LeakCalcError> {
        economics.validate()?;
        Ok(Self {
            vapor,
            pipe_diameter_m: convert_length(pipe_diameter_in, LengthUnit::Inch, LengthUnit::Meter),
            orifice_diameter_m: convert_length(
                orifice_diameter_in,
                LengthUnit::Inch,
                LengthUnit::Meter,
            ),
            upstream_pressure_pa: convert_pressure(
                upstream_psi,
                PressureUnit::Psi,
                PressureUnit::Pascal,
            ),
            downstream_pressure_pa: convert_pressure(
                downstream_psi,
                PressureUnit::Psi,
                PressureUnit::Pascal,
            ),
            economics,
        })
    }

    pub fn vapor(&self) -> &VaporState<O> {
        &self.vapor
    }

    pub fn economics(&self) -> &EconomicConstants {
        &self.economics
    }

    pub fn pipe_diameter_m(&self) -> f64 {
        self.pipe_diameter_m
    }

    pub fn orifice_diameter_m(&self) -> f64 {
        self.orifice_diameter_m
    }

    pub fn upstream_pressure_pa(&self) -> f64 {
        self.upstream_pressure_pa
    }

    pub fn downstream_pressure_pa(&self) -> f64 {
        self.downstream_pressure_pa
    }

    /// 증기 상태의 밀도/점도를 SI로 되돌려 유량계 입력을 만든다.
    pub fn meter_input(&self) -> Result<MeterInput, PropertyLookupError> {
        let density_kg_m3 = convert_density(
            self.vapor.density()?,
            DensityUnit::PoundPerCubicFoot,
            DensityUnit::KgPerCubicMeter,
        );
        let viscosity_pa_s = convert_viscosity(
            self.vapor.viscosity()?,
            ViscosityUnit::PoundPerFootSecond,
            ViscosityUnit::PascalSecond,
        );
        Ok(MeterInput {
            pipe_diameter_m: self.pipe_diameter_m,
            orifice_diameter_m: self.orifice_diameter_m,
            upstream_pressure_pa: self.upstream_pressure_pa,
            downstream_pressure_pa: self.downstream_pressure_pa,
            density_kg_m3,
            viscosity_pa_s,
            isentropic_exponent: STEAM_ISENTROPIC_EXPONENT,
            meter_type: LEAK_METER_TYPE,
            taps: LEAK_TAP_STYLE,
        })
    }

    /// 오리피스 질량유량을 계산한다.
    pub fn solve_flow(&self) -> Result<MeterSolution, LeakCalcError> {
        // 압력 역전은 물성 조회 전에 걸러낸다.
        if self.downstream_pressure_pa >= self.upstream_pressure_pa {
            return Err(FlowSolverError::NoPressureDrop {
                upstream_pa: self.upstream_pressure_pa,
                downstream_pa: self.downstream_pressure_pa,
            }
            .into());
        }
        let input = self.meter_input()?;
        Ok(differential_pressure_meter_solver(&input)?)
    }

    fn check_superheat(&self) {
        match self.vapor.superheat_f() {
            Ok(Some(margin)) if margin <= 0.0 => warn!(
                temperature_f = self.vapor.supplied_temperature_f(),
                superheat_f = margin,
                "과열 증기로 지정됐지만 포화 온도 이하입니다. 액체 물성으로 계산됩니다"
            ),
            Ok(_) => {}
            // 임계압 이상에서는 포화 온도가 없다.
            Err(err) => debug!(%err, "과열도 확인 생략"),
        }
    }

    /// 누설량과 연간 비용/배출량을 계산한다.
    pub fn compute(&self) -> Result<SteamLeakReport, LeakCalcError> {
        let solution = self.solve_flow()?;
        self.check_superheat();
        let rate = convert_mass_flow(
            solution.mass_flow_kg_s,
            MassFlowUnit::KgPerSecond,
            MassFlowUnit::PoundPerHour,
        );
        let enthalpy = self.vapor.enthalpy()?;
        let entropy = self.vapor.entropy()?;
        let losses = annual_losses(
            AnnualLossInput {
                mass_flow_pph: rate,
                steam_enthalpy_btu_lb: enthalpy,
            },
            &self.economics,
        );

        let report = SteamLeakReport {
            temp_f: self.vapor.temperature_f()?,
            press_psia: self.vapor.pressure_psia(),
            superheat: self.vapor.is_superheated(),
            enthalpy_btu_lb: enthalpy,
            entropy_btu_lb_r: entropy,
            rate,
            fuel_cost: losses.fuel_cost,
            water_cost: losses.water_cost,
            accumulated_cost: losses.accumulated_cost,
            gas_waste: losses.gas_waste,
            co2_emissions: losses.co2_emissions,
        };
        info!(
            rate_pph = report.rate,
            choked = solution.choked,
            accumulated_cost = report.accumulated_cost,
            "증기 누설 계산 완료"
        );
        Ok(report)
    }
}

/// 증기 누설 계산 결과. 한 번 만들어지면 바뀌지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SteamLeakReport {
    /// 증기 온도 [°F] (포화 증기면 포화 온도)
    pub temp_f: f64,
    /// 증기 압력 [psia]
    pub press_psia: f64,
    pub superheat: bool,
    /// 비엔탈피 [BTU/lb]
    pub enthalpy_btu_lb: f64,
    /// 비엔트로피 [BTU/(lb·°R)]
    pub entropy_btu_lb_r: f64,
    /// 누설량 [PPH]
    pub rate: f64,
    /// 연료비 [$/yr]
    pub fuel_cost: f64,
    /// 용수비 [$/yr]
    pub water_cost: f64,
    /// 누적 비용 [$/yr]
    pub accumulated_cost: f64,
    /// 연료 가스 손실 [ft³/yr]
    pub gas_waste: f64,
    /// CO₂ 배출량 [ton/yr]
    pub co2_emissions: f64,
}

impl fmt::Display for SteamLeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "증기 온도 (°F): {:.2}", self.temp_f)?;
        writeln!(f, "증기 압력 (psia): {:.2}", self.press_psia)?;
        writeln!(f, "과열: {}", if self.superheat { "Yes" } else { "No" })?;
        writeln!(f, "엔탈피 (BTU/lb): {:.4}", self.enthalpy_btu_lb)?;
        writeln!(f, "엔트로피 (BTU/lb·R): {:.4}", self.entropy_btu_lb_r)?;
        writeln!(f, "누설량 (PPH): {}", with_thousands(self.rate, 4))?;
        writeln!(f, "연료 가스 손실 (ft³/yr): {}", with_thousands(self.gas_waste, 4))?;
        writeln!(f, "연료비 ($/yr): ${}", with_thousands(self.fuel_cost, 2))?;
        writeln!(f, "용수비 ($/yr): ${}", with_thousands(self.water_cost, 2))?;
        writeln!(f, "누적 비용 ($/yr): ${}", with_thousands(self.accumulated_cost, 2))?;
        write!(f, "CO₂ 배출량 (ton/yr): {}", with_thousands(self.co2_emissions, 4))
    }
}

/// 천 단위 구분 쉼표를 넣어 소수 `decimals` 자리까지 표시한다.
pub fn with_thousands(value: f64, decimals: usize) -> String {
    let digits = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, frac)) => (i, Some(frac)),
        None => (digits.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let negative = value < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
