//! 단일 열역학 상태(온도·압력·상·과열 여부)의 물성을 필요할 때 한 번만 계산해 보관한다.
//!
//! 입력과 출력은 미국 관용 단위(°F, psia, lb/ft³, BTU/lb, BTU/lb·°R, lb/ft·s)이고,
//! 오라클 호출은 SI 단위로 한다.

use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::if97::{If97Water, Property, PropertyLookupError, PropertyOracle, StateInput};
use crate::units::{
    convert_density, convert_pressure, convert_specific_enthalpy, convert_specific_entropy,
    convert_temperature, convert_viscosity, DensityUnit, PressureUnit, SpecificEnthalpyUnit,
    SpecificEntropyUnit, TemperatureUnit, ViscosityUnit,
};

/// 유체의 상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Vapor,
    Liquid,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Vapor => write!(f, "vapor"),
            Phase::Liquid => write!(f, "liquid"),
        }
    }
}

/// 한 번 계산된 값을 다시 계산하지 않기 위한 물성별 캐시.
#[derive(Debug, Clone, Default)]
struct PropertyCache {
    temperature_k: OnceCell<f64>,
    pressure_pa: OnceCell<f64>,
    saturation_temperature_k: OnceCell<f64>,
    density_lb_ft3: OnceCell<f64>,
    enthalpy_btu_lb: OnceCell<f64>,
    entropy_btu_lb_r: OnceCell<f64>,
    viscosity_lb_ft_s: OnceCell<f64>,
    cp_btu_lb_r: OnceCell<f64>,
    cv_btu_lb_r: OnceCell<f64>,
}

fn cached<E>(cell: &OnceCell<f64>, compute: impl FnOnce() -> Result<f64, E>) -> Result<f64, E> {
    if let Some(v) = cell.get() {
        return Ok(*v);
    }
    let v = compute()?;
    Ok(*cell.get_or_init(|| v))
}

/// 증기(또는 포화수) 상태.
///
/// 생성 후에는 상태가 바뀌지 않으며 내부 캐시만 채워진다. 캐시는 잠금이 없으므로
/// 여러 계산에서 동시에 쓰려면 상태를 따로 만들어야 한다.
///
/// 포화 증기(`Phase::Vapor`, 과열 아님)에서는 생성 시 받은 온도를 쓰지 않고
/// 압력에서 구한 포화 온도가 작업 온도가 된다.
#[derive(Debug, Clone)]
pub struct VaporState<O = If97Water> {
    temperature_f: Option<f64>,
    pressure_psia: f64,
    phase: Phase,
    superheated: bool,
    oracle: O,
    cache: PropertyCache,
}

impl VaporState<If97Water> {
    /// IF97 오라클을 쓰는 상태를 만든다.
    pub fn new(
        temperature_f: Option<f64>,
        pressure_psia: f64,
        phase: Phase,
        superheated: bool,
    ) -> Self {
        Self::with_oracle(temperature_f, pressure_psia, phase, superheated, If97Water)
    }
}

impl<O: PropertyOracle> VaporState<O> {
    /// 임의의 물성 오라클로 상태를 만든다. 액체 상에서는 과열 플래그를 무시한다.
    pub fn with_oracle(
        temperature_f: Option<f64>,
        pressure_psia: f64,
        phase: Phase,
        superheated: bool,
        oracle: O,
    ) -> Self {
        Self {
            temperature_f,
            pressure_psia,
            phase,
            superheated: superheated && phase == Phase::Vapor,
            oracle,
            cache: PropertyCache::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_superheated(&self) -> bool {
        self.superheated
    }

    pub fn pressure_psia(&self) -> f64 {
        self.pressure_psia
    }

    /// 생성 시 받은 온도 [°F]. 포화 증기에서는 계산에 쓰이지 않는다.
    pub fn supplied_temperature_f(&self) -> Option<f64> {
        self.temperature_f
    }

    fn is_saturated_vapor(&self) -> bool {
        self.phase == Phase::Vapor && !self.superheated
    }

    /// 계산에 쓰는 작업 온도 [°F].
    pub fn temperature_f(&self) -> Result<f64, PropertyLookupError> {
        if self.is_saturated_vapor() {
            return self.saturation_temperature();
        }
        self.temperature_f
            .ok_or(PropertyLookupError::MissingTemperature)
    }

    /// 작업 온도 [K].
    pub fn temperature_kelvin(&self) -> Result<f64, PropertyLookupError> {
        cached(&self.cache.temperature_k, || {
            if self.is_saturated_vapor() {
                return self.saturation_temperature_kelvin();
            }
            let t_f = self
                .temperature_f
                .ok_or(PropertyLookupError::MissingTemperature)?;
            Ok(convert_temperature(
                t_f,
                TemperatureUnit::Fahrenheit,
                TemperatureUnit::Kelvin,
            ))
        })
    }

    /// 압력 [Pa].
    pub fn pressure_pascal(&self) -> f64 {
        *self.cache.pressure_pa.get_or_init(|| {
            convert_pressure(self.pressure_psia, PressureUnit::Psi, PressureUnit::Pascal)
        })
    }

    fn saturation_temperature_kelvin(&self) -> Result<f64, PropertyLookupError> {
        if self.phase != Phase::Vapor {
            return Err(PropertyLookupError::NotVapor);
        }
        cached(&self.cache.saturation_temperature_k, || {
            self.oracle.props_si(
                Property::Temperature,
                StateInput::Pressure(self.pressure_pascal()),
                StateInput::Quality(1.0),
            )
        })
    }

    /// 압력에 대응하는 포화 온도 [°F]. 증기 상에서만 정의한다.
    pub fn saturation_temperature(&self) -> Result<f64, PropertyLookupError> {
        let t_k = self.saturation_temperature_kelvin()?;
        Ok(convert_temperature(
            t_k,
            TemperatureUnit::Kelvin,
            TemperatureUnit::Fahrenheit,
        ))
    }

    /// 과열도 [°F] = 작업 온도 - 포화 온도. 과열 증기가 아니면 `None`.
    ///
    /// 0 이하이면 과열로 표시됐지만 실제로는 포화 온도 이하인 상태이다.
    pub fn superheat_f(&self) -> Result<Option<f64>, PropertyLookupError> {
        if !self.superheated {
            return Ok(None);
        }
        Ok(Some(self.temperature_f()? - self.saturation_temperature()?))
    }

    /// 과열 증기는 (T, P), 포화 증기/포화수는 (P, 건도)로 조회한다.
    fn query_inputs(&self) -> Result<(StateInput, StateInput), PropertyLookupError> {
        let p = StateInput::Pressure(self.pressure_pascal());
        match (self.phase, self.superheated) {
            (Phase::Vapor, true) => Ok((StateInput::Temperature(self.temperature_kelvin()?), p)),
            (Phase::Vapor, false) => Ok((p, StateInput::Quality(1.0))),
            (Phase::Liquid, _) => Ok((p, StateInput::Quality(0.0))),
        }
    }

    fn lookup(
        &self,
        cell: &OnceCell<f64>,
        property: Property,
        to_us: impl FnOnce(f64) -> f64,
    ) -> Result<f64, PropertyLookupError> {
        cached(cell, || {
            let (first, second) = self.query_inputs()?;
            let si = self.oracle.props_si(property, first, second)?;
            let value = to_us(si);
            debug!(property = property.code(), si, value, "물성 캐시 저장");
            Ok(value)
        })
    }

    /// 밀도 [lb/ft³].
    pub fn density(&self) -> Result<f64, PropertyLookupError> {
        self.lookup(&self.cache.density_lb_ft3, Property::Density, |v| {
            convert_density(v, DensityUnit::KgPerCubicMeter, DensityUnit::PoundPerCubicFoot)
        })
    }

    /// 비엔탈피 [BTU/lb].
    pub fn enthalpy(&self) -> Result<f64, PropertyLookupError> {
        self.lookup(&self.cache.enthalpy_btu_lb, Property::Enthalpy, |v| {
            convert_specific_enthalpy(
                v,
                SpecificEnthalpyUnit::JPerKg,
                SpecificEnthalpyUnit::BtuPerPound,
            )
        })
    }

    /// 비엔트로피 [BTU/(lb·°R)].
    pub fn entropy(&self) -> Result<f64, PropertyLookupError> {
        self.lookup(&self.cache.entropy_btu_lb_r, Property::Entropy, btu_per_lb_r)
    }

    /// 점성계수 [lb/(ft·s)].
    pub fn viscosity(&self) -> Result<f64, PropertyLookupError> {
        self.lookup(&self.cache.viscosity_lb_ft_s, Property::Viscosity, |v| {
            convert_viscosity(
                v,
                ViscosityUnit::PascalSecond,
                ViscosityUnit::PoundPerFootSecond,
            )
        })
    }

    /// 정압비열 [BTU/(lb·°F)].
    pub fn cp(&self) -> Result<f64, PropertyLookupError> {
        self.lookup(&self.cache.cp_btu_lb_r, Property::Cp, btu_per_lb_r)
    }

    /// 정적비열 [BTU/(lb·°F)].
    pub fn cv(&self) -> Result<f64, PropertyLookupError> {
        self.lookup(&self.cache.cv_btu_lb_r, Property::Cv, btu_per_lb_r)
    }

    /// 입력 상태 요약을 만든다. 포화 증기면 포화 온도가 들어간다.
    pub fn report(&self) -> Result<VaporStateReport, PropertyLookupError> {
        Ok(VaporStateReport {
            temp_f: self.temperature_f()?,
            press_psia: self.pressure_psia,
            phase: self.phase,
            superheat: self.superheated,
        })
    }
}

fn btu_per_lb_r(v: f64) -> f64 {
    convert_specific_entropy(
        v,
        SpecificEntropyUnit::JPerKgK,
        SpecificEntropyUnit::BtuPerPoundRankine,
    )
}

/// 상태 입력 요약.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VaporStateReport {
    pub temp_f: f64,
    pub press_psia: f64,
    pub phase: Phase,
    pub superheat: bool,
}

impl fmt::Display for VaporStateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let superheat = match (self.phase, self.superheat) {
            (Phase::Liquid, _) => "N/A",
            (Phase::Vapor, true) => "Yes",
            (Phase::Vapor, false) => "No",
        };
        writeln!(f, "온도: {:.2} °F", self.temp_f)?;
        writeln!(f, "압력: {:.2} psia", self.press_psia)?;
        writeln!(f, "상: {}", self.phase)?;
        write!(f, "과열: {superheat}")
    }
}
