//! IAPWS-IF97 물성 계산을 seuif97 크레이트로 위임한 물성 오라클.
//! 입력: 상태 변수 두 개(온도[K], 압력[Pa], 건도 중 두 가지)
//! 출력: 요청한 물성 하나(SI 단위)

use seuif97::{pt, px, OCP, OCV, OD, ODV, OH, OS, OT};
use thiserror::Error;
use tracing::debug;

// IF97 적용 범위
const P_TRIPLE_PA: f64 = 611.657;
const P_CRIT_PA: f64 = 22.064e6;
const P_MAX_PA: f64 = 100.0e6;
const P_MAX_HIGH_T_PA: f64 = 50.0e6;
const T_MIN_K: f64 = 273.15;
const T_MAX_K: f64 = 1073.15;
const T_MAX_HIGH_T_K: f64 = 2273.15;

/// 물성 조회 실패를 표현한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyLookupError {
    /// 오라클이 지원하지 않는 상태 변수 조합
    #[error("지원하지 않는 상태 변수 조합: {first}/{second}")]
    UnsupportedInputs {
        first: &'static str,
        second: &'static str,
    },
    /// IF97 적용 범위 밖의 상태
    #[error("IF97 유효 범위를 벗어남: {what} = {value}")]
    OutOfRange { what: &'static str, value: f64 },
    /// 계산 결과가 유한한 물리값이 아님
    #[error("IF97 계산 실패: {property} ({first}={first_value}, {second}={second_value})")]
    Backend {
        property: &'static str,
        first: &'static str,
        first_value: f64,
        second: &'static str,
        second_value: f64,
    },
    /// 과열 증기/액체 상태인데 온도가 주어지지 않음
    #[error("온도가 지정되지 않은 상태입니다")]
    MissingTemperature,
    /// 포화 온도는 증기 상태에서만 정의한다
    #[error("포화 온도는 증기 상태에서만 계산할 수 있습니다")]
    NotVapor,
}

/// 오라클에 요청하는 물성. 반환값은 항상 SI 단위이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// 온도 [K]
    Temperature,
    /// 밀도 [kg/m³]
    Density,
    /// 비엔탈피 [J/kg]
    Enthalpy,
    /// 비엔트로피 [J/(kg·K)]
    Entropy,
    /// 점성계수 [Pa·s]
    Viscosity,
    /// 정압비열 [J/(kg·K)]
    Cp,
    /// 정적비열 [J/(kg·K)]
    Cv,
}

impl Property {
    /// 물성 코드(T, D, H, S, V, C, O).
    pub fn code(self) -> &'static str {
        match self {
            Property::Temperature => "T",
            Property::Density => "D",
            Property::Enthalpy => "H",
            Property::Entropy => "S",
            Property::Viscosity => "V",
            Property::Cp => "C",
            Property::Cv => "O",
        }
    }

    fn if97_id(self) -> i32 {
        match self {
            Property::Temperature => OT,
            Property::Density => OD,
            Property::Enthalpy => OH,
            Property::Entropy => OS,
            Property::Viscosity => ODV,
            Property::Cp => OCP,
            Property::Cv => OCV,
        }
    }

    /// seuif97 출력 단위를 SI 기준으로 맞춘다.
    fn from_if97(self, value: f64) -> f64 {
        match self {
            // °C
            Property::Temperature => value + 273.15,
            // kJ/kg, kJ/(kg·K)
            Property::Enthalpy | Property::Entropy | Property::Cp | Property::Cv => value * 1000.0,
            Property::Density | Property::Viscosity => value,
        }
    }

    fn must_be_positive(self) -> bool {
        !matches!(self, Property::Enthalpy | Property::Entropy)
    }
}

/// 오라클에 넘기는 상태 변수(이름 + 값).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    /// 온도 [K]
    Temperature(f64),
    /// 압력 [Pa]
    Pressure(f64),
    /// 건도 (0=포화수, 1=포화증기)
    Quality(f64),
}

impl StateInput {
    pub fn name(&self) -> &'static str {
        match self {
            StateInput::Temperature(_) => "T",
            StateInput::Pressure(_) => "P",
            StateInput::Quality(_) => "Q",
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            StateInput::Temperature(v) | StateInput::Pressure(v) | StateInput::Quality(v) => v,
        }
    }
}

/// 두 개의 상태 변수로 물성 하나를 돌려주는 외부 물성 계산기.
///
/// 구현체는 상태가 없어야 하며, 같은 입력에는 항상 같은 값을 돌려준다.
pub trait PropertyOracle {
    /// `output` 물성을 SI 단위로 계산한다.
    fn props_si(
        &self,
        output: Property,
        first: StateInput,
        second: StateInput,
    ) -> Result<f64, PropertyLookupError>;
}

impl<T: PropertyOracle + ?Sized> PropertyOracle for &T {
    fn props_si(
        &self,
        output: Property,
        first: StateInput,
        second: StateInput,
    ) -> Result<f64, PropertyLookupError> {
        (**self).props_si(output, first, second)
    }
}

/// IF97 물(증기) 오라클.
#[derive(Debug, Clone, Copy, Default)]
pub struct If97Water;

impl PropertyOracle for If97Water {
    fn props_si(
        &self,
        output: Property,
        first: StateInput,
        second: StateInput,
    ) -> Result<f64, PropertyLookupError> {
        let raw = match (first, second) {
            (StateInput::Temperature(t_k), StateInput::Pressure(p_pa))
            | (StateInput::Pressure(p_pa), StateInput::Temperature(t_k)) => {
                check_pt_range(p_pa, t_k)?;
                pt(p_pa / 1.0e6, t_k - 273.15, output.if97_id())
            }
            (StateInput::Pressure(p_pa), StateInput::Quality(x))
            | (StateInput::Quality(x), StateInput::Pressure(p_pa)) => {
                check_px_range(p_pa, x)?;
                px(p_pa / 1.0e6, x, output.if97_id())
            }
            _ => {
                return Err(PropertyLookupError::UnsupportedInputs {
                    first: first.name(),
                    second: second.name(),
                })
            }
        };

        let value = output.from_if97(raw);
        debug!(
            property = output.code(),
            first = first.name(),
            first_value = first.value(),
            second = second.name(),
            second_value = second.value(),
            value,
            "IF97 물성 조회"
        );
        if !value.is_finite() || (output.must_be_positive() && value <= 0.0) {
            return Err(PropertyLookupError::Backend {
                property: output.code(),
                first: first.name(),
                first_value: first.value(),
                second: second.name(),
                second_value: second.value(),
            });
        }
        Ok(value)
    }
}

fn check_pt_range(p_pa: f64, t_k: f64) -> Result<(), PropertyLookupError> {
    if !(p_pa > 0.0 && p_pa <= P_MAX_PA) {
        return Err(PropertyLookupError::OutOfRange {
            what: "pressure_pa",
            value: p_pa,
        });
    }
    let t_max = if p_pa <= P_MAX_HIGH_T_PA {
        T_MAX_HIGH_T_K
    } else {
        T_MAX_K
    };
    if !(T_MIN_K..=t_max).contains(&t_k) {
        return Err(PropertyLookupError::OutOfRange {
            what: "temperature_k",
            value: t_k,
        });
    }
    Ok(())
}

fn check_px_range(p_pa: f64, x: f64) -> Result<(), PropertyLookupError> {
    // 포화선은 삼중점~임계점 사이에서만 존재한다.
    if !(P_TRIPLE_PA..P_CRIT_PA).contains(&p_pa) {
        return Err(PropertyLookupError::OutOfRange {
            what: "saturation_pressure_pa",
            value: p_pa,
        });
    }
    if !(0.0..=1.0).contains(&x) {
        return Err(PropertyLookupError::OutOfRange {
            what: "quality",
            value: x,
        });
    }
    Ok(())
}
