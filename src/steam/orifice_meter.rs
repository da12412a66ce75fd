//! 차압식 유량계(ISO 5167-2 오리피스) 질량유량 계산.
//!
//! 유출계수는 Reader-Harris/Gallagher 식, 팽창계수는 ISO 5167-2:2003 식을 쓴다.
//! 유출계수가 레이놀즈수(= 유량)에 의존하므로 유량은 반복 계산으로 구한다.
//! 모든 입력/출력은 SI 단위이다.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const MAX_ITERATIONS: usize = 100;
const REL_TOLERANCE: f64 = 1e-13;
const INITIAL_DISCHARGE_COEFFICIENT: f64 = 0.6;
/// 소구경 보정이 들어가는 배관 내경 기준 [m] (71.12 mm)
const SMALL_PIPE_LIMIT_M: f64 = 0.071_12;
const INCH_M: f64 = 0.0254;
/// ISO 5167-2 지름비 상한. 이보다 크면 팽창계수 식이 차압에 대해 단조롭지 않다.
const MAX_BETA: f64 = 0.75;

/// 유량 계산 실패를 표현한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowSolverError {
    /// 하류 압력이 상류 압력 이상
    #[error("하류 압력({downstream_pa} Pa)이 상류 압력({upstream_pa} Pa) 이상입니다")]
    NoPressureDrop { upstream_pa: f64, downstream_pa: f64 },
    /// 배관/오리피스 형상 오류
    #[error("형상 오류: {0}")]
    InvalidGeometry(&'static str),
    /// 유체 물성 또는 압력 입력 오류
    #[error("입력 오류: {0}")]
    InvalidInput(&'static str),
    /// 팽창계수가 물리적으로 불가능한 값
    #[error("팽창계수가 0 이하입니다 (ε={0})")]
    NonPositiveExpansibility(f64),
    /// 유출계수 반복 계산 실패
    #[error("유량 반복 계산이 {iterations}회 안에 수렴하지 않았습니다")]
    NotConverged { iterations: usize },
}

/// 유량계 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterType {
    /// ISO 5167-2 오리피스 판
    Iso5167Orifice,
}

/// 차압 탭 위치.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapStyle {
    /// 코너 탭
    Corner,
    /// 플랜지 탭 (판 앞뒤 25.4 mm)
    Flange,
    /// D 및 D/2 탭 (상류 1D, 하류 0.5D)
    DAndDOver2,
}

impl TapStyle {
    /// (L1, L2') = 탭 거리 / 배관 내경
    fn tapping_ratios(self, pipe_diameter_m: f64) -> (f64, f64) {
        match self {
            TapStyle::Corner => (0.0, 0.0),
            TapStyle::Flange => {
                let l = INCH_M / pipe_diameter_m;
                (l, l)
            }
            TapStyle::DAndDOver2 => (1.0, 0.47),
        }
    }
}

/// 유량계 계산 입력값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterInput {
    /// 배관 내경 [m]
    pub pipe_diameter_m: f64,
    /// 오리피스 지름 [m]
    pub orifice_diameter_m: f64,
    /// 상류 절대압 [Pa]
    pub upstream_pressure_pa: f64,
    /// 하류 절대압 [Pa]
    pub downstream_pressure_pa: f64,
    /// 상류 밀도 [kg/m³]
    pub density_kg_m3: f64,
    /// 상류 점성계수 [Pa·s]
    pub viscosity_pa_s: f64,
    /// 등엔트로피 지수
    pub isentropic_exponent: f64,
    pub meter_type: MeterType,
    pub taps: TapStyle,
}

/// 유량계 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterSolution {
    /// 질량유량 [kg/s]
    pub mass_flow_kg_s: f64,
    pub discharge_coefficient: f64,
    pub expansibility: f64,
    /// 배관 기준 레이놀즈수
    pub reynolds_number: f64,
    /// 임계 압력비 이하라서 임계 압력비로 계산했는지 여부
    pub choked: bool,
    pub iterations: usize,
}

/// 임계 압력비 (2/(k+1))^(k/(k-1)).
pub fn critical_pressure_ratio(k: f64) -> f64 {
    (2.0 / (k + 1.0)).powf(k / (k - 1.0))
}

/// ISO 5167-2:2003 오리피스 팽창계수.
pub fn orifice_expansibility(beta: f64, pressure_ratio: f64, k: f64) -> f64 {
    let beta4 = beta.powi(4);
    1.0 - (0.351 + 0.256 * beta4 + 0.93 * beta4 * beta4) * (1.0 - pressure_ratio.powf(1.0 / k))
}

/// Reader-Harris/Gallagher 유출계수.
pub fn reader_harris_gallagher(
    pipe_diameter_m: f64,
    beta: f64,
    reynolds_number: f64,
    taps: TapStyle,
) -> f64 {
    let (l1, l2) = taps.tapping_ratios(pipe_diameter_m);
    let beta2 = beta * beta;
    let beta4 = beta2 * beta2;
    let beta8 = beta4 * beta4;
    let a = (19_000.0 * beta / reynolds_number).powf(0.8);
    let m2 = 2.0 * l2 / (1.0 - beta);

    let mut c = 0.5961 + 0.0261 * beta2 - 0.216 * beta8
        + 0.000_521 * (1.0e6 * beta / reynolds_number).powf(0.7)
        + (0.0188 + 0.0063 * a) * beta.powf(3.5) * (1.0e6 / reynolds_number).powf(0.3)
        + (0.043 + 0.080 * (-10.0 * l1).exp() - 0.123 * (-7.0 * l1).exp())
            * (1.0 - 0.11 * a)
            * beta4
            / (1.0 - beta4)
        - 0.031 * (m2 - 0.8 * m2.powf(1.1)) * beta.powf(1.3);
    if pipe_diameter_m < SMALL_PIPE_LIMIT_M {
        c += 0.011 * (0.75 - beta) * (2.8 - pipe_diameter_m / INCH_M);
    }
    c
}

fn discharge_coefficient(input: &MeterInput, beta: f64, reynolds_number: f64) -> f64 {
    match input.meter_type {
        MeterType::Iso5167Orifice => {
            reader_harris_gallagher(input.pipe_diameter_m, beta, reynolds_number, input.taps)
        }
    }
}

fn validate(input: &MeterInput) -> Result<(), FlowSolverError> {
    let d = input.pipe_diameter_m;
    let d2 = input.orifice_diameter_m;
    if !(d.is_finite() && d > 0.0 && d2.is_finite() && d2 > 0.0) {
        return Err(FlowSolverError::InvalidGeometry(
            "배관 내경과 오리피스 지름은 0보다 커야 합니다.",
        ));
    }
    if d2 / d > MAX_BETA {
        return Err(FlowSolverError::InvalidGeometry(
            "지름비(β)가 ISO 5167-2 상한 0.75를 넘습니다.",
        ));
    }
    let p1 = input.upstream_pressure_pa;
    let p2 = input.downstream_pressure_pa;
    if !(p1.is_finite() && p1 > 0.0 && p2.is_finite() && p2 >= 0.0) {
        return Err(FlowSolverError::InvalidInput(
            "압력은 유한한 절대압이어야 합니다.",
        ));
    }
    if p2 >= p1 {
        return Err(FlowSolverError::NoPressureDrop {
            upstream_pa: p1,
            downstream_pa: p2,
        });
    }
    if !(input.density_kg_m3.is_finite() && input.density_kg_m3 > 0.0) {
        return Err(FlowSolverError::InvalidInput("밀도는 0보다 커야 합니다."));
    }
    if !(input.viscosity_pa_s.is_finite() && input.viscosity_pa_s > 0.0) {
        return Err(FlowSolverError::InvalidInput("점성계수는 0보다 커야 합니다."));
    }
    if !(input.isentropic_exponent.is_finite() && input.isentropic_exponent > 1.0) {
        return Err(FlowSolverError::InvalidInput(
            "등엔트로피 지수는 1보다 커야 합니다.",
        ));
    }
    Ok(())
}

/// 차압식 유량계의 질량유량을 계산한다.
///
/// 하류/상류 압력비가 임계 압력비보다 작으면 임계 압력비에서 계산한다(초크 유동).
/// 따라서 차압이 커질 때 유량이 줄어드는 일은 없다.
pub fn differential_pressure_meter_solver(
    input: &MeterInput,
) -> Result<MeterSolution, FlowSolverError> {
    validate(input)?;

    let d = input.pipe_diameter_m;
    let d2 = input.orifice_diameter_m;
    let k = input.isentropic_exponent;
    let p1 = input.upstream_pressure_pa;
    let beta = d2 / d;

    let r_crit = critical_pressure_ratio(k);
    let ratio = input.downstream_pressure_pa / p1;
    let choked = ratio < r_crit;
    let ratio = if choked { r_crit } else { ratio };
    if choked {
        debug!(ratio = input.downstream_pressure_pa / p1, r_crit, "임계 압력비로 계산");
    }

    let expansibility = orifice_expansibility(beta, ratio, k);
    if expansibility <= 0.0 || !expansibility.is_finite() {
        return Err(FlowSolverError::NonPositiveExpansibility(expansibility));
    }

    // m = C · flow_factor
    let dp = p1 * (1.0 - ratio);
    let area = PI / 4.0 * d2 * d2;
    let flow_factor = area / (1.0 - beta.powi(4)).sqrt()
        * expansibility
        * (2.0 * input.density_kg_m3 * dp).sqrt();

    let mut c = INITIAL_DISCHARGE_COEFFICIENT;
    for iteration in 1..=MAX_ITERATIONS {
        let m = c * flow_factor;
        let reynolds = 4.0 * m / (PI * d * input.viscosity_pa_s);
        let c_next = discharge_coefficient(input, beta, reynolds);
        if !c_next.is_finite() || c_next <= 0.0 {
            break;
        }
        let converged = (c_next - c).abs() <= REL_TOLERANCE * c_next;
        c = c_next;
        if converged {
            let mass_flow_kg_s = c * flow_factor;
            debug!(
                iteration,
                beta,
                discharge_coefficient = c,
                expansibility,
                mass_flow_kg_s,
                "오리피스 유량 수렴"
            );
            return Ok(MeterSolution {
                mass_flow_kg_s,
                discharge_coefficient: c,
                expansibility,
                reynolds_number: 4.0 * mass_flow_kg_s / (PI * d * input.viscosity_pa_s),
                choked,
                iterations: iteration,
            });
        }
    }
    Err(FlowSolverError::NotConverged {
        iterations: MAX_ITERATIONS,
    })
}
