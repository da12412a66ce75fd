//! 단위 정의 및 변환 모듈 모음.
//!
//! 입력/보고서는 미국 관용 단위(°F, psia, in, lb), 유량 계산은 SI 단위로 처리하므로
//! 두 체계 사이의 환산 계수를 한곳에 모아 둔다.

pub mod density;
pub mod length;
pub mod mass_flow;
pub mod pressure;
pub mod specific_enthalpy;
pub mod specific_entropy;
pub mod temperature;
pub mod viscosity;

pub use density::{convert_density, DensityUnit};
pub use length::{convert_length, LengthUnit};
pub use mass_flow::{convert_mass_flow, MassFlowUnit};
pub use pressure::{convert_pressure, PressureUnit};
pub use specific_enthalpy::{convert_specific_enthalpy, SpecificEnthalpyUnit};
pub use specific_entropy::{convert_specific_entropy, SpecificEntropyUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
pub use viscosity::{convert_viscosity, ViscosityUnit};
