use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "steam_leak.toml";

/// 연간 비용/배출량 계산에 쓰는 경제·환경 상수.
///
/// 계산 한 번 동안 바뀌지 않으며, 시나리오마다 다른 값을 쓰려면 계산기마다 따로 넘긴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicConstants {
    /// 연료 단가 [$/MMBTU]
    pub fuel_cost: f64,
    /// 용수 단가 [$/1000 lb]
    pub water_cost: f64,
    /// 보일러 효율 (0~1]
    pub boiler_efficiency: f64,
    /// 보일러 급수 엔탈피 [BTU/lb]
    pub feedwater_enthalpy: f64,
    /// 연료 가스 진발열량 [BTU/ft³]
    pub net_heating_value: f64,
    /// 연료 탄소 함량 [kg C / kg 연료]
    pub fuel_carbon_content: f64,
    /// 연료 분자량 [kg/kmol]
    pub fuel_molar_mass: f64,
    /// 몰 부피 환산 계수 [scf/kmol]
    pub molar_volume_conversion: f64,
}

impl Default for EconomicConstants {
    fn default() -> Self {
        Self {
            fuel_cost: 6.0,
            water_cost: 1.17,
            boiler_efficiency: 0.8,
            feedwater_enthalpy: 38.1179,
            net_heating_value: 900.0,
            fuel_carbon_content: 0.85,
            fuel_molar_mass: 16.04,
            molar_volume_conversion: 849.5,
        }
    }
}

impl EconomicConstants {
    /// 상수 범위를 검사한다. 단가는 0을 허용하고 나머지는 양수여야 한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("fuel_cost", self.fuel_cost)?;
        non_negative("water_cost", self.water_cost)?;
        positive("boiler_efficiency", self.boiler_efficiency)?;
        if self.boiler_efficiency > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "boiler_efficiency",
                value: self.boiler_efficiency,
            });
        }
        positive("feedwater_enthalpy", self.feedwater_enthalpy)?;
        positive("net_heating_value", self.net_heating_value)?;
        positive("fuel_carbon_content", self.fuel_carbon_content)?;
        positive("fuel_molar_mass", self.fuel_molar_mass)?;
        positive("molar_volume_conversion", self.molar_volume_conversion)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 누설 이력 파일 경로
    pub register_path: PathBuf,
    pub economics: EconomicConstants,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            register_path: PathBuf::from("leak_register.toml"),
            economics: EconomicConstants::default(),
        }
    }
}

/// 설정 로드/저장/검증 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류 (필수 상수 누락 포함)
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 양수여야 하는 상수가 0 이하
    #[error("{field} 값은 0보다 커야 합니다 (현재 {value})")]
    NonPositive { field: &'static str, value: f64 },
    /// 허용 범위를 벗어난 상수
    #[error("{field} 값이 허용 범위를 벗어났습니다 (현재 {value})")]
    OutOfRange { field: &'static str, value: f64 },
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.economics.validate()?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 TOML 파일로 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
