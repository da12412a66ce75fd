use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::config::{self, Config, ConfigError, EconomicConstants, DEFAULT_CONFIG_PATH};
use crate::leak_register::{
    LeakRegister, LeakSite, LeakStatus, LeakSurvey, RecordFilter, RegisterError,
    RepairPrerequisites,
};
use crate::steam::{LeakCalcError, LeakCalculator, Phase, SteamLeakReport, VaporState};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 누설 계산 오류
    #[error("누설 계산 오류: {0}")]
    LeakCalc(#[from] LeakCalcError),
    /// 누설 이력 오류
    #[error("누설 이력 오류: {0}")]
    Register(#[from] RegisterError),
    /// JSON 출력 오류
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Parser)]
#[command(name = "steam_leak_manager")]
#[command(about = "증기 누설량과 연간 손실 비용 계산기", long_about = None)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 누설량과 연간 손실을 계산한다
    Calc {
        #[command(flatten)]
        leak: LeakArgs,
        /// 결과를 JSON으로 출력
        #[arg(long)]
        json: bool,
    },
    /// 계산 결과를 누설 이력에 등록한다
    Record {
        #[command(flatten)]
        leak: LeakArgs,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// 등록된 누설을 보수 완료로 표시한다
    Complete {
        /// 누설 ID
        leak_id: u32,
        /// 보수 완료일 (YYYY-MM-DD, 기본값 오늘)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// 누설 이력 목록을 출력한다
    List {
        /// 보수 상태로 거른다
        #[arg(long, value_enum)]
        status: Option<LeakStatus>,
        /// 구역으로 거른다
        #[arg(long)]
        area: Option<String>,
        /// 결과를 JSON으로 출력
        #[arg(long)]
        json: bool,
    },
    /// 누설 이력 대시보드를 출력한다
    Dashboard {
        /// 집계 연도 (기본값 올해)
        #[arg(long)]
        year: Option<i32>,
        /// 결과를 JSON으로 출력
        #[arg(long)]
        json: bool,
    },
    /// 메뉴 방식으로 실행한다
    Interactive,
}

/// 증기 상태와 누설 형상 입력.
#[derive(Debug, Clone, Args)]
pub struct LeakArgs {
    /// 증기 온도 [°F]. 포화 증기에서는 무시된다
    #[arg(long)]
    pub temperature: Option<f64>,
    /// 증기 압력 [psia]
    #[arg(long)]
    pub pressure: f64,
    #[arg(long, value_enum, default_value_t = Phase::Vapor)]
    pub phase: Phase,
    /// 과열 증기 여부
    #[arg(long)]
    pub superheated: bool,
    /// 배관 내경 [in]
    #[arg(long)]
    pub pipe_diameter: f64,
    /// 누설 구멍 지름 [in]
    #[arg(long)]
    pub orifice_diameter: f64,
    /// 상류 압력 [psi]
    #[arg(long)]
    pub upstream: f64,
    /// 하류 압력 [psi]
    #[arg(long, default_value_t = 14.7)]
    pub downstream: f64,
}

impl LeakArgs {
    pub fn calculator(&self, economics: EconomicConstants) -> Result<LeakCalculator, LeakCalcError> {
        let vapor = VaporState::new(self.temperature, self.pressure, self.phase, self.superheated);
        LeakCalculator::new(
            vapor,
            self.pipe_diameter,
            self.orifice_diameter,
            self.upstream,
            self.downstream,
            economics,
        )
    }

    pub fn compute(&self, economics: &EconomicConstants) -> Result<SteamLeakReport, LeakCalcError> {
        self.calculator(economics.clone())?.compute()
    }
}

/// 누설 이력 등록용 현장 정보.
#[derive(Debug, Clone, Args)]
pub struct SiteArgs {
    /// 현장 누설 번호(태그)
    #[arg(long)]
    pub leak_number: String,
    /// 구역
    #[arg(long)]
    pub area: String,
    /// 설비 단위
    #[arg(long)]
    pub unit: String,
    /// 세부 위치
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub comments: Option<String>,
    /// 비계 설치 필요
    #[arg(long)]
    pub scaffold: bool,
    /// 보온재 해체 필요
    #[arg(long)]
    pub insulation: bool,
    /// 계통 격리 필요
    #[arg(long)]
    pub isolation: bool,
    /// 정기 보수 때만 보수 가능
    #[arg(long)]
    pub turnaround: bool,
    /// 사전 통보 필요
    #[arg(long)]
    pub notification: bool,
    /// 안전 조치 필요
    #[arg(long)]
    pub safety: bool,
}

impl SiteArgs {
    pub fn into_survey(self, leak: &LeakArgs) -> LeakSurvey {
        LeakSurvey {
            leak_number: self.leak_number,
            site: LeakSite {
                area: self.area,
                unit: self.unit,
                location: self.location,
            },
            upstream_psi: leak.upstream,
            orifice_diameter_in: leak.orifice_diameter,
            comments: self.comments,
            prerequisites: RepairPrerequisites {
                scaffold: self.scaffold,
                insulation: self.insulation,
                isolation: self.isolation,
                turnaround: self.turnaround,
                notification: self.notification,
                safety: self.safety,
            },
        }
    }
}

/// 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    match cli.command {
        Commands::Calc { leak, json } => {
            let report = leak.compute(&cfg.economics)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                ui_cli::print_report(&report);
            }
        }
        Commands::Record { leak, site } => {
            let report = leak.compute(&cfg.economics)?;
            ui_cli::print_report(&report);
            let id = record_leak(&cfg, site.into_survey(&leak), &report)?;
            println!("누설 ID {id} 로 등록했습니다.");
        }
        Commands::Complete { leak_id, date } => {
            let date = date.unwrap_or_else(today);
            complete_leak(&cfg, leak_id, date)?;
            println!("누설 ID {leak_id} 보수 완료 ({date}).");
        }
        Commands::List { status, area, json } => {
            let register = LeakRegister::load(&cfg.register_path)?;
            let rows = register.list(&RecordFilter { status, area });
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                ui_cli::print_records(&rows);
            }
        }
        Commands::Dashboard { year, json } => {
            let register = LeakRegister::load(&cfg.register_path)?;
            let summary = register.dashboard(year.unwrap_or_else(|| today().year()));
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
        }
        Commands::Interactive => interactive(&mut cfg, &cli.config)?,
    }
    Ok(())
}

/// 메뉴 방식 메인 루프.
fn interactive(cfg: &mut Config, config_path: &Path) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu()? {
            MenuChoice::Calculate => {
                let leak = ui_cli::prompt_leak()?;
                match leak.compute(&cfg.economics) {
                    Ok(report) => ui_cli::print_report(&report),
                    Err(err) => println!("계산 실패: {err}"),
                }
            }
            MenuChoice::Record => {
                let leak = ui_cli::prompt_leak()?;
                let report = match leak.compute(&cfg.economics) {
                    Ok(report) => report,
                    Err(err) => {
                        println!("계산 실패: {err}");
                        continue;
                    }
                };
                ui_cli::print_report(&report);
                let survey = ui_cli::prompt_site(&leak)?;
                let id = record_leak(cfg, survey, &report)?;
                println!("누설 ID {id} 로 등록했습니다.");
            }
            MenuChoice::Complete => {
                let (leak_id, date) = ui_cli::prompt_completion(today())?;
                match complete_leak(cfg, leak_id, date) {
                    Ok(()) => println!("누설 ID {leak_id} 보수 완료 ({date})."),
                    Err(RegisterError::UnknownLeak(id)) => println!("누설 ID {id} 가 없습니다."),
                    Err(err) => return Err(err.into()),
                }
            }
            MenuChoice::List => {
                let filter = ui_cli::prompt_filter()?;
                let register = LeakRegister::load(&cfg.register_path)?;
                ui_cli::print_records(&register.list(&filter));
            }
            MenuChoice::Dashboard => {
                let year = ui_cli::prompt_year(today().year())?;
                let register = LeakRegister::load(&cfg.register_path)?;
                println!("{}", register.dashboard(year));
            }
            MenuChoice::Settings => {
                ui_cli::handle_settings(cfg)?;
                cfg.save(config_path)?;
            }
            MenuChoice::Exit => {
                cfg.save(config_path)?;
                println!("프로그램을 종료합니다.");
                break;
            }
        }
    }
    Ok(())
}

fn record_leak(
    cfg: &Config,
    survey: LeakSurvey,
    report: &SteamLeakReport,
) -> Result<u32, RegisterError> {
    let mut register = LeakRegister::load(&cfg.register_path)?;
    let id = register.register(survey, report);
    register.save(&cfg.register_path)?;
    info!(leak_id = id, path = %cfg.register_path.display(), "누설 이력 등록");
    Ok(id)
}

fn complete_leak(cfg: &Config, leak_id: u32, date: NaiveDate) -> Result<(), RegisterError> {
    let mut register = LeakRegister::load(&cfg.register_path)?;
    register.mark_complete(leak_id, date)?;
    register.save(&cfg.register_path)?;
    info!(leak_id, %date, "누설 보수 완료");
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
