//! 누설 이력 대장과 대시보드 집계.
//!
//! 계산 결과를 이력 행([`LeakRecord`])으로 바꿔 TOML 파일에 보관하고, 완료/대기 상태별
//! 손실 합계를 낸다. 열 의미는 $/yr, lb/h, ton/yr 이다.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::steam::SteamLeakReport;

/// 누설 이력 처리 오류.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("누설 대장 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("누설 대장 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("등록되지 않은 누설 ID: {0}")]
    UnknownLeak(u32),
}

/// 누설 보수 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum LeakStatus {
    /// 보수 대기
    Pending,
    /// 보수 완료
    Complete,
}

impl fmt::Display for LeakStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeakStatus::Pending => write!(f, "Pending"),
            LeakStatus::Complete => write!(f, "Complete"),
        }
    }
}

/// 누설 위치 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakSite {
    pub area: String,
    pub unit: String,
    pub location: String,
}

/// 보수 착수 전에 갖춰야 하는 선행 작업.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairPrerequisites {
    /// 비계 설치
    pub scaffold: bool,
    /// 보온재 해체
    pub insulation: bool,
    /// 계통 격리
    pub isolation: bool,
    /// 정기 보수(T/A) 때만 가능
    pub turnaround: bool,
    /// 사전 통보
    pub notification: bool,
    /// 안전 조치
    pub safety: bool,
}

impl RepairPrerequisites {
    fn labels(&self) -> Vec<&'static str> {
        [
            (self.scaffold, "비계"),
            (self.insulation, "보온"),
            (self.isolation, "격리"),
            (self.turnaround, "T/A"),
            (self.notification, "통보"),
            (self.safety, "안전"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

/// 누설 이력 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakRecord {
    pub leak_id: u32,
    pub leak_number: String,
    pub status: LeakStatus,
    #[serde(flatten)]
    pub site: LeakSite,
    /// 설계 증기 압력 [psia]
    pub steam_pressure_design: f64,
    /// 비용 산정 기준 상류 압력 [psi]
    pub steam_pressure_pricing: f64,
    /// 누설 구멍 지름 [in]
    pub size: f64,
    /// 연간 손실 [$/yr]
    pub loss_per_year: f64,
    /// 증기 손실량 [lb/h]
    pub steam_waste: f64,
    /// 연료 가스 손실 [ft³/yr]
    pub fuel_waste: f64,
    /// CO₂ 배출량 [ton/yr]
    pub co2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default)]
    pub scaffold: bool,
    #[serde(default)]
    pub insulation: bool,
    #[serde(default)]
    pub isolation: bool,
    #[serde(default)]
    pub turnaround: bool,
    #[serde(default)]
    pub notification: bool,
    #[serde(default)]
    pub safety: bool,
}

/// 계산 결과를 이력 행으로 바꿀 때 필요한 현장 입력.
#[derive(Debug, Clone)]
pub struct LeakSurvey {
    pub leak_number: String,
    pub site: LeakSite,
    pub upstream_psi: f64,
    pub orifice_diameter_in: f64,
    pub comments: Option<String>,
    pub prerequisites: RepairPrerequisites,
}

impl LeakRecord {
    /// 계산 결과로 보수 대기 상태의 이력 행을 만든다.
    pub fn from_report(leak_id: u32, survey: LeakSurvey, report: &SteamLeakReport) -> Self {
        let pre = survey.prerequisites;
        Self {
            leak_id,
            leak_number: survey.leak_number,
            status: LeakStatus::Pending,
            site: survey.site,
            steam_pressure_design: report.press_psia,
            steam_pressure_pricing: survey.upstream_psi,
            size: survey.orifice_diameter_in,
            loss_per_year: report.accumulated_cost,
            steam_waste: report.rate,
            fuel_waste: report.gas_waste,
            co2: report.co2_emissions,
            date_completed: None,
            comments: survey.comments,
            scaffold: pre.scaffold,
            insulation: pre.insulation,
            isolation: pre.isolation,
            turnaround: pre.turnaround,
            notification: pre.notification,
            safety: pre.safety,
        }
    }

    pub fn prerequisites(&self) -> RepairPrerequisites {
        RepairPrerequisites {
            scaffold: self.scaffold,
            insulation: self.insulation,
            isolation: self.isolation,
            turnaround: self.turnaround,
            notification: self.notification,
            safety: self.safety,
        }
    }

    fn completed_in(&self, year: i32) -> bool {
        self.date_completed.is_some_and(|d| d.year() == year)
    }
}

impl fmt::Display for LeakRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [{}] {}/{}/{} | {:.3} in | {:.2} lb/h | ${:.2}/yr",
            self.leak_id,
            self.leak_number,
            self.status,
            self.site.area,
            self.site.unit,
            self.site.location,
            self.size,
            self.steam_waste,
            self.loss_per_year,
        )?;
        if let Some(date) = self.date_completed {
            write!(f, " | 완료 {date}")?;
        }
        let labels = self.prerequisites().labels();
        if !labels.is_empty() {
            write!(f, " | 선행: {}", labels.join(","))?;
        }
        if let Some(comments) = &self.comments {
            write!(f, " | {comments}")?;
        }
        Ok(())
    }
}

/// 목록 조회 조건. 비어 있는 조건은 모든 행에 맞는다.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub status: Option<LeakStatus>,
    /// 구역 이름 (대소문자 무시)
    pub area: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &LeakRecord) -> bool {
        self.status.map_or(true, |s| record.status == s)
            && self
                .area
                .as_deref()
                .map_or(true, |a| record.site.area.eq_ignore_ascii_case(a))
    }
}

/// 누설 이력 대장.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeakRegister {
    #[serde(default)]
    records: Vec<LeakRecord>,
}

impl LeakRegister {
    /// 파일에서 대장을 읽는다. 파일이 없으면 빈 대장을 돌려준다.
    pub fn load(path: &Path) -> Result<Self, RegisterError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), RegisterError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn records(&self) -> &[LeakRecord] {
        &self.records
    }

    /// 조건에 맞는 이력을 ID 순으로 돌려준다.
    pub fn list(&self, filter: &RecordFilter) -> Vec<&LeakRecord> {
        let mut rows: Vec<&LeakRecord> = self.records.iter().filter(|r| filter.matches(r)).collect();
        rows.sort_by_key(|r| r.leak_id);
        rows
    }

    /// 다음에 쓸 누설 ID.
    pub fn next_id(&self) -> u32 {
        self.records.iter().map(|r| r.leak_id).max().map_or(1, |id| id + 1)
    }

    /// 계산 결과를 새 이력으로 등록하고 부여한 ID를 돌려준다.
    pub fn register(&mut self, survey: LeakSurvey, report: &SteamLeakReport) -> u32 {
        let id = self.next_id();
        self.records.push(LeakRecord::from_report(id, survey, report));
        id
    }

    /// 누설을 보수 완료로 표시한다.
    pub fn mark_complete(&mut self, leak_id: u32, date: NaiveDate) -> Result<(), RegisterError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.leak_id == leak_id)
            .ok_or(RegisterError::UnknownLeak(leak_id))?;
        record.status = LeakStatus::Complete;
        record.date_completed = Some(date);
        Ok(())
    }

    fn with_status(&self, status: LeakStatus) -> impl Iterator<Item = &LeakRecord> {
        self.records.iter().filter(move |r| r.status == status)
    }

    /// 해당 연도에 완료일이 있는 누설의 구역별 연간 손실 합계 [$/yr].
    pub fn loss_by_area(&self, year: i32) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.completed_in(year)) {
            *totals.entry(record.site.area.clone()).or_insert(0.0) += record.loss_per_year;
        }
        totals
    }

    /// 보수 완료된 누설의 증기 손실량 합계 [lb/h].
    pub fn completed_steam_waste(&self) -> f64 {
        self.with_status(LeakStatus::Complete)
            .map(|r| r.steam_waste)
            .sum()
    }

    /// 보수 완료된 누설 건수.
    pub fn completed_count(&self) -> usize {
        self.with_status(LeakStatus::Complete).count()
    }

    /// 해당 연도에 보수 완료해 절감한 연간 손실 합계 [$/yr].
    pub fn ytd_savings(&self, year: i32) -> f64 {
        self.with_status(LeakStatus::Complete)
            .filter(|r| r.completed_in(year))
            .map(|r| r.loss_per_year)
            .sum()
    }

    /// 보수 대기 중인 누설의 연간 손실 합계 [$/yr].
    pub fn future_opportunity(&self) -> f64 {
        self.with_status(LeakStatus::Pending)
            .map(|r| r.loss_per_year)
            .sum()
    }

    /// 대시보드 집계를 한 번에 계산한다.
    pub fn dashboard(&self, year: i32) -> DashboardSummary {
        DashboardSummary {
            year,
            completed_count: self.completed_count(),
            completed_steam_waste: self.completed_steam_waste(),
            ytd_savings: self.ytd_savings(year),
            future_opportunity: self.future_opportunity(),
            loss_by_area: self.loss_by_area(year),
        }
    }
}

/// 대시보드 집계 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub year: i32,
    pub completed_count: usize,
    /// [lb/h]
    pub completed_steam_waste: f64,
    /// [$/yr]
    pub ytd_savings: f64,
    /// [$/yr]
    pub future_opportunity: f64,
    pub loss_by_area: BTreeMap<String, f64>,
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} 누설 대시보드 ===", self.year)?;
        writeln!(f, "보수 완료 건수: {}", self.completed_count)?;
        writeln!(f, "보수 완료 증기량: {:.2} lb/h", self.completed_steam_waste)?;
        writeln!(f, "올해 절감액: ${:.2}", self.ytd_savings)?;
        write!(f, "대기 중 절감 가능액: ${:.2}", self.future_opportunity)?;
        for (area, loss) in &self.loss_by_area {
            write!(f, "\n  {area}: ${loss:.2}")?;
        }
        Ok(())
    }
}
