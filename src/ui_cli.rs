use std::io::{self, Write};

use chrono::NaiveDate;

use crate::app::{AppError, LeakArgs};
use crate::config::{Config, EconomicConstants};
use crate::leak_register::{
    LeakRecord, LeakSite, LeakStatus, LeakSurvey, RecordFilter, RepairPrerequisites,
};
use crate::steam::{Phase, SteamLeakReport};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    Record,
    Complete,
    List,
    Dashboard,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== Steam Leak Manager ===");
    println!("1) 누설량 계산");
    println!("2) 누설 계산 후 이력 등록");
    println!("3) 누설 보수 완료 처리");
    println!("4) 누설 이력 목록");
    println!("5) 대시보드");
    println!("6) 경제·환경 상수 설정");
    println!("0) 종료");
    loop {
        let sel = read_line("메뉴 선택: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::Record),
            "3" => return Ok(MenuChoice::Complete),
            "4" => return Ok(MenuChoice::List),
            "5" => return Ok(MenuChoice::Dashboard),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

/// 증기 상태와 누설 형상을 입력받는다.
pub fn prompt_leak() -> Result<LeakArgs, AppError> {
    println!("\n-- 증기 상태 --");
    let phase = read_phase()?;
    let superheated = phase == Phase::Vapor && read_yes_no("과열 증기입니까? (y/n): ")?;
    let temperature = if phase == Phase::Vapor && !superheated {
        println!("포화 증기는 압력에서 구한 포화 온도를 씁니다.");
        None
    } else {
        Some(read_f64("증기 온도 [°F]: ")?)
    };
    let pressure = read_f64("증기 압력 [psia]: ")?;

    println!("\n-- 누설 형상 --");
    let pipe_diameter = read_f64("배관 내경 [in]: ")?;
    let orifice_diameter = read_f64("누설 구멍 지름 [in]: ")?;
    let upstream = read_f64("상류 압력 [psi]: ")?;
    let downstream = read_f64_or("하류 압력 [psi] (엔터=14.7): ", 14.7)?;
    Ok(LeakArgs {
        temperature,
        pressure,
        phase,
        superheated,
        pipe_diameter,
        orifice_diameter,
        upstream,
        downstream,
    })
}

/// 이력 등록에 필요한 현장 정보를 입력받는다.
pub fn prompt_site(leak: &LeakArgs) -> Result<LeakSurvey, AppError> {
    println!("\n-- 현장 정보 --");
    let leak_number = read_line("누설 번호: ")?.trim().to_string();
    let area = read_line("구역: ")?.trim().to_string();
    let unit = read_line("설비 단위: ")?.trim().to_string();
    let location = read_line("세부 위치: ")?.trim().to_string();
    let comments = read_line("비고 (없으면 엔터): ")?.trim().to_string();
    println!("보수 선행 작업");
    let prerequisites = RepairPrerequisites {
        scaffold: read_yes_no("  비계 설치 (y/n): ")?,
        insulation: read_yes_no("  보온재 해체 (y/n): ")?,
        isolation: read_yes_no("  계통 격리 (y/n): ")?,
        turnaround: read_yes_no("  정기 보수 때만 가능 (y/n): ")?,
        notification: read_yes_no("  사전 통보 (y/n): ")?,
        safety: read_yes_no("  안전 조치 (y/n): ")?,
    };
    Ok(LeakSurvey {
        leak_number,
        site: LeakSite {
            area,
            unit,
            location,
        },
        upstream_psi: leak.upstream,
        orifice_diameter_in: leak.orifice_diameter,
        comments: (!comments.is_empty()).then_some(comments),
        prerequisites,
    })
}

/// 목록 조회 조건을 입력받는다.
pub fn prompt_filter() -> Result<RecordFilter, AppError> {
    println!("상태: 1=보수 대기 2=보수 완료 엔터=전체");
    let status = match read_line("선택: ")?.trim() {
        "1" => Some(LeakStatus::Pending),
        "2" => Some(LeakStatus::Complete),
        _ => None,
    };
    let area = read_line("구역 (엔터=전체): ")?.trim().to_string();
    Ok(RecordFilter {
        status,
        area: (!area.is_empty()).then_some(area),
    })
}

/// 보수 완료 처리할 누설 ID와 완료일을 입력받는다.
pub fn prompt_completion(today: NaiveDate) -> Result<(u32, NaiveDate), AppError> {
    let leak_id = loop {
        match read_line("누설 ID: ")?.trim().parse::<u32>() {
            Ok(id) => break id,
            Err(_) => println!("정수 ID를 입력하세요."),
        }
    };
    let date = loop {
        let s = read_line(&format!("완료일 YYYY-MM-DD (엔터={today}): "))?;
        if s.trim().is_empty() {
            break today;
        }
        match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            Ok(d) => break d,
            Err(_) => println!("날짜 형식이 올바르지 않습니다."),
        }
    };
    Ok((leak_id, date))
}

/// 대시보드 집계 연도를 입력받는다.
pub fn prompt_year(current: i32) -> Result<i32, AppError> {
    loop {
        let s = read_line(&format!("집계 연도 (엔터={current}): "))?;
        if s.trim().is_empty() {
            return Ok(current);
        }
        match s.trim().parse::<i32>() {
            Ok(y) => return Ok(y),
            Err(_) => println!("연도를 숫자로 입력하세요."),
        }
    }
}

/// 경제·환경 상수 메뉴를 처리한다. 검증에 실패하면 이전 값을 유지한다.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- 경제·환경 상수 (엔터=현재 값 유지) --");
    let current = cfg.economics.clone();
    let edited = EconomicConstants {
        fuel_cost: read_f64_or(
            &format!("연료 단가 [$/MMBTU] ({}): ", current.fuel_cost),
            current.fuel_cost,
        )?,
        water_cost: read_f64_or(
            &format!("용수 단가 [$/1000 lb] ({}): ", current.water_cost),
            current.water_cost,
        )?,
        boiler_efficiency: read_f64_or(
            &format!("보일러 효율 ({}): ", current.boiler_efficiency),
            current.boiler_efficiency,
        )?,
        feedwater_enthalpy: read_f64_or(
            &format!("급수 엔탈피 [BTU/lb] ({}): ", current.feedwater_enthalpy),
            current.feedwater_enthalpy,
        )?,
        net_heating_value: read_f64_or(
            &format!("진발열량 [BTU/ft³] ({}): ", current.net_heating_value),
            current.net_heating_value,
        )?,
        fuel_carbon_content: read_f64_or(
            &format!("탄소 함량 ({}): ", current.fuel_carbon_content),
            current.fuel_carbon_content,
        )?,
        fuel_molar_mass: read_f64_or(
            &format!("연료 분자량 [kg/kmol] ({}): ", current.fuel_molar_mass),
            current.fuel_molar_mass,
        )?,
        molar_volume_conversion: read_f64_or(
            &format!("몰 부피 환산 [scf/kmol] ({}): ", current.molar_volume_conversion),
            current.molar_volume_conversion,
        )?,
    };
    match edited.validate() {
        Ok(()) => {
            cfg.economics = edited;
            println!("상수를 저장했습니다.");
        }
        Err(err) => println!("{err}. 변경하지 않습니다."),
    }
    Ok(())
}

pub fn print_report(report: &SteamLeakReport) {
    println!("\n=== 증기 누설 계산 결과 ===");
    println!("{report}");
}

pub fn print_records(rows: &[&LeakRecord]) {
    if rows.is_empty() {
        println!("조건에 맞는 누설 이력이 없습니다.");
        return;
    }
    println!("\n=== 누설 이력 ({}건) ===", rows.len());
    for row in rows {
        println!("{row}");
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "입력이 끝났습니다",
        )));
    }
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_f64_or(prompt: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_yes_no(prompt: &str) -> Result<bool, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("y 또는 n을 입력하세요."),
        }
    }
}

fn read_phase() -> Result<Phase, AppError> {
    println!("상: 1=증기 2=포화수");
    let sel = read_line("선택: ")?;
    let phase = match sel.trim() {
        "2" => Phase::Liquid,
        _ => Phase::Vapor,
    };
    Ok(phase)
}
