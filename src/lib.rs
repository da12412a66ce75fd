//! 증기 누설 계산 로직을 라이브러리로 분리하여 CLI 외의 도구에서도 재사용한다.

pub mod app;
pub mod config;
pub mod leak_register;
pub mod steam;
pub mod ui_cli;
pub mod units;
