// 경량 CLI: 기간 파일 5개로 분석을 1회 실행하고 JSON 보고서를 출력한다.
//
// Usage:
//   inventory-variance <년도> <월> <당월> <전월> <당기누적> <전기동기> <전기말>
//
// 표시 계층(웹/데스크톱)의 자리를 대신하는 최소 협력자이며
// 서식/차트는 여기서 다루지 않는다.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use inventory_variance::api::{AnalysisApi, AnalysisRequest};
use inventory_variance::config::ReportConfig;
use inventory_variance::domain::types::PeriodRole;
use inventory_variance::logging;

fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", inventory_variance::APP_NAME, inventory_variance::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 7 {
        eprintln!(
            "사용법: inventory-variance <년도> <월> <당월> <전월> <당기누적> <전기동기> <전기말>"
        );
        return ExitCode::FAILURE;
    }

    let fiscal_year: i32 = match args[0].parse() {
        Ok(year) => year,
        Err(_) => {
            eprintln!("년도가 올바르지 않습니다: {}", args[0]);
            return ExitCode::FAILURE;
        }
    };
    let month: u32 = match args[1].parse() {
        Ok(month) => month,
        Err(_) => {
            eprintln!("월이 올바르지 않습니다: {}", args[1]);
            return ExitCode::FAILURE;
        }
    };

    let mut files: HashMap<PeriodRole, PathBuf> = HashMap::new();
    for (role, path) in PeriodRole::ALL.iter().zip(&args[2..]) {
        files.insert(*role, PathBuf::from(path));
    }

    let request = AnalysisRequest {
        config: ReportConfig::new(fiscal_year, month),
        files,
    };

    match AnalysisApi::new().run(&request) {
        Ok(response) => {
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{}", json),
                Err(error) => {
                    eprintln!("보고서 직렬화 실패: {}", error);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("분석 실패: {}", error);
            ExitCode::FAILURE
        }
    }
}
