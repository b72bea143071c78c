// ==========================================
// 회계 수불 증감 분석 - 파이프라인 E2E 테스트
// ==========================================
// 파싱 → 마스터 → 조인 → 증감 → 집계 전 구간을
// 업로드 파일 수준에서 검증한다
// ==========================================
// 모든 기간 파일은 데이터 행 1개 이상이어야 하므로 (헤더 2행 + 데이터)
// 검증 대상이 아닌 기간에는 금액 0 의 자리 행을 넣는다.
// 부재(absence)를 검증하는 기간에는 무관한 코드(Z999)를 쓴다.
// ==========================================


use std::collections::HashMap;
use std::path::PathBuf;

use inventory_variance::api::{AnalysisApi, AnalysisRequest, ApiError, PeriodOutcome};
use inventory_variance::config::{ConfigError, ReportConfig};
use inventory_variance::domain::report::AnalysisReport;
use inventory_variance::domain::types::{ItemCategory, PeriodRole, VarianceView};

use test_helpers::{full_request, ledger_row, write_ledger_csv, write_raw_csv};

/// 금액이 전부 0 인 자리 행
fn zeros(category: &str, code: &str, name: &str, unit: &str) -> String {
    ledger_row(category, code, name, unit, 0.0, 0.0, 0.0)
}

/// 검증 대상 품목과 무관한 자리 행 (부재 검증용 기간에 사용)
fn unrelated_filler() -> String {
    zeros("상품", "Z999", "자리행", "EA")
}

fn run_full(
    current_month: &[String],
    prior_month: &[String],
    current_ytd: &[String],
    prior_ytd: &[String],
    prior_year_end: &[String],
) -> AnalysisReport {
    let (_files, request) = full_request(
        2026,
        1,
        current_month,
        prior_month,
        current_ytd,
        prior_ytd,
        prior_year_end,
    );
    AnalysisApi::new().run(&request).expect("분석 실패").report
}

fn record_of<'a>(
    report: &'a AnalysisReport,
    code: &str,
) -> &'a inventory_variance::ComparisonRecord {
    report
        .records
        .iter()
        .find(|r| r.item_code == code)
        .unwrap_or_else(|| panic!("품목 {} 없음", code))
}

// ==========================================
// 재고 증감 기본 시나리오
// ==========================================

#[test]
fn test_inventory_variance_current_vs_prior_year_end() {
    // 당월말 1200, 전기말 1000 → 증감 200
    let filler = zeros("제품", "A001", "완제품A", "EA");
    let report = run_full(
        &[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 1200.0)],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
        &[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 1000.0)],
    );

    let rec = record_of(&report, "A001");
    assert_eq!(rec.current_month_end_inventory, 1200.0);
    assert_eq!(rec.prior_year_end_inventory, 1000.0);
    assert_eq!(rec.inventory_variance, 200.0);
}

#[test]
fn test_missing_prior_year_zero_fills_not_null() {
    // 전기말 테이블에 A001 부재 → 전기말 재고 정확히 0, 증감 1200
    let filler = zeros("제품", "A001", "완제품A", "EA");
    let report = run_full(
        &[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 1200.0)],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
        &[unrelated_filler()],
    );

    let rec = record_of(&report, "A001");
    assert_eq!(rec.prior_year_end_inventory, 0.0);
    assert_eq!(rec.inventory_variance, 1200.0);
}

#[test]
fn test_zero_fill_applies_to_every_metric_of_missing_period() {
    // 전월/전기동기 파일에 없는 품목은 해당 기간 지표가 전부 0 (null/NaN 아님)
    let report = run_full(
        &[ledger_row("제품", "A001", "완제품A", "EA", 50.0, 70.0, 1200.0)],
        &[unrelated_filler()],
        &[ledger_row("제품", "A001", "완제품A", "EA", 150.0, 170.0, 0.0)],
        &[unrelated_filler()],
        &[unrelated_filler()],
    );

    let rec = record_of(&report, "A001");
    assert_eq!(rec.prior_month_production, 0.0);
    assert_eq!(rec.prior_month_sales, 0.0);
    assert_eq!(rec.prior_ytd_production, 0.0);
    assert_eq!(rec.prior_ytd_sales, 0.0);
    // MoM/YoY 는 0 과의 차이
    assert_eq!(rec.sales_mom_variance, 70.0);
    assert_eq!(rec.sales_yoy_variance, 170.0);
    assert_eq!(rec.production_yoy_variance, 150.0);
}

#[test]
fn test_item_only_in_prior_period_still_appears() {
    // 행 집합은 품목 마스터(합집합)가 결정한다
    let filler = zeros("제품", "A001", "완제품A", "EA");
    let report = run_full(
        &[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 100.0)],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
        &[ledger_row("상품", "B001", "단종상품", "EA", 0.0, 0.0, 500.0)],
    );

    let rec = record_of(&report, "B001");
    assert_eq!(rec.category, ItemCategory::Merchandise);
    assert_eq!(rec.current_month_end_inventory, 0.0);
    assert_eq!(rec.prior_year_end_inventory, 500.0);
    assert_eq!(rec.inventory_variance, -500.0);
}

// ==========================================
// 계정 라벨 정규화
// ==========================================

#[test]
fn test_oem_rows_merge_into_product_totals() {
    let filler = zeros("제품", "A002", "자사품", "EA");
    let report = run_full(
        &[
            ledger_row("제품(OEM)", "A001", "OEM품", "EA", 0.0, 0.0, 300.0),
            ledger_row("제품", "A002", "자사품", "EA", 0.0, 0.0, 700.0),
        ],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
    );

    // 요약에서 '제품' 한 행으로 합산된다
    let product_row = report
        .summary
        .rows
        .iter()
        .find(|r| r.category == Some(ItemCategory::Product))
        .expect("제품 요약 행 없음");
    assert_eq!(product_row.item_count, 2);
    assert_eq!(product_row.current_month_end_inventory, 1000.0);
}

// ==========================================
// 집계 정확성
// ==========================================

#[test]
fn test_category_total_and_grand_total() {
    // 원재료 3건 100/200/300 → 계정 합 600, 전체 합계 = 계정 행들의 합
    let filler = zeros("제품", "A001", "완제품A", "EA");
    let report = run_full(
        &[
            ledger_row("원재료", "R001", "원료1", "KG", 0.0, 0.0, 100.0),
            ledger_row("원재료", "R002", "원료2", "KG", 0.0, 0.0, 200.0),
            ledger_row("원재료", "R003", "원료3", "KG", 0.0, 0.0, 300.0),
            ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 50.0),
        ],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
    );

    let raw_row = report
        .summary
        .rows
        .iter()
        .find(|r| r.category == Some(ItemCategory::RawMaterial))
        .expect("원재료 요약 행 없음");
    assert_eq!(raw_row.current_month_end_inventory, 600.0);

    let sum_of_rows: f64 = report
        .summary
        .rows
        .iter()
        .map(|r| r.current_month_end_inventory)
        .sum();
    assert_eq!(report.summary.total.current_month_end_inventory, sum_of_rows);
    assert_eq!(report.summary.total.current_month_end_inventory, 650.0);
    assert_eq!(report.summary.total.label, "합계");
}

#[test]
fn test_summary_rows_equal_per_record_sums_exactly() {
    // 반올림 편차 없는 왕복 불변식: 모든 수치 지표에 대해
    // sum(records[category==C].metric) == summary[C].metric
    let report = run_full(
        &[
            ledger_row("제품", "A001", "완제품A", "EA", 11.5, 22.25, 33.125),
            ledger_row("제품", "A002", "완제품B", "EA", 44.5, 55.75, 66.5),
            ledger_row("원재료", "R001", "원료1", "KG", 7.25, 8.5, 9.75),
        ],
        &[ledger_row("제품", "A001", "완제품A", "EA", 1.5, 2.5, 0.0)],
        &[ledger_row("제품", "A002", "완제품B", "EA", 3.25, 4.75, 0.0)],
        &[ledger_row("원재료", "R001", "원료1", "KG", 5.5, 6.25, 0.0)],
        &[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 12.375)],
    );

    for summary_row in &report.summary.rows {
        let category = summary_row.category.expect("계정 행");
        let records: Vec<_> = report
            .records
            .iter()
            .filter(|r| r.category == category)
            .collect();

        let sum = |f: fn(&inventory_variance::ComparisonRecord) -> f64| -> f64 {
            records.iter().map(|r| f(r)).sum()
        };

        assert_eq!(summary_row.current_month_production, sum(|r| r.current_month_production));
        assert_eq!(summary_row.current_month_sales, sum(|r| r.current_month_sales));
        assert_eq!(
            summary_row.current_month_end_inventory,
            sum(|r| r.current_month_end_inventory)
        );
        assert_eq!(summary_row.prior_month_production, sum(|r| r.prior_month_production));
        assert_eq!(summary_row.prior_month_sales, sum(|r| r.prior_month_sales));
        assert_eq!(summary_row.current_ytd_production, sum(|r| r.current_ytd_production));
        assert_eq!(summary_row.current_ytd_sales, sum(|r| r.current_ytd_sales));
        assert_eq!(summary_row.prior_ytd_production, sum(|r| r.prior_ytd_production));
        assert_eq!(summary_row.prior_ytd_sales, sum(|r| r.prior_ytd_sales));
        assert_eq!(
            summary_row.prior_year_end_inventory,
            sum(|r| r.prior_year_end_inventory)
        );
        assert_eq!(summary_row.inventory_variance, sum(|r| r.inventory_variance));
        assert_eq!(summary_row.sales_yoy_variance, sum(|r| r.sales_yoy_variance));
        assert_eq!(summary_row.sales_mom_variance, sum(|r| r.sales_mom_variance));
        assert_eq!(summary_row.production_yoy_variance, sum(|r| r.production_yoy_variance));
        assert_eq!(summary_row.production_mom_variance, sum(|r| r.production_mom_variance));
    }
}

#[test]
fn test_headline_matches_record_sums() {
    let filler = zeros("제품", "A001", "완제품A", "EA");
    let report = run_full(
        &[
            ledger_row("제품", "A001", "완제품A", "EA", 10.0, 20.0, 1200.0),
            ledger_row("원재료", "R001", "원료1", "KG", 30.0, 40.0, 800.0),
        ],
        &[filler.clone()],
        &[
            ledger_row("제품", "A001", "완제품A", "EA", 100.0, 200.0, 0.0),
            ledger_row("원재료", "R001", "원료1", "KG", 300.0, 400.0, 0.0),
        ],
        &[filler.clone()],
        &[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 1500.0)],
    );

    assert_eq!(report.headline.item_count, 2);
    assert_eq!(report.headline.current_month_inventory_total, 2000.0);
    assert_eq!(report.headline.prior_year_end_inventory_total, 1500.0);
    assert_eq!(report.headline.inventory_delta, 500.0);
    assert_eq!(report.headline.current_ytd_sales_total, 600.0);
    assert_eq!(report.headline.current_ytd_production_total, 400.0);
}

// ==========================================
// 뷰 정책
// ==========================================

#[test]
fn test_view_policy_is_enforced_by_api() {
    let filler = zeros("원재료", "R001", "원료1", "KG");
    let report = run_full(
        &[
            ledger_row("반제품", "S001", "반제품S", "EA", 10.0, 0.0, 100.0),
            ledger_row("원재료", "R001", "원료1", "KG", 20.0, 0.0, 200.0),
            ledger_row("제품", "A001", "완제품A", "EA", 0.0, 30.0, 300.0),
        ],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
    );
    let api = AnalysisApi::new();

    // 반제품: 매출원가 뷰 없음
    assert!(matches!(
        api.detail(&report, ItemCategory::SemiFinished, VarianceView::Sales),
        Err(ApiError::ViewNotApplicable { .. })
    ));
    // 제품: 제조원가 뷰 없음
    assert!(matches!(
        api.detail(&report, ItemCategory::Product, VarianceView::Production),
        Err(ApiError::ViewNotApplicable { .. })
    ));
    // 원재료: 세 뷰 전부 제공
    for view in VarianceView::ALL {
        assert!(api.detail(&report, ItemCategory::RawMaterial, view).is_ok());
    }
    // 기말재고 뷰는 전 계정 제공
    assert!(api
        .detail(&report, ItemCategory::SemiFinished, VarianceView::EndingInventory)
        .is_ok());
}

#[test]
fn test_summary_views_filter_categories() {
    let filler = zeros("원재료", "R001", "원료1", "KG");
    let report = run_full(
        &[
            ledger_row("반제품", "S001", "반제품S", "EA", 0.0, 10.0, 100.0),
            ledger_row("원재료", "R001", "원료1", "KG", 20.0, 0.0, 200.0),
            ledger_row("제품", "A001", "완제품A", "EA", 0.0, 30.0, 300.0),
        ],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
    );
    let api = AnalysisApi::new();

    let sales = api.summary_view(&report, VarianceView::Sales);
    assert!(sales.rows.iter().all(|r| r.label != "반제품"));

    let production = api.summary_view(&report, VarianceView::Production);
    assert_eq!(production.rows.len(), 1);
    assert_eq!(production.rows[0].label, "원재료");

    let inventory = api.summary_view(&report, VarianceView::EndingInventory);
    assert_eq!(inventory.rows.len(), 3);
    // 뷰 합계는 포함 계정 행들의 합
    let row_sum: f64 = inventory.rows.iter().map(|r| r.current).sum();
    assert_eq!(inventory.total.current, row_sum);
}

#[test]
fn test_detail_view_hides_idle_items_and_appends_total() {
    let filler = zeros("원재료", "R001", "원료1", "KG");
    let report = run_full(
        &[
            ledger_row("원재료", "R001", "원료1", "KG", 0.0, 0.0, 100.0),
            ledger_row("원재료", "R002", "원료2", "KG", 0.0, 0.0, 300.0),
            // 재고 관련 지표 전부 0 → 기말재고 상세에서 숨김
            ledger_row("원재료", "R003", "무거래", "KG", 5.0, 0.0, 0.0),
        ],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
    );
    let api = AnalysisApi::new();

    let view = api
        .detail(&report, ItemCategory::RawMaterial, VarianceView::EndingInventory)
        .unwrap();

    let codes: Vec<&str> = view.rows.iter().map(|r| r.item_code.as_str()).collect();
    // 증감 내림차순 정렬 (R002 300 > R001 100), R003 숨김
    assert_eq!(codes, vec!["R002", "R001"]);
    // 합계 행: [전기말, 당월말, 증감]
    assert_eq!(view.total, vec![0.0, 400.0, 400.0]);
}

// ==========================================
// 부분 실패 / 구성 오류
// ==========================================

#[test]
fn test_one_malformed_file_reports_partial_statuses() {
    let good = write_ledger_csv(&[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 100.0)]);
    // 지표 컬럼이 없는 비정상 양식 (헤더 재구성 후 생산출고_금액 부재)
    let bad = write_raw_csv(&[
        "품목계정그룹,품목코드,품목명,단위",
        ",,,",
        "제품,A002,이상양식,EA",
    ]);

    let mut files: HashMap<PeriodRole, PathBuf> = HashMap::new();
    for role in PeriodRole::ALL {
        files.insert(role, good.path().to_path_buf());
    }
    files.insert(PeriodRole::PriorMonth, bad.path().to_path_buf());

    let request = AnalysisRequest {
        config: ReportConfig::new(2026, 1),
        files,
    };

    match AnalysisApi::new().run(&request) {
        Err(ApiError::PeriodLoadFailure { total, failed, periods }) => {
            assert_eq!(total, 5);
            assert_eq!(failed, 1);
            // 실패한 기간 외 나머지는 독립적으로 적재 성공
            for status in &periods {
                if status.role == PeriodRole::PriorMonth {
                    assert!(matches!(status.outcome, PeriodOutcome::Failed { .. }));
                } else {
                    assert!(status.outcome.is_loaded());
                }
            }
        }
        other => panic!(
            "PeriodLoadFailure 기대, 실제: {:?}",
            other.err().map(|e| e.to_string())
        ),
    }
}

#[test]
fn test_missing_role_mapping_blocks_analysis() {
    let good = write_ledger_csv(&[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 100.0)]);

    let mut files: HashMap<PeriodRole, PathBuf> = HashMap::new();
    for role in PeriodRole::ALL {
        files.insert(role, good.path().to_path_buf());
    }
    files.remove(&PeriodRole::PriorYtd);

    let request = AnalysisRequest {
        config: ReportConfig::new(2026, 1),
        files,
    };

    match AnalysisApi::new().run(&request) {
        Err(ApiError::Config(ConfigError::MissingPeriodRole { role })) => {
            assert_eq!(role, PeriodRole::PriorYtd);
        }
        _ => panic!("MissingPeriodRole 기대"),
    }
}

#[test]
fn test_invalid_month_is_config_error() {
    let good = write_ledger_csv(&[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 100.0)]);
    let mut files: HashMap<PeriodRole, PathBuf> = HashMap::new();
    for role in PeriodRole::ALL {
        files.insert(role, good.path().to_path_buf());
    }

    let request = AnalysisRequest {
        config: ReportConfig::new(2026, 13),
        files,
    };

    assert!(matches!(
        AnalysisApi::new().run(&request),
        Err(ApiError::Config(ConfigError::InvalidMonth { month: 13 }))
    ));
}

// ==========================================
// 품목 마스터
// ==========================================

#[test]
fn test_identity_conflicts_are_reported_first_wins() {
    let filler = zeros("제품", "A001", "완제품A", "EA");
    let report = run_full(
        &[ledger_row("제품", "A001", "완제품A", "EA", 0.0, 0.0, 100.0)],
        &[ledger_row("제품", "A001", "완제품A-구명", "BOX", 0.0, 0.0, 0.0)],
        &[filler.clone()],
        &[filler.clone()],
        &[filler.clone()],
    );

    // 최초 공급(당월) 메타데이터 유지
    let rec = record_of(&report, "A001");
    assert_eq!(rec.item_name, "완제품A");
    assert_eq!(rec.unit, "EA");

    // 불일치는 감사용으로 보고된다 (item_name, unit 각 1건)
    assert_eq!(report.identity_conflicts.len(), 2);
    let fields: Vec<&str> = report
        .identity_conflicts
        .iter()
        .map(|c| c.field.as_str())
        .collect();
    assert!(fields.contains(&"item_name"));
    assert!(fields.contains(&"unit"));
}
