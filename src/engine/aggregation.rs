// ==========================================
// 회계 수불 증감 분석 - 계정별 집계 엔진
// ==========================================
// 역할: 품목 행을 계정그룹별로 합산, 고정 표시 순서, 합계 행 생성
// 정책: 입력에 없는 계정은 0 채움 행을 만들지 않는다
// ==========================================

use std::collections::HashMap;

use crate::domain::report::{
    CategorySummary, CategorySummaryRow, ComparisonRecord, HeadlineMetrics, SummaryView,
    SummaryViewRow,
};
use crate::domain::types::{ItemCategory, VarianceView};

/// 합계 행 라벨
pub const TOTAL_LABEL: &str = "합계";

// ==========================================
// AggregationReporter
// ==========================================
pub struct AggregationReporter;

impl AggregationReporter {
    /// 계정그룹별 합산 요약을 만든다
    ///
    /// # 반환
    /// - rows: 입력에 존재하는 계정만, DISPLAY_ORDER 순서
    /// - total: 전 계정 합산 행 (라벨 '합계') - 추가 집계에서 제외할 수 있도록
    ///   계정 필드가 None 으로 구분된다
    pub fn summarize(&self, records: &[ComparisonRecord]) -> CategorySummary {
        let mut by_category: HashMap<ItemCategory, CategorySummaryRow> = HashMap::new();
        let mut total = CategorySummaryRow::new(TOTAL_LABEL, None);

        for record in records {
            by_category
                .entry(record.category)
                .or_insert_with(|| {
                    CategorySummaryRow::new(record.category.label(), Some(record.category))
                })
                .accumulate(record);
            total.accumulate(record);
        }

        let rows = ItemCategory::DISPLAY_ORDER
            .iter()
            .filter_map(|category| by_category.remove(category))
            .collect();

        CategorySummary { rows, total }
    }

    /// 뷰별 요약 투영: 뷰 정책이 포함하는 계정만 담는다
    ///
    /// 합계 행도 포함 계정만으로 재합산한다 (전체 합계와 다를 수 있음)
    pub fn summary_view(&self, summary: &CategorySummary, view: VarianceView) -> SummaryView {
        let project = |row: &CategorySummaryRow| -> SummaryViewRow {
            let (current, prior, variance) = match view {
                VarianceView::EndingInventory => (
                    row.current_month_end_inventory,
                    row.prior_year_end_inventory,
                    row.inventory_variance,
                ),
                VarianceView::Sales => {
                    (row.current_ytd_sales, row.prior_ytd_sales, row.sales_yoy_variance)
                }
                VarianceView::Production => (
                    row.current_ytd_production,
                    row.prior_ytd_production,
                    row.production_yoy_variance,
                ),
            };
            SummaryViewRow {
                label: row.label.clone(),
                current,
                prior,
                variance,
            }
        };

        let rows: Vec<SummaryViewRow> = summary
            .rows
            .iter()
            .filter(|row| row.category.map(|c| c.supports(view)).unwrap_or(false))
            .map(project)
            .collect();

        let mut total = SummaryViewRow {
            label: TOTAL_LABEL.to_string(),
            ..SummaryViewRow::default()
        };
        for row in &rows {
            total.current += row.current;
            total.prior += row.prior;
            total.variance += row.variance;
        }

        SummaryView {
            view,
            column_labels: view_column_labels(view),
            rows,
            total,
        }
    }

    /// 상단 지표 카드용 전사 합계
    pub fn headline(&self, records: &[ComparisonRecord]) -> HeadlineMetrics {
        let mut metrics = HeadlineMetrics {
            item_count: records.len(),
            ..HeadlineMetrics::default()
        };

        for record in records {
            metrics.current_month_inventory_total += record.current_month_end_inventory;
            metrics.prior_year_end_inventory_total += record.prior_year_end_inventory;
            metrics.current_ytd_sales_total += record.current_ytd_sales;
            metrics.prior_ytd_sales_total += record.prior_ytd_sales;
            metrics.current_ytd_production_total += record.current_ytd_production;
            metrics.prior_ytd_production_total += record.prior_ytd_production;
        }

        metrics.inventory_delta =
            metrics.current_month_inventory_total - metrics.prior_year_end_inventory_total;
        metrics.sales_delta = metrics.current_ytd_sales_total - metrics.prior_ytd_sales_total;
        metrics.production_delta =
            metrics.current_ytd_production_total - metrics.prior_ytd_production_total;

        metrics
    }
}

fn view_column_labels(view: VarianceView) -> [String; 3] {
    let labels = match view {
        VarianceView::EndingInventory => ["당월말_재고", "전기말_재고", "재고_증감"],
        VarianceView::Sales | VarianceView::Production => ["당기누적", "전기동기", "YoY 증감"],
    };
    labels.map(String::from)
}
