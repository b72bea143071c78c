// ==========================================
// 회계 수불 증감 분석 - 계정×뷰 상세 표 생성
// ==========================================
// 역할: 선택 계정의 품목 상세 표 구성 (표시 계층에 그대로 전달)
// 규칙: 관련 지표가 전부 0 인 품목은 숨기고, 대표 증감 내림차순
//       정렬 후 합계 행을 덧붙인다
// ==========================================

use crate::domain::report::{ComparisonRecord, DetailRow, DetailView};
use crate::domain::types::{ItemCategory, VarianceView};
use crate::engine::variance::sort_desc_by;

// ==========================================
// DetailViewBuilder
// ==========================================
// 뷰 제공 여부(계정 정책)는 호출측(API 계층)이 판정한다
pub struct DetailViewBuilder;

impl DetailViewBuilder {
    pub fn build(
        &self,
        records: &[ComparisonRecord],
        category: ItemCategory,
        view: VarianceView,
    ) -> DetailView {
        let mut selected: Vec<ComparisonRecord> = records
            .iter()
            .filter(|record| record.category == category)
            .filter(|record| has_activity(record, view))
            .cloned()
            .collect();

        sort_desc_by(&mut selected, lead_variance(view));

        let column_labels: Vec<String> = match view {
            VarianceView::EndingInventory => vec![
                "전기말_재고".to_string(),
                "당월말_재고".to_string(),
                "재고_증감".to_string(),
            ],
            VarianceView::Sales | VarianceView::Production => vec![
                "당기누적".to_string(),
                "전기누적".to_string(),
                "YoY 증감".to_string(),
                "당월".to_string(),
                "전월".to_string(),
                "MoM 증감".to_string(),
            ],
        };

        let rows: Vec<DetailRow> = selected
            .iter()
            .map(|record| DetailRow {
                item_code: record.item_code.clone(),
                item_name: record.item_name.clone(),
                values: row_values(record, view),
            })
            .collect();

        let mut total = vec![0.0; column_labels.len()];
        for row in &rows {
            for (slot, value) in total.iter_mut().zip(&row.values) {
                *slot += value;
            }
        }

        DetailView {
            category,
            view,
            column_labels,
            rows,
            total,
        }
    }
}

/// 뷰의 정렬 기준이 되는 대표 증감
fn lead_variance(view: VarianceView) -> fn(&ComparisonRecord) -> f64 {
    match view {
        VarianceView::EndingInventory => |r| r.inventory_variance,
        VarianceView::Sales => |r| r.sales_yoy_variance,
        VarianceView::Production => |r| r.production_yoy_variance,
    }
}

/// 뷰 관련 지표가 하나라도 0 이 아닌 품목만 표에 남긴다
fn has_activity(record: &ComparisonRecord, view: VarianceView) -> bool {
    match view {
        VarianceView::EndingInventory => {
            record.prior_year_end_inventory != 0.0 || record.current_month_end_inventory != 0.0
        }
        VarianceView::Sales => {
            record.current_ytd_sales != 0.0
                || record.prior_ytd_sales != 0.0
                || record.current_month_sales != 0.0
        }
        VarianceView::Production => {
            record.current_ytd_production != 0.0
                || record.prior_ytd_production != 0.0
                || record.current_month_production != 0.0
        }
    }
}

fn row_values(record: &ComparisonRecord, view: VarianceView) -> Vec<f64> {
    match view {
        VarianceView::EndingInventory => vec![
            record.prior_year_end_inventory,
            record.current_month_end_inventory,
            record.inventory_variance,
        ],
        VarianceView::Sales => vec![
            record.current_ytd_sales,
            record.prior_ytd_sales,
            record.sales_yoy_variance,
            record.current_month_sales,
            record.prior_month_sales,
            record.sales_mom_variance,
        ],
        VarianceView::Production => vec![
            record.current_ytd_production,
            record.prior_ytd_production,
            record.production_yoy_variance,
            record.current_month_production,
            record.prior_month_production,
            record.production_mom_variance,
        ],
    }
}
