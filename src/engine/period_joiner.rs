// ==========================================
// 회계 수불 증감 분석 - 기간 조인
// ==========================================
// 역할: 기간 역할별 지표를 품목 마스터에 좌측 조인
// 원칙: 행 집합은 품목 마스터가 결정한다 - 특정 기간에만
//       거래가 있는 품목도 반드시 결과에 포함
// ==========================================

use std::collections::HashMap;

use crate::domain::ledger::{columns, LedgerRecord, LedgerTable};
use crate::domain::report::ComparisonRecord;
use crate::domain::types::PeriodRole;
use crate::engine::item_master::ItemMaster;

// ==========================================
// PeriodJoiner
// ==========================================
pub struct PeriodJoiner;

impl PeriodJoiner {
    /// 품목 마스터에 각 기간 역할의 지표 컬럼을 붙인다
    ///
    /// # 결측 정책
    /// 품목이 해당 기간 테이블에 없으면 그 기간의 모든 지표는 0.0 이다.
    /// "거래 기록 없음"은 0 활동이지 결측이 아니다 - null 을 만들지 않는다.
    ///
    /// 증감 필드는 0 으로 초기화되며 VarianceEngine 이 채운다
    pub fn join(
        &self,
        master: &ItemMaster,
        tables: &HashMap<PeriodRole, LedgerTable>,
    ) -> Vec<ComparisonRecord> {
        // 기간별 품목코드 인덱스 (중복 코드는 최초 출현 우선)
        let indexes: HashMap<PeriodRole, HashMap<&str, &LedgerRecord>> = tables
            .iter()
            .map(|(role, table)| (*role, table.index_by_code()))
            .collect();

        let metric = |role: PeriodRole, code: &str, column: &str| -> f64 {
            indexes
                .get(&role)
                .and_then(|index| index.get(code))
                .map(|record| record.metric(column))
                .unwrap_or(0.0)
        };

        master
            .items
            .iter()
            .map(|item| {
                let code = item.item_code.as_str();
                ComparisonRecord {
                    item_code: item.item_code.clone(),
                    item_name: item.item_name.clone(),
                    unit: item.unit.clone(),
                    category: item.category,

                    current_month_production: metric(
                        PeriodRole::CurrentMonth,
                        code,
                        columns::PRODUCTION_ISSUE_AMOUNT,
                    ),
                    current_month_sales: metric(
                        PeriodRole::CurrentMonth,
                        code,
                        columns::SALES_ISSUE_AMOUNT,
                    ),
                    current_month_end_inventory: metric(
                        PeriodRole::CurrentMonth,
                        code,
                        columns::ENDING_INVENTORY_AMOUNT,
                    ),
                    prior_month_production: metric(
                        PeriodRole::PriorMonth,
                        code,
                        columns::PRODUCTION_ISSUE_AMOUNT,
                    ),
                    prior_month_sales: metric(
                        PeriodRole::PriorMonth,
                        code,
                        columns::SALES_ISSUE_AMOUNT,
                    ),
                    current_ytd_production: metric(
                        PeriodRole::CurrentYtd,
                        code,
                        columns::PRODUCTION_ISSUE_AMOUNT,
                    ),
                    current_ytd_sales: metric(
                        PeriodRole::CurrentYtd,
                        code,
                        columns::SALES_ISSUE_AMOUNT,
                    ),
                    prior_ytd_production: metric(
                        PeriodRole::PriorYtd,
                        code,
                        columns::PRODUCTION_ISSUE_AMOUNT,
                    ),
                    prior_ytd_sales: metric(
                        PeriodRole::PriorYtd,
                        code,
                        columns::SALES_ISSUE_AMOUNT,
                    ),
                    prior_year_end_inventory: metric(
                        PeriodRole::PriorYearEnd,
                        code,
                        columns::ENDING_INVENTORY_AMOUNT,
                    ),

                    inventory_variance: 0.0,
                    sales_yoy_variance: 0.0,
                    sales_mom_variance: 0.0,
                    production_yoy_variance: 0.0,
                    production_mom_variance: 0.0,
                }
            })
            .collect()
    }
}
