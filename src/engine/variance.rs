// ==========================================
// 회계 수불 증감 분석 - 증감 계산 엔진
// ==========================================
// 역할: 조인 완료된 기간 지표로부터 파생 증감 컬럼 계산
// 원칙: 단순 차이만 계산한다 - 반올림/통화 서식은 표시 계층 소관,
//       음수 재고 등 비정상 값도 판정하지 않고 그대로 전달
// ==========================================

use crate::domain::report::ComparisonRecord;

// ==========================================
// VarianceEngine
// ==========================================
pub struct VarianceEngine;

impl VarianceEngine {
    /// 파생 증감 필드를 채운다
    ///
    /// # 계산식
    /// - 재고 증감   = 당월말 재고 - 전기말 재고
    /// - 판매 YoY    = 당기누적 판매출고 - 전기동기 판매출고
    /// - 판매 MoM    = 당월 판매출고 - 전월 판매출고
    /// - 생산 YoY    = 당기누적 생산출고 - 전기동기 생산출고
    /// - 생산 MoM    = 당월 생산출고 - 전월 생산출고
    pub fn compute(&self, records: &mut [ComparisonRecord]) {
        for record in records.iter_mut() {
            record.inventory_variance =
                record.current_month_end_inventory - record.prior_year_end_inventory;
            record.sales_yoy_variance = record.current_ytd_sales - record.prior_ytd_sales;
            record.sales_mom_variance = record.current_month_sales - record.prior_month_sales;
            record.production_yoy_variance =
                record.current_ytd_production - record.prior_ytd_production;
            record.production_mom_variance =
                record.current_month_production - record.prior_month_production;
        }
    }
}

/// 증감 키 기준 내림차순 정렬 (증가 폭이 큰 품목이 먼저)
///
/// 안정 정렬이므로 동률이면 조인 당시의 품목 순서가 유지된다
pub fn sort_desc_by<F>(records: &mut [ComparisonRecord], key: F)
where
    F: Fn(&ComparisonRecord) -> f64,
{
    records.sort_by(|a, b| key(b).total_cmp(&key(a)));
}
