// ==========================================
// 회계 수불 증감 분석 - 수불장 도메인 모델
// ==========================================
// 근거: 수불부 필드매핑 정의 v0.2 - 표준 컬럼 명세
// 용도: 파서 출력 (정규화된 수불 테이블), 품목 마스터
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::domain::types::ItemCategory;

// ==========================================
// 표준 컬럼명 (헤더 재구성 후 기준)
// ==========================================
// ERP 수불부 내보내기의 2단 헤더를 병합한 뒤의 이름
pub mod columns {
    // ===== 식별 컬럼 =====
    pub const ITEM_ACCOUNT_CATEGORY: &str = "품목계정그룹";
    pub const ITEM_CODE: &str = "품목코드";
    pub const ITEM_NAME: &str = "품목명";
    pub const UNIT: &str = "단위";

    // ===== 지표 컬럼 (금액) =====
    pub const PRODUCTION_ISSUE_AMOUNT: &str = "생산출고_금액";
    pub const SALES_ISSUE_AMOUNT: &str = "판매출고_금액";
    pub const ENDING_INVENTORY_AMOUNT: &str = "기말재고_금액";

    // ===== 수치 컬럼 판정 마커 =====
    // 병합 컬럼명에 이 부분 문자열이 포함되면 수치 강제변환 대상
    pub const QUANTITY_MARKER: &str = "수량";
    pub const AMOUNT_MARKER: &str = "금액";
}

// ==========================================
// LedgerRecord - 정규화된 수불 행
// ==========================================
// 식별 필드는 트림 완료, 수치 컬럼은 전부 f64 (누락/파싱실패 → 0.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub item_code: String,
    pub item_name: String,
    pub unit: String,
    pub category: ItemCategory,

    /// 수량/금액 컬럼 전체 (병합 컬럼명 → 값)
    pub metrics: BTreeMap<String, f64>,

    /// 원본 파일 행 번호 (1부터, 헤더 2행 포함) - 진단용
    pub row_number: usize,
}

impl LedgerRecord {
    /// 지표 값 조회 - 컬럼 부재는 0.0
    ///
    /// 수불 분석에서 "거래 기록 없음"은 0 활동이지 결측이 아니다
    pub fn metric(&self, column: &str) -> f64 {
        self.metrics.get(column).copied().unwrap_or(0.0)
    }
}

// ==========================================
// ParseSummary - 파싱 통계
// ==========================================
// 제외 사유별 건수 (데이터 품질 추적용)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    pub total_data_rows: usize,
    pub kept_rows: usize,
    pub dropped_missing_category: usize,
    pub dropped_artifact_code: usize,
    pub dropped_unknown_category: usize,
}

// ==========================================
// LedgerTable - 정규화된 수불 테이블
// ==========================================
// LedgerParser 의 출력. 한 업로드 파일 = 한 테이블
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTable {
    /// 원본 파일 식별자 (오류 메시지/기간 상태 보고용)
    pub source_name: String,

    /// 재구성된 전체 컬럼명 (위치 순서 유지)
    pub columns: Vec<String>,

    pub records: Vec<LedgerRecord>,

    pub summary: ParseSummary,
}

impl LedgerTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// 품목코드 → 행 인덱스 (중복 코드는 최초 출현 우선)
    pub fn index_by_code(&self) -> HashMap<&str, &LedgerRecord> {
        let mut index = HashMap::with_capacity(self.records.len());
        for record in &self.records {
            index.entry(record.item_code.as_str()).or_insert(record);
        }
        index
    }
}

// ==========================================
// ItemRecord - 품목 마스터 항목
// ==========================================
// 키: 품목코드. 여러 기간 테이블의 합집합에서 최초 출현 우선으로 구성
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_code: String,
    pub item_name: String,
    pub unit: String,
    pub category: ItemCategory,
}

// ==========================================
// IdentityConflict - 품목 식별 정보 불일치
// ==========================================
// 같은 품목코드에 대해 기간 간 이름/단위/계정이 다른 경우.
// 최초 출현 값이 유지되고, 불일치는 보고만 한다 (실패 아님)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityConflict {
    pub item_code: String,
    /// 불일치 필드명 (item_name / unit / category)
    pub field: String,
    /// 유지된 값 (최초 출현)
    pub kept: String,
    /// 무시된 값
    pub ignored: String,
    /// 무시된 값의 출처 파일
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, metrics: &[(&str, f64)]) -> LedgerRecord {
        LedgerRecord {
            item_code: code.to_string(),
            item_name: format!("품목{}", code),
            unit: "EA".to_string(),
            category: ItemCategory::Product,
            metrics: metrics
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            row_number: 3,
        }
    }

    #[test]
    fn test_metric_missing_column_is_zero() {
        let rec = record("A001", &[(columns::ENDING_INVENTORY_AMOUNT, 1200.0)]);
        assert_eq!(rec.metric(columns::ENDING_INVENTORY_AMOUNT), 1200.0);
        assert_eq!(rec.metric(columns::SALES_ISSUE_AMOUNT), 0.0);
    }

    #[test]
    fn test_index_by_code_first_occurrence_wins() {
        let table = LedgerTable {
            source_name: "당월.csv".to_string(),
            columns: vec![],
            records: vec![
                record("A001", &[(columns::ENDING_INVENTORY_AMOUNT, 100.0)]),
                record("A001", &[(columns::ENDING_INVENTORY_AMOUNT, 999.0)]),
            ],
            summary: ParseSummary::default(),
        };
        let index = table.index_by_code();
        assert_eq!(index["A001"].metric(columns::ENDING_INVENTORY_AMOUNT), 100.0);
    }
}
