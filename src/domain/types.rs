// ==========================================
// 회계 수불 증감 분석 - 도메인 타입 정의
// ==========================================
// 근거: 수불부 필드매핑 정의 v0.2 - 계정그룹/기간역할 체계
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ledger::columns;

// ==========================================
// 품목계정그룹 (Item Account Category)
// ==========================================
// 고정 집합: 문자열 비교를 각 계층에 흩뿌리지 않고
// 파싱 시점에 한 번만 판정한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Product,      // 제품
    Merchandise,  // 상품
    SemiFinished, // 반제품
    RawMaterial,  // 원재료
    SubMaterial,  // 부재료
}

impl ItemCategory {
    /// 보고서 표시 순서 (집계 요약 행 순서와 동일)
    pub const DISPLAY_ORDER: [ItemCategory; 5] = [
        ItemCategory::Product,
        ItemCategory::Merchandise,
        ItemCategory::SemiFinished,
        ItemCategory::RawMaterial,
        ItemCategory::SubMaterial,
    ];

    /// 원천 라벨 → 계정그룹 판정
    ///
    /// # 규칙
    /// - 트림 후 비교
    /// - '제품(OEM)'은 레거시 라벨이므로 '제품'으로 정규화
    /// - 집합 밖 라벨은 None (호출측에서 행 제외 + 경고)
    pub fn parse_label(label: &str) -> Option<ItemCategory> {
        match label.trim() {
            "제품" | "제품(OEM)" => Some(ItemCategory::Product),
            "상품" => Some(ItemCategory::Merchandise),
            "반제품" => Some(ItemCategory::SemiFinished),
            "원재료" => Some(ItemCategory::RawMaterial),
            "부재료" => Some(ItemCategory::SubMaterial),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Product => "제품",
            ItemCategory::Merchandise => "상품",
            ItemCategory::SemiFinished => "반제품",
            ItemCategory::RawMaterial => "원재료",
            ItemCategory::SubMaterial => "부재료",
        }
    }

    /// 계정그룹별 차이 뷰 제공 규칙
    ///
    /// # 규칙
    /// - 기말재고: 전 계정
    /// - 매출원가: 반제품 제외 (반제품은 직접 판매되지 않음)
    /// - 제조원가: 원재료/부재료만 (완제품은 자기 자신으로부터 생산되지 않음)
    pub fn supports(&self, view: VarianceView) -> bool {
        match view {
            VarianceView::EndingInventory => true,
            VarianceView::Sales => *self != ItemCategory::SemiFinished,
            VarianceView::Production => matches!(
                self,
                ItemCategory::RawMaterial | ItemCategory::SubMaterial
            ),
        }
    }

    /// 제공되는 뷰 목록 (표시 계층이 탭 구성을 결정할 때 사용)
    pub fn applicable_views(&self) -> Vec<VarianceView> {
        VarianceView::ALL
            .iter()
            .copied()
            .filter(|v| self.supports(*v))
            .collect()
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 기간 역할 (Period Role)
// ==========================================
// 업로드 파일 1개 = 기간 역할 1개
// 역할별로 조인에 필요한 지표 컬럼이 다르다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodRole {
    CurrentMonth, // 당월
    PriorMonth,   // 전월
    CurrentYtd,   // 당기 누적 (1월~기준월)
    PriorYtd,     // 전기 동기 누적
    PriorYearEnd, // 전기 전체 (1~12월, 기말재고만 사용)
}

impl PeriodRole {
    pub const ALL: [PeriodRole; 5] = [
        PeriodRole::CurrentMonth,
        PeriodRole::PriorMonth,
        PeriodRole::CurrentYtd,
        PeriodRole::PriorYtd,
        PeriodRole::PriorYearEnd,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PeriodRole::CurrentMonth => "당월",
            PeriodRole::PriorMonth => "전월",
            PeriodRole::CurrentYtd => "당기누적",
            PeriodRole::PriorYtd => "전기동기",
            PeriodRole::PriorYearEnd => "전기말",
        }
    }

    /// 역할별 필수 지표 컬럼 (헤더 재구성 후 기준)
    ///
    /// 누락 시 SchemaError (빈 테이블을 조용히 만들지 않는다)
    pub fn required_metric_columns(&self) -> &'static [&'static str] {
        match self {
            PeriodRole::CurrentMonth => &[
                columns::PRODUCTION_ISSUE_AMOUNT,
                columns::SALES_ISSUE_AMOUNT,
                columns::ENDING_INVENTORY_AMOUNT,
            ],
            PeriodRole::PriorMonth | PeriodRole::CurrentYtd | PeriodRole::PriorYtd => &[
                columns::PRODUCTION_ISSUE_AMOUNT,
                columns::SALES_ISSUE_AMOUNT,
            ],
            PeriodRole::PriorYearEnd => &[columns::ENDING_INVENTORY_AMOUNT],
        }
    }
}

impl fmt::Display for PeriodRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 차이 뷰 (Variance View)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceView {
    EndingInventory, // 기말재고 차이
    Sales,           // 매출원가 차이
    Production,      // 제조원가 차이
}

impl VarianceView {
    pub const ALL: [VarianceView; 3] = [
        VarianceView::EndingInventory,
        VarianceView::Sales,
        VarianceView::Production,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VarianceView::EndingInventory => "기말재고",
            VarianceView::Sales => "매출원가",
            VarianceView::Production => "제조원가",
        }
    }
}

impl fmt::Display for VarianceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
