// ==========================================
// 회계 수불 증감 분석 - API 계층 오류 타입
// ==========================================
// 역할: 하위 계층 오류를 호출측에 전달 가능한 형태로 통합
// 원칙: 모든 오류 메시지는 원인을 명시한다
// ==========================================

use thiserror::Error;

use crate::api::analysis_api::PeriodStatus;
use crate::config::ConfigError;
use crate::domain::types::{ItemCategory, VarianceView};
use crate::importer::ImportError;

/// API 계층 오류 타입
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 구성 오류 =====
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ===== 기간 적재 오류 =====
    // 일부 파일 실패는 다른 파일 처리를 막지 않지만, 필요 역할이
    // 하나라도 빠지면 분석 전체를 중단하고 기간별 상태를 보고한다
    #[error("기간 데이터 적재 실패: {failed}/{total}건 - 기간별 상태를 확인하세요")]
    PeriodLoadFailure {
        total: usize,
        failed: usize,
        periods: Vec<PeriodStatus>,
    },

    // ===== 뷰 정책 오류 =====
    #[error("'{category}' 계정에는 {view} 차이 뷰가 제공되지 않습니다")]
    ViewNotApplicable {
        category: ItemCategory,
        view: VarianceView,
    },

    // ===== 가져오기 오류 =====
    #[error("파일 가져오기 실패: {0}")]
    Import(#[from] ImportError),

    // ===== 일반 오류 =====
    #[error("내부 오류: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
