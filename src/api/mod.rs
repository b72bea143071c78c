// ==========================================
// 회계 수불 증감 분석 - API 계층
// ==========================================
// 역할: 표시 계층(외부 협력자)이 호출하는 업무 인터페이스
// ==========================================

pub mod analysis_api;
pub mod error;

pub use analysis_api::{
    AnalysisApi, AnalysisRequest, AnalysisResponse, PeriodOutcome, PeriodStatus,
};
pub use error::ApiError;
