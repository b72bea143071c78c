// ==========================================
// 회계 수불 증감 분석 - 보고서 구성
// ==========================================
// 역할: 기준 연월, 필요 기간 역할, 마스터 기여 역할을 데이터로 보유
// 원칙: 보고서 변형은 구성 차이일 뿐 별도 파이프라인이 아니다
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::PeriodRole;

/// 구성 오류 타입
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("기준 월이 올바르지 않습니다: {month} (1~12)")]
    InvalidMonth { month: u32 },

    #[error("필요 기간 역할이 비어 있습니다")]
    NoRequiredRoles,

    #[error("기간 역할 파일 미지정: {role} - 분석을 시작할 수 없습니다")]
    MissingPeriodRole { role: PeriodRole },
}

// ==========================================
// ReportConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 기준 년도
    pub fiscal_year: i32,

    /// 기준 월 (1~12)
    pub month: u32,

    /// 분석에 필요한 기간 역할 (기본: 5개 전부)
    pub required_roles: Vec<PeriodRole>,

    /// 품목 마스터 구성에 기여하는 기간 역할
    /// (일부 보고서 변형은 당월/전월/당기누적만 사용)
    pub identity_roles: Vec<PeriodRole>,
}

impl ReportConfig {
    pub fn new(fiscal_year: i32, month: u32) -> Self {
        ReportConfig {
            fiscal_year,
            month,
            required_roles: PeriodRole::ALL.to_vec(),
            identity_roles: PeriodRole::ALL.to_vec(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=12).contains(&self.month) {
            return Err(ConfigError::InvalidMonth { month: self.month });
        }
        if self.required_roles.is_empty() {
            return Err(ConfigError::NoRequiredRoles);
        }
        Ok(())
    }

    /// 전월 (1월이면 전년도 12월로 순환)
    pub fn prior_month(&self) -> u32 {
        if self.month > 1 {
            self.month - 1
        } else {
            12
        }
    }

    pub fn prior_fiscal_year(&self) -> i32 {
        self.fiscal_year - 1
    }
}
