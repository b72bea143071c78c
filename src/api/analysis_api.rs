// ==========================================
// 회계 수불 증감 분석 - 분석 API
// ==========================================
// 역할: 파싱 → 마스터 → 조인 → 증감 → 집계 파이프라인 실행
// 원칙: 실행마다 전체 재계산, 실행 간 공유 상태 없음.
//       선택 계정/뷰는 호출마다 명시적 인자로 받는다
// ==========================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::config::{ConfigError, ReportConfig};
use crate::domain::ledger::LedgerTable;
use crate::domain::report::{AnalysisReport, DetailView, SummaryView};
use crate::domain::types::{ItemCategory, PeriodRole, VarianceView};
use crate::engine::{
    AggregationReporter, DetailViewBuilder, ItemMasterBuilder, PeriodJoiner, VarianceEngine,
};
use crate::importer::{ImportResult, LedgerParser, UniversalFileParser};

// ==========================================
// 요청/응답 DTO
// ==========================================

/// 분석 요청: 구성 + 기간 역할별 업로드 파일 경로
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub config: ReportConfig,
    pub files: HashMap<PeriodRole, PathBuf>,
}

/// 기간별 적재 상태 (부분 실패 보고용)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatus {
    pub role: PeriodRole,
    pub file: String,
    pub outcome: PeriodOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodOutcome {
    Loaded { rows: usize },
    Failed { message: String },
}

impl PeriodOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, PeriodOutcome::Loaded { .. })
    }
}

/// 분석 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub report: AnalysisReport,
    pub periods: Vec<PeriodStatus>,
    /// 분석 소요 시간 (밀리초)
    pub elapsed_ms: i64,
}

// ==========================================
// AnalysisApi
// ==========================================
pub struct AnalysisApi;

impl AnalysisApi {
    pub fn new() -> Self {
        AnalysisApi
    }

    /// 분석 실행
    ///
    /// # 처리 순서
    /// 1. 구성 검증 (월 범위, 역할 매핑 완전성)
    /// 2. 기간별 독립 파싱 - 한 파일의 실패가 다른 파일 처리를 막지 않는다
    /// 3. 필요 역할이 하나라도 실패하면 기간별 상태와 함께 중단
    /// 4. 마스터 → 조인 → 증감 → 집계
    pub fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ApiError> {
        let started = Instant::now();
        request.config.validate()?;

        // 역할 매핑 완전성: 필요 역할 전부에 파일이 지정되어야 한다
        for role in &request.config.required_roles {
            if !request.files.contains_key(role) {
                return Err(ConfigError::MissingPeriodRole { role: *role }.into());
            }
        }

        // 기간별 독립 파싱
        let mut tables: HashMap<PeriodRole, LedgerTable> = HashMap::new();
        let mut periods: Vec<PeriodStatus> = Vec::new();
        let mut failed = 0usize;

        for role in PeriodRole::ALL {
            let Some(path) = request.files.get(&role) else {
                continue;
            };
            let file = file_label(path);
            match self.parse_period(path, role) {
                Ok(table) => {
                    periods.push(PeriodStatus {
                        role,
                        file,
                        outcome: PeriodOutcome::Loaded {
                            rows: table.records.len(),
                        },
                    });
                    tables.insert(role, table);
                }
                Err(error) => {
                    tracing::warn!(role = %role, file = %file, error = %error, "기간 파일 적재 실패");
                    failed += 1;
                    periods.push(PeriodStatus {
                        role,
                        file,
                        outcome: PeriodOutcome::Failed {
                            message: error.to_string(),
                        },
                    });
                }
            }
        }

        if failed > 0 {
            return Err(ApiError::PeriodLoadFailure {
                total: periods.len(),
                failed,
                periods,
            });
        }

        // 품목 마스터: 구성이 지정한 기여 역할만, 역할 선언 순서대로
        let identity_tables: Vec<&LedgerTable> = PeriodRole::ALL
            .iter()
            .copied()
            .filter(|role| request.config.identity_roles.contains(role))
            .filter_map(|role| tables.get(&role))
            .collect();
        let master = ItemMasterBuilder.build(&identity_tables);

        let mut records = PeriodJoiner.join(&master, &tables);
        VarianceEngine.compute(&mut records);

        let reporter = AggregationReporter;
        let summary = reporter.summarize(&records);
        let headline = reporter.headline(&records);

        let report = AnalysisReport {
            fiscal_year: request.config.fiscal_year,
            month: request.config.month,
            records,
            summary,
            headline,
            identity_conflicts: master.conflicts,
        };

        let elapsed_ms = started.elapsed().as_millis() as i64;
        tracing::info!(
            fiscal_year = report.fiscal_year,
            month = report.month,
            items = report.records.len(),
            elapsed_ms,
            "분석 완료"
        );

        Ok(AnalysisResponse {
            report,
            periods,
            elapsed_ms,
        })
    }

    /// 계정×뷰 품목 상세 표
    ///
    /// 선택 계정은 표시 계층이 보유한 상태이며 호출마다 인자로 받는다
    pub fn detail(
        &self,
        report: &AnalysisReport,
        category: ItemCategory,
        view: VarianceView,
    ) -> Result<DetailView, ApiError> {
        if !category.supports(view) {
            return Err(ApiError::ViewNotApplicable { category, view });
        }
        Ok(DetailViewBuilder.build(&report.records, category, view))
    }

    /// 뷰별 계정 요약 (뷰 정책이 포함하는 계정만)
    pub fn summary_view(&self, report: &AnalysisReport, view: VarianceView) -> SummaryView {
        AggregationReporter.summary_view(&report.summary, view)
    }

    /// 파일 1개 파싱 + 역할별 필수 지표 컬럼 확인
    fn parse_period(&self, path: &Path, role: PeriodRole) -> ImportResult<LedgerTable> {
        let grid = UniversalFileParser.parse(path)?;
        let table = LedgerParser.parse(&grid, &file_label(path))?;

        for column in role.required_metric_columns() {
            if !table.has_column(column) {
                return Err(crate::importer::ImportError::SchemaError {
                    file: table.source_name.clone(),
                    column: (*column).to_string(),
                });
            }
        }

        Ok(table)
    }
}

impl Default for AnalysisApi {
    fn default() -> Self {
        AnalysisApi::new()
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
