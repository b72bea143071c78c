// ==========================================
// 회계 수불 증감 분석 - 수불장 파서 구현
// ==========================================
// 역할: 원시 셀 그리드 → 정규화된 LedgerTable
// 단계: 헤더 재구성 → 식별 컬럼 확인 → 행 필터 → 수치 강제변환
// ==========================================

use std::collections::BTreeMap;

use crate::domain::ledger::{columns, LedgerRecord, LedgerTable, ParseSummary};
use crate::domain::types::ItemCategory;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header;

/// 품목코드가 상류 수치→문자 변환 잔재("nan")인지 판정
///
/// 업무 규칙이 아니라 원천 시스템 호환 규칙이다. 매직 문자열 의존을
/// 이 함수 하나에 가두어 추후 "트림 후 빈 코드" 판정으로 교체할 수 있게 한다.
pub fn is_numeric_artifact_code(code: &str) -> bool {
    code == "nan"
}

/// 수치 강제변환: 천 단위 구분 쉼표 제거 후 f64 파싱, 실패/공백은 0.0
///
/// 수불부 내보내기에는 서식 잔재가 섞이므로 엄격 검증보다
/// 가용성을 우선한다 (오류 전파 없음)
pub fn coerce_numeric(raw: &str) -> f64 {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

// ==========================================
// LedgerParser
// ==========================================
// 순수 변환: 같은 입력은 항상 같은 LedgerTable 을 만든다
pub struct LedgerParser;

impl LedgerParser {
    /// 원시 셀 그리드를 정규화된 수불 테이블로 변환한다
    ///
    /// # 인자
    /// - grid: 파일 파서 출력 (1~2행 헤더, 3행부터 데이터)
    /// - source_name: 원본 파일 식별자 (오류/진단 메시지용)
    ///
    /// # 반환
    /// - Ok(LedgerTable): 정규화 완료
    /// - Err(TooFewRows): 헤더 2행 + 데이터 1행 미만
    /// - Err(SchemaError): 식별 필수 컬럼 누락
    pub fn parse(&self, grid: &[Vec<String>], source_name: &str) -> ImportResult<LedgerTable> {
        if grid.len() < 3 {
            return Err(ImportError::TooFewRows {
                file: source_name.to_string(),
                rows: grid.len(),
            });
        }

        let merged_columns = header::merge_headers(&grid[0], &grid[1]);

        // 식별 필수 컬럼 위치 확인 - 누락이면 빈 테이블 대신 SchemaError
        let position_of = |name: &str| -> ImportResult<usize> {
            merged_columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| ImportError::SchemaError {
                    file: source_name.to_string(),
                    column: name.to_string(),
                })
        };
        let category_pos = position_of(columns::ITEM_ACCOUNT_CATEGORY)?;
        let code_pos = position_of(columns::ITEM_CODE)?;
        let name_pos = position_of(columns::ITEM_NAME)?;
        let unit_pos = position_of(columns::UNIT)?;

        // 수치 컬럼: 병합명에 '수량' 또는 '금액'이 포함된 컬럼 전부
        let numeric_positions: Vec<usize> = merged_columns
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                name.contains(columns::QUANTITY_MARKER) || name.contains(columns::AMOUNT_MARKER)
            })
            .map(|(pos, _)| pos)
            .collect();

        let cell = |row: &[String], pos: usize| -> String {
            row.get(pos).map(|s| s.trim().to_string()).unwrap_or_default()
        };

        let mut records = Vec::new();
        let mut summary = ParseSummary::default();

        for (offset, row) in grid[2..].iter().enumerate() {
            summary.total_data_rows += 1;
            // 원본 파일 기준 행 번호 (1부터, 헤더 2행 포함)
            let row_number = offset + 3;

            let category_raw = cell(row, category_pos);
            if category_raw.is_empty() {
                summary.dropped_missing_category += 1;
                continue;
            }

            let item_code = cell(row, code_pos);
            if is_numeric_artifact_code(&item_code) {
                summary.dropped_artifact_code += 1;
                continue;
            }

            let category = match ItemCategory::parse_label(&category_raw) {
                Some(category) => category,
                None => {
                    summary.dropped_unknown_category += 1;
                    tracing::warn!(
                        file = source_name,
                        row = row_number,
                        label = %category_raw,
                        "알 수 없는 품목계정그룹 라벨, 행 제외"
                    );
                    continue;
                }
            };

            let mut metrics = BTreeMap::new();
            for &pos in &numeric_positions {
                metrics.insert(merged_columns[pos].clone(), coerce_numeric(&cell(row, pos)));
            }

            records.push(LedgerRecord {
                item_code,
                item_name: cell(row, name_pos),
                unit: cell(row, unit_pos),
                category,
                metrics,
                row_number,
            });
        }

        summary.kept_rows = records.len();
        tracing::debug!(
            file = source_name,
            total = summary.total_data_rows,
            kept = summary.kept_rows,
            "수불장 파싱 완료"
        );

        Ok(LedgerTable {
            source_name: source_name.to_string(),
            columns: merged_columns,
            records,
            summary,
        })
    }
}
