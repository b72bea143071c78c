// ==========================================
// 회계 수불 증감 분석 - 가져오기 오류 타입
// ==========================================
// 도구: thiserror 파생 매크로
// ==========================================

use thiserror::Error;

/// 가져오기 계층 오류 타입
///
/// 수치 강제변환 실패는 오류가 아니라 0 정규화 정책 대상이므로
/// 여기에 변형이 없다
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 파일 관련 오류 =====
    #[error("파일이 존재하지 않습니다: {0}")]
    FileNotFound(String),

    #[error("지원하지 않는 파일 형식: {0} (.xlsx/.xls/.csv 만 지원)")]
    UnsupportedFormat(String),

    #[error("파일 읽기 실패: {0}")]
    FileReadError(String),

    #[error("Excel 파싱 실패: {0}")]
    ExcelParseError(String),

    #[error("CSV 파싱 실패: {0}")]
    CsvParseError(String),

    // ===== 구조 오류 =====
    #[error("행 수 부족 ({file}): 헤더 2행 + 데이터 1행 이상 필요, 실제 {rows}행")]
    TooFewRows { file: String, rows: usize },

    #[error("필수 컬럼 누락 ({file}): '{column}' - 내보내기 양식을 확인하세요")]
    SchemaError { file: String, column: String },

    // ===== 일반 오류 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 타입 별칭
pub type ImportResult<T> = Result<T, ImportError>;
