// ==========================================
// 회계 수불 증감 분석 - 파일 파서 구현
// ==========================================
// 지원: Excel (.xlsx/.xls) / CSV (.csv)
// 역할: 파일 → 원시 셀 그리드
// ==========================================
// 주의: 2단 헤더(1행 대분류, 2행 소분류)가 그대로 헤더 병합
// 단계에 전달되어야 하므로 여기서는 헤더 해석을 하지 않는다
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 파일 파싱 인터페이스 (원시 셀 그리드 생성)
pub trait FileParser: Send + Sync {
    /// 파일을 행×열 셀 그리드로 읽는다 (셀은 트림된 문자열, 빈 셀은 "")
    fn parse_to_grid(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>>;
}

// ==========================================
// CSV Parser 구현
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_grid(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        // 헤더 2행을 데이터와 동일하게 위치 기반으로 읽어야 하므로
        // has_headers(false). flexible: 행 길이 불일치 허용
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();
            grid.push(row);
        }

        Ok(grid)
    }
}

// ==========================================
// Excel Parser 구현
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_grid(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        // 첫 번째 시트를 읽는다 (수불부 내보내기는 단일 시트)
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "Excel 파일에 워크시트가 없습니다".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let grid = range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect()
            })
            .collect();

        Ok(grid)
    }
}

// ==========================================
// 통합 파일 파서 (확장자 기반 자동 선택)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<Vec<String>>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_grid(path),
            "xlsx" | "xls" => ExcelParser.parse_to_grid(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
