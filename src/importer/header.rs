// ==========================================
// 회계 수불 증감 분석 - 2단 헤더 재구성
// ==========================================
// 근거: 수불부 필드매핑 정의 v0.2 - 헤더 병합 규칙
// ==========================================
// ERP 내보내기는 1행에 대분류(병합 셀 탓에 빈칸 다수),
// 2행에 소분류(수량/금액)를 둔다. 대분류를 앞으로 채운 뒤
// 위치별로 결합해 단일 컬럼명을 만든다
// ==========================================

/// 헤더 2행을 병합해 컬럼명 목록을 만든다
///
/// # 규칙 (위치별 독립 적용)
/// - 1행 값이 비어 있으면 직전의 비어 있지 않은 값을 재사용 (forward fill)
/// - 2행 값이 비어 있지 않으면 `"{대분류}_{소분류}"`, 비어 있으면 대분류 단독
/// - 대분류가 앞쪽부터 전부 비어 있으면 소분류 단독
pub fn merge_headers(top_row: &[String], sub_row: &[String]) -> Vec<String> {
    let width = top_row.len().max(sub_row.len());
    let mut merged = Vec::with_capacity(width);

    // 병합 셀 복원용: 직전의 비어 있지 않은 대분류
    let mut carried = String::new();

    for position in 0..width {
        let top = top_row
            .get(position)
            .map(|s| s.trim())
            .unwrap_or("");
        if !top.is_empty() {
            carried = top.to_string();
        }

        let sub = sub_row
            .get(position)
            .map(|s| s.trim())
            .unwrap_or("");

        let name = if sub.is_empty() {
            carried.clone()
        } else if carried.is_empty() {
            sub.to_string()
        } else {
            format!("{}_{}", carried, sub)
        };

        merged.push(name);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_forward_fills_top_row() {
        // 병합 셀: '기말재고'가 수량/금액 두 칸에 걸쳐 있던 형태
        let top = row(&["품목코드", "기말재고", "", "판매출고", ""]);
        let sub = row(&["", "수량", "금액", "수량", "금액"]);

        let merged = merge_headers(&top, &sub);
        assert_eq!(
            merged,
            vec![
                "품목코드",
                "기말재고_수량",
                "기말재고_금액",
                "판매출고_수량",
                "판매출고_금액"
            ]
        );
    }

    #[test]
    fn test_merge_is_positional_and_local() {
        // 각 위치는 독립적으로 결정된다: 중간에 새 대분류가 나오면 교체
        let top = row(&["A", "", "B", ""]);
        let sub = row(&["x", "y", "", "z"]);

        let merged = merge_headers(&top, &sub);
        assert_eq!(merged, vec!["A_x", "A_y", "B", "B_z"]);
    }

    #[test]
    fn test_merge_handles_ragged_rows() {
        let top = row(&["품목코드", "기말재고"]);
        let sub = row(&["", "수량", "금액"]);

        let merged = merge_headers(&top, &sub);
        assert_eq!(merged, vec!["품목코드", "기말재고_수량", "기말재고_금액"]);
    }

    #[test]
    fn test_merge_leading_empty_top_uses_sub_alone() {
        let top = row(&["", ""]);
        let sub = row(&["수량", "금액"]);

        let merged = merge_headers(&top, &sub);
        assert_eq!(merged, vec!["수량", "금액"]);
    }

    #[test]
    fn test_merge_trims_whitespace() {
        let top = row(&[" 품목코드 ", " 기말재고 "]);
        let sub = row(&["", " 금액 "]);

        let merged = merge_headers(&top, &sub);
        assert_eq!(merged, vec!["품목코드", "기말재고_금액"]);
    }
}
