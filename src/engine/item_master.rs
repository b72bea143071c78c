// ==========================================
// 회계 수불 증감 분석 - 품목 마스터 구성
// ==========================================
// 역할: 여러 기간 테이블의 품목 식별 정보를 합집합으로 중복 제거
// 정책: 품목코드 기준 최초 출현 우선 (입력 순서가 권위)
// ==========================================

use std::collections::HashMap;

use crate::domain::ledger::{IdentityConflict, ItemRecord, LedgerTable};

// ==========================================
// ItemMaster
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMaster {
    /// 최초 출현 순서를 유지한 품목 목록
    pub items: Vec<ItemRecord>,
    /// 기간 간 이름/단위/계정 불일치 (보고 전용, 병합 실패 아님)
    pub conflicts: Vec<IdentityConflict>,
}

impl ItemMaster {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ==========================================
// ItemMasterBuilder
// ==========================================
pub struct ItemMasterBuilder;

impl ItemMasterBuilder {
    /// 식별 정보 기여 테이블들로부터 품목 마스터를 만든다
    ///
    /// # 인자
    /// - tables: 기여 테이블 목록 (보고서 구성에 따라 일부 기간만 올 수 있음)
    ///
    /// # 규칙
    /// - 같은 코드의 두 번째 이후 출현은 버린다 (최초 출현의 메타데이터가 권위)
    /// - 버린 출현의 이름/단위/계정이 유지값과 다르면 IdentityConflict 로 수집하고
    ///   tracing 경고를 남긴다 - 데이터 품질 감사용이며 오류가 아니다
    pub fn build(&self, tables: &[&LedgerTable]) -> ItemMaster {
        let mut items: Vec<ItemRecord> = Vec::new();
        let mut position_by_code: HashMap<String, usize> = HashMap::new();
        let mut conflicts: Vec<IdentityConflict> = Vec::new();

        for table in tables {
            for record in &table.records {
                match position_by_code.get(&record.item_code).copied() {
                    None => {
                        position_by_code.insert(record.item_code.clone(), items.len());
                        items.push(ItemRecord {
                            item_code: record.item_code.clone(),
                            item_name: record.item_name.clone(),
                            unit: record.unit.clone(),
                            category: record.category,
                        });
                    }
                    Some(position) => {
                        let kept = &items[position];
                        let mut disagreements: Vec<(&str, String, String)> = Vec::new();
                        if kept.item_name != record.item_name {
                            disagreements.push((
                                "item_name",
                                kept.item_name.clone(),
                                record.item_name.clone(),
                            ));
                        }
                        if kept.unit != record.unit {
                            disagreements.push(("unit", kept.unit.clone(), record.unit.clone()));
                        }
                        if kept.category != record.category {
                            disagreements.push((
                                "category",
                                kept.category.to_string(),
                                record.category.to_string(),
                            ));
                        }

                        for (field, kept_value, ignored_value) in disagreements {
                            tracing::warn!(
                                item_code = %record.item_code,
                                field,
                                kept = %kept_value,
                                ignored = %ignored_value,
                                source = %table.source_name,
                                "품목 식별 정보 불일치 - 최초 출현 값 유지"
                            );
                            conflicts.push(IdentityConflict {
                                item_code: record.item_code.clone(),
                                field: field.to_string(),
                                kept: kept_value,
                                ignored: ignored_value,
                                source: table.source_name.clone(),
                            });
                        }
                    }
                }
            }
        }

        ItemMaster { items, conflicts }
    }
}
