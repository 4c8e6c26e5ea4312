// 筛选条件 -> Scryfall 查询串
//
// 子句顺序固定：文本、法术力值、颜色、类别、超类别、副类别、稀有度、系列、力量、防御力。

use crate::models::{FilterSet, StatComparison, DEFAULT_MANA_MAX};

/// 没有任何筛选条件时使用的查询，保证上游不会收到空查询
pub const FALLBACK_QUERY: &str = "t:creature";

pub fn translate(filters: &FilterSet) -> String {
    let mut clauses: Vec<String> = Vec::new();

    let text = filters.query.trim();
    if !text.is_empty() {
        clauses.push(text.to_string());
    }

    // 上限与 16 比较而不是与可接受的 20 比较，17~20 不会单独触发该子句
    if filters.mana_min > 0 || filters.mana_max < DEFAULT_MANA_MAX {
        clauses.push(format!("cmc>={} cmc<={}", filters.mana_min, filters.mana_max));
    }

    if !filters.colors.is_empty() {
        clauses.push(format!("c:{}", filters.colors.concat()));
    }

    // 类别与超类别共用 t: 筛选，多个值之间为 AND
    for type_name in filters.types.iter().chain(filters.supertypes.iter()) {
        clauses.push(format!("t:{}", type_name));
    }

    if let Some(subtype) = filters.subtype.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        clauses.push(format!("t:{}", subtype));
    }

    if !filters.rarities.is_empty() {
        let rarities: Vec<String> = filters.rarities.iter().map(|r| format!("r:{}", r)).collect();
        clauses.push(format!("({})", rarities.join(" OR ")));
    }

    // 多个系列同样是 AND，两个以上系列通常查不到结果
    for set_code in &filters.sets {
        clauses.push(format!("s:{}", set_code));
    }

    if let Some(power) = &filters.power {
        clauses.push(stat_clause("pow", power));
    }

    if let Some(toughness) = &filters.toughness {
        clauses.push(stat_clause("tou", toughness));
    }

    if clauses.is_empty() {
        return FALLBACK_QUERY.to_string();
    }

    clauses.join(" ")
}

fn stat_clause(key: &str, comparison: &StatComparison) -> String {
    format!("{}{}{}", key, comparison.operator.symbol(), comparison.value)
}
