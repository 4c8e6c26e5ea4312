use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Deserializer};

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::models::{
    split_list, validate_page, validate_strict, ComparisonOperator, FilterSet, SearchResult,
    StatComparison, ValidationError, Validator, DEFAULT_MANA_MAX, MANA_MIN_BOUND,
};
use crate::services::{fetch_page, translate};

/// `GET /search` 查询参数
///
/// 列表类参数为逗号分隔字符串；数值参数传空字符串视为未传。
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub mana_min: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub mana_max: Option<i64>,
    pub colors: Option<String>,
    pub types: Option<String>,
    pub supertypes: Option<String>,
    pub subtype: Option<String>,
    pub rarities: Option<String>,
    pub sets: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub power_value: Option<i64>,
    pub power_operator: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub toughness_value: Option<i64>,
    pub toughness_operator: Option<String>,
}

impl SearchParams {
    /// 转换为筛选条件和调用方页码
    ///
    /// 宽松模式下无法识别的运算符按等于处理；严格模式下直接拒绝，
    /// 并且拒绝下限大于上限的法术力值区间。
    pub fn into_filters(self, strict: bool) -> Result<(FilterSet, u32), ValidationError> {
        let page = validate_page(self.page.unwrap_or(1))?;

        let power = stat_comparison("power_operator", self.power_value, self.power_operator, strict)?;
        let toughness = stat_comparison(
            "toughness_operator",
            self.toughness_value,
            self.toughness_operator,
            strict,
        )?;

        let filters = FilterSet {
            query: self.query,
            mana_min: self.mana_min.unwrap_or(MANA_MIN_BOUND),
            mana_max: self.mana_max.unwrap_or(DEFAULT_MANA_MAX),
            colors: split_list(self.colors.as_deref()),
            types: split_list(self.types.as_deref()),
            supertypes: split_list(self.supertypes.as_deref()),
            subtype: self.subtype,
            rarities: split_list(self.rarities.as_deref()),
            sets: split_list(self.sets.as_deref()),
            power,
            toughness,
        };

        if strict {
            validate_strict(&filters)?;
        } else {
            filters.validate()?;
        }

        Ok((filters, page))
    }
}

fn stat_comparison(
    field: &'static str,
    value: Option<i64>,
    operator: Option<String>,
    strict: bool,
) -> Result<Option<StatComparison>, ValidationError> {
    if strict {
        if let Some(raw) = operator.as_deref().filter(|op| !op.trim().is_empty()) {
            if ComparisonOperator::from_str(raw).is_none() {
                return Err(ValidationError::UnknownOperator {
                    field,
                    value: raw.to_string(),
                });
            }
        }
    }
    Ok(StatComparison::lenient(value, operator.as_deref()))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// 卡牌搜索
pub async fn search_cards(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<SearchResult>> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let (filters, page) = params.into_filters(state.config.strict_validation)?;

    let query = translate(&filters);
    tracing::debug!("Translated search filters into query: {}", query);

    let result = fetch_page(state.source.as_ref(), &query, page, state.config.page_sizes)
        .await
        .map_err(|e| ApiError::upstream(e, state.config.upstream_error_status))?;

    Ok(Json(result))
}
