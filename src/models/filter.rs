use serde::{Deserialize, Serialize};

/// 法术力值下限允许的最小值
pub const MANA_MIN_BOUND: i64 = 0;
/// 法术力值上限允许的最大值
pub const MANA_MAX_BOUND: i64 = 20;
/// 默认法术力值上限
///
/// 注意：判断区间是否为默认值时用的是 16，而不是 `MANA_MAX_BOUND` 的 20。
pub const DEFAULT_MANA_MAX: i64 = 16;

/// 攻防比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Equal,
    Greater,
    Less,
}

impl ComparisonOperator {
    /// 严格解析，无法识别时返回 None
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Some(ComparisonOperator::Equal),
            "greater" => Some(ComparisonOperator::Greater),
            "less" => Some(ComparisonOperator::Less),
            _ => None,
        }
    }

    /// 宽松解析，无法识别的运算符按等于处理
    pub fn from_str_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or(ComparisonOperator::Equal)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::Less => "<",
        }
    }
}

/// 力量 / 防御力比较条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatComparison {
    pub operator: ComparisonOperator,
    pub value: i64,
}

impl StatComparison {
    /// 只有给出数值时才构成条件；运算符缺省或无法识别时为等于
    pub fn lenient(value: Option<i64>, operator: Option<&str>) -> Option<Self> {
        let value = value?;
        let operator = operator
            .map(ComparisonOperator::from_str_lenient)
            .unwrap_or(ComparisonOperator::Equal);
        Some(Self { operator, value })
    }
}

/// 一次搜索请求的筛选条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub query: String,
    pub mana_min: i64,
    pub mana_max: i64,
    pub colors: Vec<String>,
    pub types: Vec<String>,
    pub supertypes: Vec<String>,
    pub subtype: Option<String>,
    pub rarities: Vec<String>,
    pub sets: Vec<String>,
    pub power: Option<StatComparison>,
    pub toughness: Option<StatComparison>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            query: String::new(),
            mana_min: MANA_MIN_BOUND,
            mana_max: DEFAULT_MANA_MAX,
            colors: Vec::new(),
            types: Vec::new(),
            supertypes: Vec::new(),
            subtype: None,
            rarities: Vec::new(),
            sets: Vec::new(),
            power: None,
            toughness: None,
        }
    }
}

/// 拆分逗号分隔的列表参数
///
/// 去掉每项首尾空白并丢弃空项，保持原有顺序。
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
