pub mod error;
pub mod scryfall;

use async_trait::async_trait;

pub use error::UpstreamError;
pub use scryfall::ScryfallClient;

use crate::models::SetSummary;

/// 上游返回的一页卡牌
#[derive(Debug, Clone, PartialEq)]
pub struct CardPage {
    pub cards: Vec<serde_json::Value>,
    /// 上游报告的结果总数
    pub total_cards: u64,
    /// 上游是否还有下一页
    pub has_more: bool,
}

/// 卡牌数据来源接口
#[async_trait]
pub trait CardSource: Send + Sync {
    /// 按上游页码（从 1 开始）查询一页卡牌
    async fn search_cards(&self, query: &str, page: u32) -> Result<CardPage, UpstreamError>;

    /// 获取全部系列
    async fn list_sets(&self) -> Result<Vec<SetSummary>, UpstreamError>;
}
