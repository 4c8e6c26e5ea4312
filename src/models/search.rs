use serde::{Deserialize, Serialize};

use crate::config::PageSizes;

/// 调用方页码到上游页码的换算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 调用方页码，从 1 开始
    pub caller_page: u32,
    pub caller_page_size: u32,
    /// 上游页码，从 1 开始
    pub upstream_page: u32,
    /// 在上游该页卡牌列表中的起始下标
    pub offset: usize,
}

impl PageRequest {
    /// `caller_page` 为 0 时按第 1 页处理
    pub fn new(caller_page: u32, sizes: PageSizes) -> Self {
        let caller_page = caller_page.max(1);
        let skipped = u64::from(caller_page - 1) * u64::from(sizes.caller_page_size);
        let upstream_size = u64::from(sizes.upstream_page_size);

        Self {
            caller_page,
            caller_page_size: sizes.caller_page_size,
            upstream_page: (skipped / upstream_size + 1) as u32,
            offset: (skipped % upstream_size) as usize,
        }
    }

    /// 调用方视角是否还有下一页
    pub fn has_more(&self, total_cards: u64) -> bool {
        u64::from(self.caller_page) * u64::from(self.caller_page_size) < total_cards
    }

    pub fn next_page(&self, total_cards: u64) -> Option<u32> {
        self.has_more(total_cards).then(|| self.caller_page + 1)
    }
}

/// 一页搜索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 上游卡牌对象，原样透传
    pub cards: Vec<serde_json::Value>,
    pub has_more: bool,
    pub next_page: Option<u32>,
    pub total_cards: u64,
    /// 实际发送给上游的查询串
    pub applied_query: String,
}

/// 系列简要信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSummary {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetListing {
    pub sets: Vec<SetSummary>,
}
