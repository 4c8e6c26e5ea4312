use crate::config::PageSizes;
use crate::external::{CardSource, UpstreamError};
use crate::models::{PageRequest, SearchResult, SetListing};

/// 按调用方页码从上游取出一页卡牌
///
/// 上游每页 `upstream_page_size` 张，调用方每页 `caller_page_size` 张。
/// 切片为空而上游还有下一页时，再请求一次上游下一页并取其开头部分。
pub async fn fetch_page(
    source: &dyn CardSource,
    query: &str,
    caller_page: u32,
    sizes: PageSizes,
) -> Result<SearchResult, UpstreamError> {
    let page = PageRequest::new(caller_page, sizes);
    let page_size = page.caller_page_size as usize;

    tracing::debug!(
        "Fetching caller page {} as upstream page {} (offset {}) for query: {}",
        page.caller_page,
        page.upstream_page,
        page.offset,
        query
    );

    let first = source.search_cards(query, page.upstream_page).await?;
    let mut total_cards = first.total_cards;
    let mut cards = slice_cards(first.cards, page.offset, page_size);

    if cards.is_empty() && first.has_more {
        tracing::debug!(
            "Caller page {} starts at an upstream page boundary, fetching upstream page {}",
            page.caller_page,
            page.upstream_page + 1
        );
        let next = source.search_cards(query, page.upstream_page + 1).await?;
        total_cards = next.total_cards;
        cards = slice_cards(next.cards, 0, page_size);
    }

    Ok(SearchResult {
        cards,
        has_more: page.has_more(total_cards),
        next_page: page.next_page(total_cards),
        total_cards,
        applied_query: query.to_string(),
    })
}

/// 获取系列列表
pub async fn list_sets(source: &dyn CardSource) -> Result<SetListing, UpstreamError> {
    let sets = source.list_sets().await?;
    Ok(SetListing { sets })
}

fn slice_cards(cards: Vec<serde_json::Value>, offset: usize, len: usize) -> Vec<serde_json::Value> {
    cards.into_iter().skip(offset).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::CardPage;
    use crate::models::SetSummary;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// 内存中的上游，记录被请求的页码
    struct FakeSource {
        pages: HashMap<u32, CardPage>,
        requested: Mutex<Vec<u32>>,
        fail: Option<UpstreamError>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                requested: Mutex::new(Vec::new()),
                fail: None,
            }
        }

        fn with_page(mut self, page: u32, range: std::ops::Range<u32>, total_cards: u64, has_more: bool) -> Self {
            let cards = range.map(|i| json!({ "id": i })).collect();
            self.pages.insert(page, CardPage { cards, total_cards, has_more });
            self
        }

        fn failing(err: UpstreamError) -> Self {
            Self { fail: Some(err), ..Self::new() }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CardSource for FakeSource {
        async fn search_cards(&self, _query: &str, page: u32) -> Result<CardPage, UpstreamError> {
            self.requested.lock().unwrap().push(page);
            if let Some(err) = &self.fail {
                return Err(err.clone());
            }
            Ok(self.pages.get(&page).cloned().unwrap_or(CardPage {
                cards: Vec::new(),
                total_cards: 0,
                has_more: false,
            }))
        }

        async fn list_sets(&self) -> Result<Vec<SetSummary>, UpstreamError> {
            if let Some(err) = &self.fail {
                return Err(err.clone());
            }
            Ok(vec![SetSummary { code: "neo".to_string(), name: "Kamigawa: Neon Dynasty".to_string() }])
        }
    }

    fn sizes() -> PageSizes {
        PageSizes { caller_page_size: 15, upstream_page_size: 175 }
    }

    fn ids(result: &SearchResult) -> Vec<u64> {
        result.cards.iter().map(|c| c["id"].as_u64().unwrap()).collect()
    }

    #[tokio::test]
    async fn first_page_slices_from_start() {
        let source = FakeSource::new().with_page(1, 0..175, 400, true);

        let result = fetch_page(&source, "t:creature", 1, sizes()).await.unwrap();

        assert_eq!(ids(&result), (0..15).collect::<Vec<_>>());
        assert!(result.has_more);
        assert_eq!(result.next_page, Some(2));
        assert_eq!(result.total_cards, 400);
        assert_eq!(result.applied_query, "t:creature");
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn page_twelve_slices_165_to_180() {
        let source = FakeSource::new().with_page(1, 0..175, 400, true);

        let result = fetch_page(&source, "t:creature", 12, sizes()).await.unwrap();

        // 上游只有 175 张，切片 [165:180] 实际得到 10 张
        assert_eq!(ids(&result), (165..175).collect::<Vec<_>>());
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn empty_slice_with_more_results_fetches_next_upstream_page() {
        // 上游第 1 页只返回了 165 张，偏移 165 处切片为空
        let source = FakeSource::new()
            .with_page(1, 0..165, 400, true)
            .with_page(2, 1000..1175, 400, true);

        let result = fetch_page(&source, "t:creature", 12, sizes()).await.unwrap();

        assert_eq!(source.requested(), vec![1, 2]);
        assert_eq!(ids(&result), (1000..1015).collect::<Vec<_>>());
        assert!(result.has_more);
        assert_eq!(result.next_page, Some(13));
    }

    #[tokio::test]
    async fn empty_slice_without_more_results_stays_empty() {
        let source = FakeSource::new().with_page(1, 0..20, 20, false);

        let result = fetch_page(&source, "t:creature", 3, sizes()).await.unwrap();

        assert!(result.cards.is_empty());
        assert!(!result.has_more);
        assert_eq!(result.next_page, None);
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn has_more_is_recomputed_from_total_cards() {
        let source = FakeSource::new().with_page(2, 175..200, 200, false);

        let result = fetch_page(&source, "t:creature", 13, sizes()).await.unwrap();
        assert!(result.has_more);
        assert_eq!(result.next_page, Some(14));
        assert_eq!(ids(&result), (180..195).collect::<Vec<_>>());

        let result = fetch_page(&source, "t:creature", 14, sizes()).await.unwrap();
        assert!(!result.has_more);
        assert_eq!(result.next_page, None);
        assert_eq!(ids(&result), (195..200).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn upstream_has_more_flag_does_not_drive_caller_has_more() {
        // 上游说还有更多，但按总数计算调用方已经到最后一页
        let source = FakeSource::new().with_page(1, 0..30, 30, true);

        let result = fetch_page(&source, "t:creature", 2, sizes()).await.unwrap();
        assert_eq!(result.cards.len(), 15);
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn upstream_failure_is_returned_as_error() {
        let source = FakeSource::failing(UpstreamError::Timeout);

        let result = fetch_page(&source, "t:creature", 1, sizes()).await;
        assert_eq!(result, Err(UpstreamError::Timeout));
    }

    #[tokio::test]
    async fn list_sets_wraps_source_result() {
        let listing = list_sets(&FakeSource::new()).await.unwrap();
        assert_eq!(listing.sets.len(), 1);
        assert_eq!(listing.sets[0].code, "neo");

        let err = list_sets(&FakeSource::failing(UpstreamError::Network("refused".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Network(_)));
    }

    proptest! {
        #[test]
        fn page_request_covers_every_card_once(caller_page in 1u32..500, caller_size in 1u32..=40) {
            let sizes = PageSizes { caller_page_size: caller_size, upstream_page_size: 175 };
            let page = PageRequest::new(caller_page, sizes);
            let absolute = (u64::from(page.upstream_page) - 1) * 175 + page.offset as u64;
            prop_assert_eq!(absolute, u64::from(caller_page - 1) * u64::from(caller_size));
            prop_assert!(page.offset < 175);
        }
    }
}
