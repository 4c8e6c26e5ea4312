use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{CardPage, CardSource, UpstreamError};
use crate::models::SetSummary;

const USER_AGENT: &str = concat!("deckmoor-backend/", env!("CARGO_PKG_VERSION"));

/// Scryfall API客户端
#[derive(Clone)]
pub struct ScryfallClient {
    client: Client,
    base_url: String,
}

impl ScryfallClient {
    /// 使用给定超时构建客户端，超时作用于每一次上游请求
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        // Scryfall 要求请求带 User-Agent 和 Accept
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(json_accept_headers())
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, UpstreamError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Scryfall 的错误响应体带有 details 字段
            let message = response
                .json::<ScryfallErrorBody>()
                .await
                .ok()
                .and_then(|body| body.details)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string());
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

fn json_accept_headers() -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    headers
}

#[async_trait]
impl CardSource for ScryfallClient {
    async fn search_cards(&self, query: &str, page: u32) -> Result<CardPage, UpstreamError> {
        let params = [("q", query.to_string()), ("page", page.to_string())];
        let body: ScryfallCardList = self.get_json("/cards/search", &params).await?;

        let cards = body
            .data
            .ok_or_else(|| UpstreamError::Malformed("missing `data` field".to_string()))?;

        Ok(CardPage {
            cards,
            total_cards: body.total_cards.unwrap_or(0),
            has_more: body.has_more.unwrap_or(false),
        })
    }

    async fn list_sets(&self) -> Result<Vec<SetSummary>, UpstreamError> {
        let body: ScryfallSetList = self.get_json("/sets", &[]).await?;

        let sets = body
            .data
            .ok_or_else(|| UpstreamError::Malformed("missing `data` field".to_string()))?;

        Ok(sets
            .into_iter()
            .map(|set| SetSummary {
                code: set.code,
                name: set.name,
            })
            .collect())
    }
}

/// Scryfall卡牌列表响应
#[derive(Debug, Deserialize)]
struct ScryfallCardList {
    data: Option<Vec<serde_json::Value>>,
    total_cards: Option<u64>,
    has_more: Option<bool>,
}

/// Scryfall系列列表响应
#[derive(Debug, Deserialize)]
struct ScryfallSetList {
    data: Option<Vec<ScryfallSet>>,
}

#[derive(Debug, Deserialize)]
struct ScryfallSet {
    code: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ScryfallErrorBody {
    details: Option<String>,
}
