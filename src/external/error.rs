// 上游 Scryfall 调用错误
//
// 所有网络错误、非 2xx 状态码、响应结构不符都归为这一类，
// Display 文本即返回给调用方的错误信息。

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("An error occurred while fetching data: request timed out")]
    Timeout,

    #[error("An error occurred while fetching data: {0}")]
    Network(String),

    #[error("An error occurred while fetching data: upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response structure from Scryfall: {0}")]
    Malformed(String),
}

// 实现从 reqwest::Error 到 UpstreamError 的转换
impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            UpstreamError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            }
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}
