use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use super::response::ErrorBody;
use crate::config::UpstreamErrorStatus;
use crate::external::UpstreamError;
use crate::models::ValidationError;

/// 统一的API错误类型
///
/// 响应体统一为 `{"error": "<message>"}`。
#[derive(Debug)]
pub enum ApiError {
    /// 上游服务错误，状态码由配置决定
    Upstream {
        error: UpstreamError,
        status: UpstreamErrorStatus,
    },
    /// 参数取值错误
    Validation(ValidationError),
    /// 请求参数无法解析
    BadRequest(String),
}

impl ApiError {
    pub fn upstream(error: UpstreamError, status: UpstreamErrorStatus) -> Self {
        ApiError::Upstream { error, status }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Upstream { error, .. } => write!(f, "{}", error),
            ApiError::Validation(err) => write!(f, "{}", err),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

/// 实现IntoResponse，将错误转换为HTTP响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Upstream { error, status } => {
                tracing::error!("Upstream request failed: {}", error);
                match status {
                    UpstreamErrorStatus::Ok => StatusCode::OK,
                    UpstreamErrorStatus::BadGateway => StatusCode::BAD_GATEWAY,
                }
            }
            ApiError::Validation(err) => {
                tracing::debug!("Rejected search parameters: {}", err);
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
