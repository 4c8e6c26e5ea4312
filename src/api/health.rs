use axum::Json;

use super::response::{HealthBody, MessageBody};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the MTG Deckbuilder API! Use /search to search for cards.";

/// 欢迎页
pub async fn welcome() -> Json<MessageBody> {
    Json(MessageBody {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// 健康检查端点，不访问上游
pub async fn health_check() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
