pub mod error;
pub mod health;
pub mod response;
pub mod search;
pub mod sets;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::external::CardSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub source: Arc<dyn CardSource>,
}

impl AppState {
    pub fn new(config: AppConfig, source: Arc<dyn CardSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(health::welcome))
        .route("/health", get(health::health_check))
        .route("/search", get(search::search_cards))
        .route("/sets", get(sets::get_sets))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 只允许配置中的来源，允许携带凭据
///
/// 带凭据时不能使用通配符，方法和请求头改为回显请求中的值。
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
