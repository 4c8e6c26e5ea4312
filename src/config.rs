// 服务配置
//
// 启动时从环境变量构建一次，随 AppState 传入各处理函数：
// - 监听地址
// - CORS 允许的来源
// - 上游 Scryfall 地址与超时
// - 分页大小
// - 校验与错误状态码策略

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// 上游失败时返回给调用方的 HTTP 状态码策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpstreamErrorStatus {
    /// 兼容旧行为：200 + `{error}` 响应体
    #[default]
    Ok,
    /// 502 Bad Gateway + `{error}` 响应体
    BadGateway,
}

impl UpstreamErrorStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" | "200" => Some(UpstreamErrorStatus::Ok),
            "bad_gateway" | "502" => Some(UpstreamErrorStatus::BadGateway),
            _ => None,
        }
    }
}

/// 分页配置
///
/// 上游每页固定返回 `upstream_page_size` 张卡牌，调用方每页 `caller_page_size` 张。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    pub caller_page_size: u32,
    pub upstream_page_size: u32,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            caller_page_size: 15,
            upstream_page_size: 175,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    /// 不含结尾斜杠
    pub scryfall_base_url: String,
    pub page_sizes: PageSizes,
    pub upstream_timeout: Duration,
    pub strict_validation: bool,
    pub upstream_error_status: UpstreamErrorStatus,
}

pub const DEFAULT_SCRYFALL_BASE_URL: &str = "https://api.scryfall.com";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            scryfall_base_url: DEFAULT_SCRYFALL_BASE_URL.to_string(),
            page_sizes: PageSizes::default(),
            upstream_timeout: Duration::from_secs(10),
            strict_validation: false,
            upstream_error_status: UpstreamErrorStatus::Ok,
        }
    }
}

impl AppConfig {
    /// 从进程环境变量读取配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，未设置的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            config.host = host.trim().to_string();
        }

        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("PORT", &port, format!("{}", e)))?;
        }

        if let Some(origins) = get("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins)?;
        }

        if let Some(base) = get("SCRYFALL_BASE_URL") {
            let url = Url::parse(base.trim())
                .map_err(|e| ConfigError::invalid("SCRYFALL_BASE_URL", &base, e.to_string()))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::invalid("SCRYFALL_BASE_URL", &base, "expected an http(s) URL"));
            }
            config.scryfall_base_url = url.as_str().trim_end_matches('/').to_string();
        }

        if let Some(size) = get("CALLER_PAGE_SIZE") {
            config.page_sizes.caller_page_size = parse_page_size("CALLER_PAGE_SIZE", &size)?;
        }

        if let Some(size) = get("UPSTREAM_PAGE_SIZE") {
            config.page_sizes.upstream_page_size = parse_page_size("UPSTREAM_PAGE_SIZE", &size)?;
        }

        if config.page_sizes.caller_page_size > config.page_sizes.upstream_page_size {
            return Err(ConfigError::invalid(
                "CALLER_PAGE_SIZE",
                &config.page_sizes.caller_page_size.to_string(),
                "must not exceed UPSTREAM_PAGE_SIZE",
            ));
        }

        if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("UPSTREAM_TIMEOUT_SECS", &secs, format!("{}", e)))?;
            if secs == 0 {
                return Err(ConfigError::invalid("UPSTREAM_TIMEOUT_SECS", "0", "must be positive"));
            }
            config.upstream_timeout = Duration::from_secs(secs);
        }

        if let Some(strict) = get("STRICT_VALIDATION") {
            config.strict_validation = parse_bool("STRICT_VALIDATION", &strict)?;
        }

        if let Some(mode) = get("UPSTREAM_ERROR_STATUS") {
            config.upstream_error_status = UpstreamErrorStatus::from_str(&mode).ok_or_else(|| {
                ConfigError::invalid("UPSTREAM_ERROR_STATUS", &mode, "expected `ok` or `bad_gateway`")
            })?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::invalid("HOST", &self.host, e.to_string()))
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut origins = Vec::new();
    for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        let url = Url::parse(origin)
            .map_err(|e| ConfigError::invalid("ALLOWED_ORIGINS", origin, e.to_string()))?;
        if url.host_str().is_none() {
            return Err(ConfigError::invalid("ALLOWED_ORIGINS", origin, "origin has no host"));
        }
        // 浏览器发送的 Origin 头不带结尾斜杠
        origins.push(url.origin().ascii_serialization());
    }
    if origins.is_empty() {
        return Err(ConfigError::invalid("ALLOWED_ORIGINS", raw, "no origins given"));
    }
    Ok(origins)
}

fn parse_page_size(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    let size: u32 = raw
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(key, raw, format!("{}", e)))?;
    if size == 0 {
        return Err(ConfigError::invalid(key, raw, "must be positive"));
    }
    Ok(size)
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw, "expected a boolean")),
    }
}
