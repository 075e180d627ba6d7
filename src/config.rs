use crate::window::{DEFAULT_DAYS, WeekStart};
use std::{env, str::FromStr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USERNAME: &str = "octocat";
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 3;

/// Settings for the GraphQL proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub github_token: Option<String>,
    pub cache_ttl_seconds: u64,
    pub github_api_url: String,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self {
            github_token: env::var("GITHUB_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            cache_ttl_seconds: parse_var("CACHE_TTL_SECONDS", DEFAULT_CACHE_TTL_SECONDS),
            github_api_url: github_api_url(),
        }
    }
}

/// Settings for one calendar widget. Immutable once built.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub username: String,
    pub week_start: WeekStart,
    pub days_to_show: i64,
    pub per_page: u32,
    pub max_pages: u32,
    pub proxy_base_url: String,
    pub github_api_url: String,
}

impl WidgetConfig {
    pub fn from_env(port: u16) -> Self {
        Self {
            username: env::var("CALENDAR_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.to_string()),
            week_start: parse_var("CALENDAR_WEEK_START", WeekStart::Sunday),
            days_to_show: parse_var("CALENDAR_DAYS", DEFAULT_DAYS),
            per_page: parse_var("EVENTS_PER_PAGE", DEFAULT_PER_PAGE).max(1),
            max_pages: parse_var("EVENTS_MAX_PAGES", DEFAULT_MAX_PAGES),
            proxy_base_url: env::var("PROXY_BASE_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{port}/api/contributions")),
            github_api_url: github_api_url(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            week_start: WeekStart::Sunday,
            days_to_show: DEFAULT_DAYS,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            proxy_base_url: format!("http://127.0.0.1:{DEFAULT_PORT}/api/contributions"),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
        }
    }
}

pub fn resolve_port() -> u16 {
    parse_var("PORT", DEFAULT_PORT)
}

fn github_api_url() -> String {
    env::var("GITHUB_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("ignoring invalid {name}={value:?}");
                default
            }
        },
        Err(_) => default,
    }
}
