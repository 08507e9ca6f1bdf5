use std::env;

/// Default screener backend address (the local development server).
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

const API_BASE_ENV: &str = "SCREENER_API_BASE";

/// Resolve the backend base URL from the environment, falling back to the
/// compiled default. A trailing slash is stripped so endpoint paths can be
/// appended verbatim.
pub fn api_base_url() -> String {
    let base = env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    base.trim_end_matches('/').to_string()
}
