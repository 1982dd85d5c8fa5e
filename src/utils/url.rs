//! Joining configured base URLs with API paths.

/// Strip every trailing slash from `base_url`.
///
/// ```
/// use resdeck::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://api.groq.com/openai/v1/"), "https://api.groq.com/openai/v1");
/// assert_eq!(normalize_base_url("http://localhost:8080///"), "http://localhost:8080");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join `base_url` and `endpoint` with exactly one slash between them.
///
/// ```
/// use resdeck::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://api.groq.com/openai/v1/", "/chat/completions"),
///     "https://api.groq.com/openai/v1/chat/completions"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        normalize_base_url(base_url),
        endpoint.trim_start_matches('/')
    )
}
