use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every outbound request, e.g. `slack-notifier/0.1.0`
pub fn user_agent() -> String {
    format!("slack-notifier/{}", crate::pkg_version())
}

/// Global HTTP client instance
///
/// This client is initialized lazily on first access and reused across the
/// application so repeated sends share pooled connections.
///
/// Per-request settings (the webhook timeout) are applied on the
/// `RequestBuilder`; the values here are ceilings for any request.
///
/// # Example
/// ```ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// let response = HTTP_CLIENT
///     .post("https://hooks.slack.com/services/T000/B000/XXXX")
///     .json(&serde_json::json!({ "text": "hi" }))
///     .send()
///     .await?;
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(120))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        // A redirected POST is replayed by reqwest as a body-less GET, so a
        // 3xx must surface as-is instead of being followed
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(user_agent())
        .build()
        .expect("Failed to build HTTP client")
});
