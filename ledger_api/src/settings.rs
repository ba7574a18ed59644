use std::time::Duration;

/// How to reach the backend.  This is injected into the request client when
/// it is created, so that several clients with different settings can
/// coexist (tests for instance).
#[derive(Clone, Debug)]
pub struct ClientSettings {
    /// Prefixed to every relative path.  No trailing slash, since paths
    /// start with one.
    pub base_url: String,

    /// Maximum duration of a single call, including reading the body.
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
