use std::time::Duration;

/// Settings for the remote domain API client.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the remote API, e.g. `http://localhost:5000/api`.
    pub base_url: String,
    /// Upper bound on any single remote call, connect included.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Default bound on remote calls; a hanging counterpart must never
    /// stall a request beyond this.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

    /// Build a config with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}
