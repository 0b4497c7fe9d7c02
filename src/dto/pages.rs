use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata served by the home and about pages.
#[derive(Debug, Serialize, ToSchema)]
pub struct AppInfo {
    /// Page title.
    pub title: String,
    /// Application name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Short description of what the service manages.
    pub description: String,
}

impl AppInfo {
    /// Build the payload for a page title.
    pub fn for_page(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Basketball league management: teams, games and results".to_string(),
        }
    }
}

/// Payload backing the third-party API demo page.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiTestPage {
    /// Base URL of the Pokémon API this instance proxies.
    pub pokemon_api_url: String,
    /// Local path to try the proxy with.
    pub example_path: String,
}

/// Query accepted by the error simulation endpoint.
#[derive(Debug, Deserialize)]
pub struct SimulateErrorQuery {
    /// Upstream status code to simulate; defaults to 500.
    #[serde(rename = "errorCode")]
    pub error_code: Option<u16>,
}
