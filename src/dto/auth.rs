use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Credentials submitted by the login form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    /// Account name.
    pub username: String,
    /// Plain-text password, verified against the credential backend.
    pub password: String,
}

/// Flags the login page reacts to (`?error`, `?logout`).
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Present after a failed login attempt.
    pub error: Option<String>,
    /// Present after a completed logout.
    pub logout: Option<String>,
}

/// Login page payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPage {
    /// Page title.
    pub title: String,
    /// Whether the previous attempt failed.
    pub error: bool,
    /// Whether the session was just closed.
    pub logout: bool,
}

/// Access-denied page payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessDeniedPage {
    /// Page title.
    pub title: String,
    /// Explanation shown to the user.
    pub message: String,
}
