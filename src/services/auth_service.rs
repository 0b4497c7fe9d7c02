use std::collections::HashSet;

use axum::http::{HeaderMap, header};
use serde::Deserialize;
use tracing::{info, warn};

use crate::state::SharedState;

/// Name of the session cookie issued at login.
pub const SESSION_COOKIE: &str = "HOOPS_SESSION";

/// Roles an account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular authenticated user.
    User,
    /// Administrative user.
    Admin,
}

/// One configured account.
#[derive(Debug, Clone)]
pub struct Account {
    /// Account name.
    pub username: String,
    /// Plain-text password; this backing is a development placeholder, not
    /// a credential store.
    pub password: String,
    /// Roles granted on login.
    pub roles: HashSet<Role>,
}

/// Capability that checks credentials and yields the account's roles.
///
/// Production deployments are expected to substitute an implementation
/// backed by a real credential store.
pub trait CredentialVerifier: Send + Sync {
    /// Verify a username/password pair, returning the granted roles.
    fn verify(&self, username: &str, password: &str) -> Option<HashSet<Role>>;
}

/// In-memory [`CredentialVerifier`] over the configured account list.
pub struct InMemoryCredentials {
    accounts: Vec<Account>,
}

impl InMemoryCredentials {
    /// Build a verifier from the configured accounts.
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// The two demo accounts used when no credentials file is configured.
    pub fn demo() -> Self {
        Self::new(vec![
            Account {
                username: "user".into(),
                password: "password".into(),
                roles: HashSet::from([Role::User]),
            },
            Account {
                username: "admin".into(),
                password: "admin".into(),
                roles: HashSet::from([Role::User, Role::Admin]),
            },
        ])
    }
}

impl CredentialVerifier for InMemoryCredentials {
    fn verify(&self, username: &str, password: &str) -> Option<HashSet<Role>> {
        self.accounts
            .iter()
            .find(|account| account.username == username && account.password == password)
            .map(|account| account.roles.clone())
    }
}

/// Verify credentials and open a session, returning its cookie token.
pub fn login(state: &SharedState, username: &str, password: &str) -> Option<String> {
    match state.verifier().verify(username, password) {
        Some(roles) => {
            info!(username, "login succeeded");
            Some(state.open_session(username.to_owned(), roles))
        }
        None => {
            warn!(username, "login rejected");
            None
        }
    }
}

/// Close the session behind a token, if one is open.
pub fn logout(state: &SharedState, token: &str) -> bool {
    let closed = state.close_session(token);
    if closed {
        info!("session closed");
    }
    closed
}

/// `Set-Cookie` value that installs a session token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session token from a request's `Cookie` header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn demo_accounts_verify_with_their_roles() {
        let verifier = InMemoryCredentials::demo();

        let user_roles = verifier.verify("user", "password").unwrap();
        assert_eq!(user_roles, HashSet::from([Role::User]));

        let admin_roles = verifier.verify("admin", "admin").unwrap();
        assert_eq!(admin_roles, HashSet::from([Role::User, Role::Admin]));
    }

    #[test]
    fn wrong_credentials_are_rejected() {
        let verifier = InMemoryCredentials::demo();
        assert!(verifier.verify("user", "hunter2").is_none());
        assert!(verifier.verify("nobody", "password").is_none());
    }

    #[test]
    fn session_token_is_read_from_the_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; HOOPS_SESSION=abc123; lang=es"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_or_empty_cookie_yields_no_token() {
        let headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        let mut empty = HeaderMap::new();
        empty.insert(header::COOKIE, HeaderValue::from_static("HOOPS_SESSION="));
        assert_eq!(token_from_headers(&empty), None);
    }

    #[test]
    fn role_names_parse_uppercase() {
        let roles: Vec<Role> = serde_json::from_str(r#"["USER", "ADMIN"]"#).unwrap();
        assert_eq!(roles, vec![Role::User, Role::Admin]);
    }
}
