//! Application-level configuration loading, including the demo account set.

use std::{collections::HashSet, env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::services::auth_service::{Account, Role};

/// Default location on disk where the server looks for the credentials file.
const DEFAULT_CREDENTIALS_PATH: &str = "config/users.json";
/// Environment variable that overrides [`DEFAULT_CREDENTIALS_PATH`].
const CREDENTIALS_PATH_ENV: &str = "HOOPS_CREDENTIALS_PATH";
/// Default base URL of the third-party Pokémon API.
const DEFAULT_POKEMON_API_URL: &str = "https://pokeapi.co/api/v2";
/// Default origin allowed to make credentialed cross-origin calls.
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5000";

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MongoDB connection URI.
    pub mongo_uri: String,
    /// MongoDB database name override.
    pub mongo_db: Option<String>,
    /// Base URL of the remote domain API; absent disables the
    /// remote-preferring behavior entirely.
    pub remote_api_url: Option<String>,
    /// Upper bound on any outbound HTTP call.
    pub http_timeout: Duration,
    /// Base URL of the third-party Pokémon API.
    pub pokemon_api_url: String,
    /// Origin allowed to make credentialed cross-origin calls.
    pub cors_allowed_origin: String,
    /// Accounts accepted by the login flow.
    pub accounts: Vec<Account>,
}

impl AppConfig {
    /// Load the configuration from the environment, pulling accounts from
    /// the optional credentials file.
    pub fn load() -> Self {
        let mongo_uri =
            env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
        let mongo_db = env::var("MONGO_DB").ok();
        let remote_api_url = env::var("REMOTE_API_URL").ok().filter(|url| !url.is_empty());
        let http_timeout = env::var("REMOTE_API_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(3000));
        let pokemon_api_url =
            env::var("POKEMON_API_URL").unwrap_or_else(|_| DEFAULT_POKEMON_API_URL.into());
        let cors_allowed_origin =
            env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.into());

        Self {
            mongo_uri,
            mongo_db,
            remote_api_url,
            http_timeout,
            pokemon_api_url,
            cors_allowed_origin,
            accounts: load_accounts(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mongo_uri: "mongodb://localhost:27017".into(),
            mongo_db: None,
            remote_api_url: None,
            http_timeout: Duration::from_millis(3000),
            pokemon_api_url: DEFAULT_POKEMON_API_URL.into(),
            cors_allowed_origin: DEFAULT_CORS_ORIGIN.into(),
            accounts: default_accounts(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of one account inside the credentials file.
struct RawAccount {
    username: String,
    password: String,
    roles: Vec<Role>,
}

impl From<RawAccount> for Account {
    fn from(value: RawAccount) -> Self {
        Self {
            username: value.username,
            password: value.password,
            roles: value.roles.into_iter().collect(),
        }
    }
}

/// Load accounts from disk, falling back to the baked-in demo pair.
fn load_accounts() -> Vec<Account> {
    let path = resolve_credentials_path();
    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<Vec<RawAccount>>(&contents) {
            Ok(raw) => {
                let accounts: Vec<Account> = raw.into_iter().map(Into::into).collect();
                info!(
                    path = %path.display(),
                    count = accounts.len(),
                    "loaded accounts from credentials file"
                );
                accounts
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse credentials file; falling back to demo accounts"
                );
                default_accounts()
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "credentials file not found; using demo accounts"
            );
            default_accounts()
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read credentials file; falling back to demo accounts"
            );
            default_accounts()
        }
    }
}

/// Resolve the credentials path taking the environment override into account.
fn resolve_credentials_path() -> PathBuf {
    env::var_os(CREDENTIALS_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH))
}

/// The two demo accounts shipped with the binary; a placeholder for a real
/// credential store.
fn default_accounts() -> Vec<Account> {
    vec![
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
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_accounts_parse_with_their_roles() {
        let raw: Vec<RawAccount> = serde_json::from_str(
            r#"[
                {"username": "scout", "password": "s3cret", "roles": ["USER"]},
                {"username": "boss", "password": "s3cret", "roles": ["USER", "ADMIN"]}
            ]"#,
        )
        .unwrap();

        let accounts: Vec<Account> = raw.into_iter().map(Into::into).collect();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].roles, HashSet::from([Role::User]));
        assert_eq!(accounts[1].roles, HashSet::from([Role::User, Role::Admin]));
    }

    #[test]
    fn malformed_roles_are_a_parse_error() {
        let outcome = serde_json::from_str::<Vec<RawAccount>>(
            r#"[{"username": "x", "password": "y", "roles": ["OVERLORD"]}]"#,
        );
        assert!(outcome.is_err());
    }

    #[test]
    fn default_accounts_are_the_demo_pair() {
        let accounts = default_accounts();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].username, "user");
        assert_eq!(accounts[1].username, "admin");
    }
}
