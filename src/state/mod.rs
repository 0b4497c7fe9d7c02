//! Central application state shared by every request handler.

use std::{collections::HashSet, sync::Arc};

use dashmap::DashMap;
use tokio::sync::{RwLock, watch};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::{league_store::LeagueStore, remote::RemoteLeagueClient},
    error::ServiceError,
    services::auth_service::{CredentialVerifier, Role},
};

/// Cheaply cloneable handle to the application state.
pub type SharedState = Arc<AppState>;

/// An authenticated session held in the in-process registry.
#[derive(Debug, Clone)]
pub struct Session {
    /// Account the session belongs to.
    pub username: String,
    /// Roles granted at login.
    pub roles: HashSet<Role>,
}

/// Central application state storing the installed store, the session
/// registry and the optional remote API client.
pub struct AppState {
    store: RwLock<Option<Arc<dyn LeagueStore>>>,
    degraded: watch::Sender<bool>,
    sessions: DashMap<String, Session>,
    remote: Option<Arc<RemoteLeagueClient>>,
    verifier: Arc<dyn CredentialVerifier>,
    http: reqwest::Client,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(
        config: AppConfig,
        verifier: Arc<dyn CredentialVerifier>,
        remote: Option<Arc<RemoteLeagueClient>>,
        http: reqwest::Client,
    ) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            store: RwLock::new(None),
            degraded: degraded_tx,
            sessions: DashMap::new(),
            remote,
            verifier,
            http,
            config,
        })
    }

    /// Obtain a handle to the current store, if one is installed.
    pub async fn store(&self) -> Option<Arc<dyn LeagueStore>> {
        let guard = self.store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the current store or fail with a degraded-mode error.
    pub async fn require_store(&self) -> Result<Arc<dyn LeagueStore>, ServiceError> {
        self.store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new store implementation and leave degraded mode.
    pub async fn install_store(&self, store: Arc<dyn LeagueStore>) {
        {
            let mut guard = self.store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_store(&self) {
        {
            let mut guard = self.store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.store.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Registry of active sessions keyed by their opaque token.
    pub fn sessions(&self) -> &DashMap<String, Session> {
        &self.sessions
    }

    /// Remote domain API client, when one is configured.
    pub fn remote(&self) -> Option<Arc<RemoteLeagueClient>> {
        self.remote.clone()
    }

    /// Shared HTTP client for third-party calls.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Credential verification capability used by the login flow.
    pub fn verifier(&self) -> &Arc<dyn CredentialVerifier> {
        &self.verifier
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Update and broadcast the degraded flag when the value changes.
    async fn update_degraded(&self, value: bool) {
        if self.is_degraded().await == value {
            return;
        }

        let _ = self.degraded.send(value);
    }

    /// Create a session for a verified login and return its token.
    pub fn open_session(&self, username: String, roles: HashSet<Role>) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), Session { username, roles });
        token
    }

    /// Look up a session by token.
    pub fn session(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    /// Drop a session, returning whether one existed.
    pub fn close_session(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}
