//! Client for the remote REST counterpart of the domain API.
//!
//! When a base URL is configured, the services try these calls first and
//! fall back to the local store on any failure.

/// The reqwest-based client.
pub mod client;
/// Remote endpoint settings.
pub mod config;
/// Remote call error enum.
pub mod error;

pub use client::RemoteLeagueClient;
pub use config::RemoteConfig;
pub use error::RemoteDaoError;
