//! Data access layer: the store abstraction, its MongoDB backend, and the
//! HTTP client for the remote counterpart of the domain API.

/// Store abstraction and backends for teams and games.
pub mod league_store;
/// Persisted entity representations of the domain model.
pub mod models;
/// HTTP client for the remote domain API.
pub mod remote;
/// Backend-independent storage error type.
pub mod storage;
