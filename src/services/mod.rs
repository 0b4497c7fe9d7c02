//! Business logic over the store abstraction and the remote domain API.

/// Credential verification and session management.
pub mod auth_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Generic remote-then-local fallback helper.
pub mod fallback;
/// Game CRUD, filters and result registration.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Third-party Pokémon API proxy.
pub mod pokemon_service;
/// Team CRUD, search and tally registration.
pub mod team_service;
