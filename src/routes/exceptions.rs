use axum::{Router, routing::get};

use crate::{error::AppError, state::SharedState};

/// Demo endpoints that raise each recognized error kind so the translator's
/// two renderings can be exercised end to end.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/exceptions/file", get(file_error))
        .route("/api/exceptions/database", get(database_error))
        .route("/api/exceptions/api", get(api_error))
}

/// Raise a file error.
#[utoipa::path(
    get,
    path = "/api/exceptions/file",
    tag = "exceptions",
    responses((status = 500, description = "Simulated file error"))
)]
pub async fn file_error() -> AppError {
    AppError::File {
        message: "Simulated failure reading a data file".into(),
        path: "/data/league/import.csv".into(),
    }
}

/// Raise a database error carrying a backend code.
#[utoipa::path(
    get,
    path = "/api/exceptions/database",
    tag = "exceptions",
    responses((status = 500, description = "Simulated database error"))
)]
pub async fn database_error() -> AppError {
    AppError::Database {
        message: "Simulated connection failure".into(),
        code: Some("08001".into()),
        source: None,
    }
}

/// Raise an upstream-API error.
#[utoipa::path(
    get,
    path = "/api/exceptions/api",
    tag = "exceptions",
    responses((status = 502, description = "Simulated upstream error"))
)]
pub async fn api_error() -> AppError {
    AppError::Api {
        message: "Simulated upstream failure".into(),
        url: "https://api.example.com/unstable".into(),
        status: Some(503),
    }
}
