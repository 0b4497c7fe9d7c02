//! Error taxonomy and the global translator that renders every failure as
//! either a structured JSON body (programmatic callers) or a small error
//! page (browser callers).

use axum::{
    Json,
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::error;
use uuid::Uuid;

use crate::dao::storage::StorageError;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend failed mid-operation.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Operation conflicts with existing records.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The game already has a registered result.
    #[error("game `{id}` is already finished")]
    AlreadyFinished {
        /// Identifier of the finished game.
        id: Uuid,
    },
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

/// Application-level errors the translator knows how to render.
#[derive(Debug, Error)]
pub enum AppError {
    /// Filesystem failure with the offending path attached.
    #[error("file error: {message}")]
    File {
        /// Human-readable description.
        message: String,
        /// Path involved in the failure.
        path: String,
    },
    /// Storage failure, optionally carrying a backend error code.
    #[error("database error: {message}")]
    Database {
        /// Human-readable description.
        message: String,
        /// Backend error code, when the driver reported one.
        code: Option<String>,
        /// Underlying failure, kept for the log.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// Upstream API failure with the called URL attached.
    #[error("API error: {message}")]
    Api {
        /// Human-readable description.
        message: String,
        /// URL of the upstream call.
        url: String,
        /// Status the upstream answered with, if it answered at all.
        status: Option<u16>,
    },
    /// Invalid request parameters.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Missing or invalid session.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with the current state of a record.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Anything the other kinds do not cover.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::Database {
                message: source.to_string(),
                code: None,
                source: Some(Box::new(source)),
            },
            ServiceError::Degraded => AppError::Database {
                message: "storage unavailable (degraded mode)".into(),
                code: None,
                source: None,
            },
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Conflict(message) => AppError::Conflict(message),
            ServiceError::AlreadyFinished { id } => {
                AppError::Conflict(format!("game `{id}` is already finished"))
            }
        }
    }
}

/// Outward status for an upstream-API failure.
///
/// 404 passes through, auth failures collapse to 403, and everything else
/// (a missing status included) reads as a bad gateway.
fn upstream_status(status: Option<u16>) -> StatusCode {
    match status {
        Some(404) => StatusCode::NOT_FOUND,
        Some(401) | Some(403) => StatusCode::FORBIDDEN,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl AppError {
    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::File { .. } | AppError::Database { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Api { status, .. } => upstream_status(*status),
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// Short kind label used as the JSON `error` field and the page title.
    fn title(&self) -> &'static str {
        match self {
            AppError::File { .. } => "File error",
            AppError::Database { .. } => "Database error",
            AppError::Api { .. } => "API error",
            AppError::BadRequest(_) => "Invalid request",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::NotFound(_) => "Not found",
            AppError::Conflict(_) => "Conflict",
            AppError::Internal(_) => "Unexpected error",
        }
    }

    /// Structured JSON body with the per-kind context fields.
    fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("error".into(), json!(self.title()));
        match self {
            AppError::File { message, path } => {
                body.insert("message".into(), json!(message));
                body.insert("file".into(), json!(path));
            }
            AppError::Database { message, code, .. } => {
                body.insert("message".into(), json!(message));
                if let Some(code) = code {
                    body.insert("sqlCode".into(), json!(code));
                }
            }
            AppError::Api {
                message,
                url,
                status,
            } => {
                body.insert("message".into(), json!(message));
                body.insert("apiUrl".into(), json!(url));
                if let Some(status) = status {
                    body.insert("statusCode".into(), json!(status));
                }
            }
            AppError::BadRequest(message)
            | AppError::Unauthorized(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::Internal(message) => {
                body.insert("message".into(), json!(message));
            }
        }
        Value::Object(body)
    }

    /// Secondary detail line shown on the error page.
    fn detail(&self) -> Option<String> {
        match self {
            AppError::File { path, .. } => Some(format!("File: {path}")),
            AppError::Database { code: Some(code), .. } => Some(format!("SQL: {code}")),
            AppError::Api { url, status, .. } => Some(match status {
                Some(status) => format!("API: {url}, status: {status}"),
                None => format!("API: {url}"),
            }),
            _ => None,
        }
    }
}

/// Error view data attached to the JSON response so the browser middleware
/// can re-render it as a page.
#[derive(Debug, Clone)]
pub struct ErrorView {
    /// Page title.
    pub title: String,
    /// Main message line.
    pub message: String,
    /// Optional context line (path, SQL code, upstream URL).
    pub detail: Option<String>,
    /// HTTP status the error rendered with.
    pub status: StatusCode,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = ?self, "request failed");

        let status = self.status();
        let view = ErrorView {
            title: self.title().to_string(),
            message: self.to_string(),
            detail: self.detail(),
            status,
        };

        let mut response = (status, Json(self.body())).into_response();
        response.extensions_mut().insert(view);
        response
    }
}

/// Whether the request looks script-originated: it either carries the AJAX
/// marker header or explicitly accepts a JSON response.
pub fn is_programmatic(headers: &HeaderMap) -> bool {
    let marked = headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"));

    let accepts_json = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"));

    marked || accepts_json
}

/// Response-mapping middleware: errors keep their JSON body for programmatic
/// callers and are re-rendered as a small HTML page for everyone else.
pub async fn render_error_views(request: Request, next: Next) -> Response {
    let programmatic = is_programmatic(request.headers());
    let response = next.run(request).await;

    if programmatic {
        return response;
    }

    let Some(view) = response.extensions().get::<ErrorView>().cloned() else {
        return response;
    };

    (view.status, Html(render_error_page(&view))).into_response()
}

fn render_error_page(view: &ErrorView) -> String {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".into());
    let detail = view
        .detail
        .as_deref()
        .map(|detail| format!("<p class=\"detail\">{detail}</p>"))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n<p>{message}</p>\n{detail}\n\
         <p class=\"meta\">Status {status} &middot; {timestamp}</p>\n</body>\n</html>\n",
        title = view.title,
        message = view.message,
        status = view.status.as_u16(),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn upstream_statuses_map_to_the_outward_codes() {
        assert_eq!(upstream_status(Some(404)), StatusCode::NOT_FOUND);
        assert_eq!(upstream_status(Some(401)), StatusCode::FORBIDDEN);
        assert_eq!(upstream_status(Some(403)), StatusCode::FORBIDDEN);
        assert_eq!(upstream_status(Some(500)), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream_status(Some(503)), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream_status(Some(418)), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream_status(None), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn programmatic_detection_honors_the_marker_header() {
        let mut headers = HeaderMap::new();
        assert!(!is_programmatic(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        assert!(is_programmatic(&headers));
    }

    #[test]
    fn programmatic_detection_honors_json_accept() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain"),
        );
        assert!(is_programmatic(&headers));

        let mut html_only = HeaderMap::new();
        html_only.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        assert!(!is_programmatic(&html_only));
    }

    #[test]
    fn database_errors_expose_their_code() {
        let err = AppError::Database {
            message: "insert failed".into(),
            code: Some("08001".into()),
            source: None,
        };
        let body = err.body();
        assert_eq!(body["error"], "Database error");
        assert_eq!(body["sqlCode"], "08001");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_errors_carry_url_and_status() {
        let err = AppError::Api {
            message: "boom".into(),
            url: "https://api.example.test/x".into(),
            status: Some(404),
        };
        let body = err.body();
        assert_eq!(body["apiUrl"], "https://api.example.test/x");
        assert_eq!(body["statusCode"], 404);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_finished_maps_to_conflict() {
        let id = Uuid::new_v4();
        let app: AppError = ServiceError::AlreadyFinished { id }.into();
        assert_eq!(app.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_passes_through_unwrapped() {
        let app: AppError = ServiceError::NotFound("team `x` not found".into()).into();
        assert_eq!(app.status(), StatusCode::NOT_FOUND);
        assert_eq!(app.body()["error"], "Not found");
    }

    #[test]
    fn error_page_includes_title_message_and_status() {
        let page = render_error_page(&ErrorView {
            title: "Database error".into(),
            message: "insert failed".into(),
            detail: Some("SQL: 08001".into()),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        });
        assert!(page.contains("<h1>Database error</h1>"));
        assert!(page.contains("insert failed"));
        assert!(page.contains("SQL: 08001"));
        assert!(page.contains("Status 500"));
    }
}
