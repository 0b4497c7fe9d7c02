use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_valid::Valid;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    dto::team::{CreateTeamRequest, TeamListQuery, TeamResponse, UpdateTeamRequest},
    error::AppError,
    services::team_service,
    state::SharedState,
};

/// Routes handling team CRUD, search and tally registration.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/equipos", get(list_teams).post(create_team))
        .route(
            "/api/equipos/{id}",
            get(get_team).put(update_team).delete(delete_team),
        )
        .route("/api/equipos/{id}/victoria", post(register_win))
        .route("/api/equipos/{id}/derrota", post(register_loss))
}

/// List all teams, optionally filtered by a name fragment.
#[utoipa::path(
    get,
    path = "/api/equipos",
    tag = "teams",
    params(("nombre" = Option<String>, Query, description = "Name fragment to filter by")),
    responses((status = 200, description = "Teams", body = [TeamResponse]))
)]
pub async fn list_teams(
    State(state): State<SharedState>,
    Query(query): Query<TeamListQuery>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    let teams = match query.nombre {
        Some(fragment) => team_service::search_teams(&state, fragment).await?,
        None => team_service::list_teams(&state).await?,
    };
    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

/// Register a new team.
#[utoipa::path(
    post,
    path = "/api/equipos",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses((status = 201, description = "Team created", body = TeamResponse))
)]
pub async fn create_team(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateTeamRequest>>,
) -> Result<(StatusCode, Json<TeamResponse>), AppError> {
    let created = team_service::create_team(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(TeamResponse::from(created))))
}

/// Fetch a single team.
#[utoipa::path(
    get,
    path = "/api/equipos/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Team identifier")),
    responses(
        (status = 200, description = "Team", body = TeamResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn get_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, AppError> {
    let team = team_service::get_team(&state, id).await?;
    Ok(Json(TeamResponse::from(team)))
}

/// Update a team's descriptive fields.
#[utoipa::path(
    put,
    path = "/api/equipos/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Team identifier")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn update_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdateTeamRequest>>,
) -> Result<Json<TeamResponse>, AppError> {
    let updated = team_service::update_team(&state, id, payload).await?;
    Ok(Json(TeamResponse::from(updated)))
}

/// Delete a team that no game references.
#[utoipa::path(
    delete,
    path = "/api/equipos/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Team identifier")),
    responses(
        (status = 200, description = "Team deleted"),
        (status = 404, description = "Unknown team"),
        (status = 409, description = "Team still referenced by games")
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = team_service::delete_team(&state, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("team `{id}` not found")));
    }
    Ok(Json(json!({"message": format!("team `{id}` deleted")})))
}

/// Add a win to a team's tally.
#[utoipa::path(
    post,
    path = "/api/equipos/{id}/victoria",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Team identifier")),
    responses(
        (status = 200, description = "Win registered", body = TeamResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn register_win(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, AppError> {
    let updated = team_service::register_win(&state, id).await?;
    Ok(Json(TeamResponse::from(updated)))
}

/// Add a loss to a team's tally.
#[utoipa::path(
    post,
    path = "/api/equipos/{id}/derrota",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Team identifier")),
    responses(
        (status = 200, description = "Loss registered", body = TeamResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn register_loss(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, AppError> {
    let updated = team_service::register_loss(&state, id).await?;
    Ok(Json(TeamResponse::from(updated)))
}
