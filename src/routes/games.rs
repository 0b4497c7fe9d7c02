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
    dto::{
        game::{CreateGameRequest, GameListQuery, GameResponse, ResultRequest},
        parse_wire_date,
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes handling game CRUD, filters and result registration.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/partidos", get(list_games).post(create_game))
        .route("/api/partidos/{id}", get(get_game).delete(delete_game))
        .route("/api/partidos/{id}/resultado", post(register_result))
}

/// List games, optionally filtered by participant, day or finished flag.
#[utoipa::path(
    get,
    path = "/api/partidos",
    tag = "games",
    params(
        ("equipo" = Option<Uuid>, Query, description = "Only games this team plays in"),
        ("fecha" = Option<String>, Query, description = "Only games on this YYYY-MM-DD day"),
        ("finalizado" = Option<bool>, Query, description = "Only games with this finished flag"),
    ),
    responses((status = 200, description = "Games", body = [GameResponse]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
    Query(query): Query<GameListQuery>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let games = if let Some(team_id) = query.equipo {
        game_service::games_by_team(&state, team_id).await?
    } else if let Some(day) = query.fecha {
        let day = parse_wire_date(&day)
            .map_err(|_| AppError::BadRequest(format!("`{day}` is not a YYYY-MM-DD date")))?;
        game_service::games_on_day(&state, day).await?
    } else if let Some(finished) = query.finalizado {
        game_service::games_by_finished(&state, finished).await?
    } else {
        game_service::list_games(&state).await?
    };

    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

/// Schedule a new game between two distinct teams.
#[utoipa::path(
    post,
    path = "/api/partidos",
    tag = "games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game scheduled", body = GameResponse),
        (status = 400, description = "Identical teams or malformed date"),
        (status = 404, description = "Unknown participant")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateGameRequest>>,
) -> Result<(StatusCode, Json<GameResponse>), AppError> {
    let created = game_service::create_game(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(GameResponse::from(created))))
}

/// Fetch a single game.
#[utoipa::path(
    get,
    path = "/api/partidos/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game", body = GameResponse),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResponse>, AppError> {
    let game = game_service::get_game(&state, id).await?;
    Ok(Json(GameResponse::from(game)))
}

/// Register the final score of a scheduled game.
#[utoipa::path(
    post,
    path = "/api/partidos/{id}/resultado",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    request_body = ResultRequest,
    responses(
        (status = 200, description = "Result registered", body = GameResponse),
        (status = 404, description = "Unknown game"),
        (status = 409, description = "Game already finished")
    )
)]
pub async fn register_result(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResultRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let finished = game_service::register_result(&state, id, payload).await?;
    Ok(Json(GameResponse::from(finished)))
}

/// Delete a game.
#[utoipa::path(
    delete,
    path = "/api/partidos/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game deleted"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = game_service::delete_game(&state, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("game `{id}` not found")));
    }
    Ok(Json(json!({"message": format!("game `{id}` deleted")})))
}
