use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::{
        pages::{ApiTestPage, SimulateErrorQuery},
        pokemon::PokemonSummary,
    },
    error::AppError,
    services::pokemon_service,
    state::SharedState,
};

/// Routes for the third-party API demo: the proxy endpoint, the demo page
/// and the error simulation hook.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/pokemon/{id}", get(get_pokemon))
        .route("/api-test", get(api_test_page))
        .route("/api-test/simulate-error", post(simulate_error))
}

/// Proxy a Pokémon lookup to the third-party API and reshape the answer.
#[utoipa::path(
    get,
    path = "/api/pokemon/{id}",
    tag = "pokemon",
    params(("id" = String, Path, description = "Pokémon name or number")),
    responses(
        (status = 200, description = "Reshaped Pokémon data", body = PokemonSummary),
        (status = 404, description = "Unknown Pokémon"),
        (status = 502, description = "Upstream failure")
    )
)]
pub async fn get_pokemon(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<PokemonSummary>, AppError> {
    let summary = pokemon_service::fetch_pokemon(&state, &id).await?;
    Ok(Json(summary))
}

/// The API demo page; requires a session.
#[utoipa::path(
    get,
    path = "/api-test",
    tag = "pokemon",
    responses((status = 200, description = "Demo page data", body = ApiTestPage))
)]
pub async fn api_test_page(State(state): State<SharedState>) -> Json<ApiTestPage> {
    Json(ApiTestPage {
        pokemon_api_url: state.config().pokemon_api_url.clone(),
        example_path: "/api/pokemon/pikachu".into(),
    })
}

/// Raise an upstream-API error on purpose to exercise the translator.
#[utoipa::path(
    post,
    path = "/api-test/simulate-error",
    tag = "pokemon",
    params(("errorCode" = Option<u16>, Query, description = "Upstream status to simulate")),
    responses((status = 502, description = "The simulated error"))
)]
pub async fn simulate_error(Query(query): Query<SimulateErrorQuery>) -> AppError {
    AppError::Api {
        message: "Simulated upstream failure for testing".into(),
        url: "https://api.example.com/simulated-error".into(),
        status: Some(query.error_code.unwrap_or(500)),
    }
}
