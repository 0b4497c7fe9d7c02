use tracing::info;

use crate::{
    dto::pokemon::{PokemonPayload, PokemonSummary},
    error::AppError,
    state::SharedState,
};

/// Fetch a Pokémon by name or number and reshape it for the demo page.
///
/// Any failure surfaces as an upstream-API error carrying the called URL,
/// so the translator can map the status outward.
pub async fn fetch_pokemon(state: &SharedState, name_or_id: &str) -> Result<PokemonSummary, AppError> {
    let base = state.config().pokemon_api_url.trim_end_matches('/');
    let url = format!("{base}/pokemon/{}", name_or_id.to_lowercase());

    let response = state.http().get(&url).send().await.map_err(|err| AppError::Api {
        message: format!("failed to fetch Pokémon data: {err}"),
        url: url.clone(),
        status: None,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Api {
            message: format!("Pokémon API answered with status {status}"),
            url,
            status: Some(status.as_u16()),
        });
    }

    let payload: PokemonPayload = response.json().await.map_err(|err| AppError::Api {
        message: format!("failed to decode Pokémon data: {err}"),
        url: url.clone(),
        status: None,
    })?;

    let summary = PokemonSummary::from(payload);
    info!(pokemon = %summary.name, "fetched Pokémon data");
    Ok(summary)
}
