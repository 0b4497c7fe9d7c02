use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The slice of the third-party Pokémon payload this service cares about.
///
/// Strict by design: a shape mismatch is a decode error, not a silently
/// defaulted field.
#[derive(Debug, Deserialize)]
pub struct PokemonPayload {
    /// Pokédex number.
    pub id: u32,
    /// Lower-case species name.
    pub name: String,
    /// Height in decimetres, as the API reports it.
    pub height: u32,
    /// Weight in hectograms, as the API reports it.
    pub weight: u32,
    /// Type slots in slot order.
    pub types: Vec<TypeSlot>,
    /// Sprite links.
    pub sprites: Sprites,
}

/// One entry of the `types` array.
#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    /// The named type resource.
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// A `{name, url}` reference as the Pokémon API represents them.
#[derive(Debug, Deserialize)]
pub struct NamedResource {
    /// Resource name.
    pub name: String,
}

/// Sprite links; only the default front sprite is exposed.
#[derive(Debug, Deserialize)]
pub struct Sprites {
    /// Default front sprite, when the API has one.
    pub front_default: Option<String>,
}

/// Reshaped Pokémon data returned by the proxy endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct PokemonSummary {
    /// Pokédex number.
    pub id: u32,
    /// Species name.
    pub name: String,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Type names in slot order.
    pub types: Vec<String>,
    /// Default front sprite URL, if any.
    pub image: Option<String>,
}

impl From<PokemonPayload> for PokemonSummary {
    fn from(value: PokemonPayload) -> Self {
        Self {
            id: value.id,
            name: value.name,
            height: value.height,
            weight: value.weight,
            types: value.types.into_iter().map(|slot| slot.kind.name).collect(),
            image: value.sprites.front_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshapes_the_documented_fields() {
        let body = serde_json::json!({
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "types": [
                {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
            ],
            "sprites": {"front_default": "https://example.test/pikachu.png", "back_default": null},
            "base_experience": 112
        });

        let payload: PokemonPayload = serde_json::from_value(body).unwrap();
        let summary = PokemonSummary::from(payload);

        assert_eq!(summary.id, 25);
        assert_eq!(summary.name, "pikachu");
        assert_eq!(summary.types, vec!["electric".to_string()]);
        assert_eq!(summary.image.as_deref(), Some("https://example.test/pikachu.png"));
    }

    #[test]
    fn missing_core_fields_are_a_decode_error() {
        let body = serde_json::json!({"name": "missingno"});
        assert!(serde_json::from_value::<PokemonPayload>(body).is_err());
    }
}
