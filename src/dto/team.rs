use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{dao::models::TeamEntity, model::Team};

/// Payload used to register a brand-new team.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    /// Official team name.
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "team name must not be empty"))]
    pub name: String,
    /// Home city.
    #[serde(rename = "ciudad")]
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
    /// Head coach.
    #[serde(rename = "entrenador")]
    #[validate(length(min = 1, message = "coach must not be empty"))]
    pub coach: String,
}

/// Partial update of a team's descriptive fields; the tally is untouchable.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateTeamRequest {
    /// New team name, if changing.
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "team name must not be empty"))]
    pub name: Option<String>,
    /// New city, if changing.
    #[serde(rename = "ciudad", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: Option<String>,
    /// New coach, if changing.
    #[serde(rename = "entrenador", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "coach must not be empty"))]
    pub coach: Option<String>,
}

/// Query filters accepted by the team listing.
#[derive(Debug, Deserialize)]
pub struct TeamListQuery {
    /// Substring to match against team names, case-insensitively.
    pub nombre: Option<String>,
}

/// A team as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    /// Team identifier.
    pub id: Uuid,
    /// Official team name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Home city.
    #[serde(rename = "ciudad")]
    pub city: String,
    /// Head coach.
    #[serde(rename = "entrenador")]
    pub coach: String,
    /// Wins this season.
    #[serde(rename = "victorias")]
    pub wins: u32,
    /// Losses this season.
    #[serde(rename = "derrotas")]
    pub losses: u32,
    /// Fraction of played games won, 0 when none played.
    #[serde(rename = "porcentaje_victorias", default)]
    pub win_ratio: f64,
}

impl From<TeamEntity> for TeamResponse {
    fn from(value: TeamEntity) -> Self {
        let team = Team::from(value);
        Self {
            id: team.id,
            win_ratio: team.win_ratio(),
            name: team.name,
            city: team.city,
            coach: team.coach,
            wins: team.wins,
            losses: team.losses,
        }
    }
}

impl From<TeamResponse> for TeamEntity {
    fn from(value: TeamResponse) -> Self {
        Self {
            id: value.id,
            name: value.name,
            city: value.city,
            coach: value.coach,
            wins: value.wins,
            losses: value.losses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_carries_the_win_ratio() {
        let mut team = Team::new("Bulls", "Chicago", "Donovan");
        team.register_win();
        team.register_loss();

        let response = TeamResponse::from(TeamEntity::from(team));
        assert_eq!(response.win_ratio, 0.5);
    }

    #[test]
    fn wire_fields_use_the_domain_api_names() {
        let team = Team::new("Lakers", "Los Angeles", "Redick");
        let encoded = serde_json::to_value(TeamResponse::from(TeamEntity::from(team))).unwrap();

        assert!(encoded.get("nombre").is_some());
        assert!(encoded.get("ciudad").is_some());
        assert!(encoded.get("entrenador").is_some());
        assert!(encoded.get("victorias").is_some());
        assert!(encoded.get("porcentaje_victorias").is_some());
    }

    #[test]
    fn decoding_rejects_a_shape_mismatch() {
        let missing_city = serde_json::json!({
            "id": Uuid::new_v4(),
            "nombre": "Lakers",
            "entrenador": "Redick",
            "victorias": 0,
            "derrotas": 0,
        });
        assert!(serde_json::from_value::<TeamResponse>(missing_city).is_err());
    }
}
