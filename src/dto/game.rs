use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{dao::models::GameEntity, model::Game};

/// Payload used to schedule a new game.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    /// Home team identifier.
    #[serde(rename = "equipo_local_id")]
    pub home_team_id: Uuid,
    /// Away team identifier.
    #[serde(rename = "equipo_visitante_id")]
    pub away_team_id: Uuid,
    /// Scheduled tip-off, `YYYY-MM-DDThh:mm:ss`.
    #[serde(rename = "fecha", with = "crate::dto::iso_datetime")]
    #[schema(value_type = String, example = "2025-05-04T18:30:00")]
    pub scheduled_at: PrimitiveDateTime,
}

impl Validate for CreateGameRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.home_team_id == self.away_team_id {
            let mut err = ValidationError::new("same_team");
            err.message = Some("home and away team must be different".into());
            errors.add("equipo_visitante_id", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Final score submitted when a game ends.
///
/// Scores are unsigned on the wire, so a negative score is a decode error
/// before it ever reaches the service layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultRequest {
    /// Points scored by the home team.
    #[serde(rename = "puntos_local")]
    pub home_points: u32,
    /// Points scored by the away team.
    #[serde(rename = "puntos_visitante")]
    pub away_points: u32,
}

/// Query filters accepted by the game listing.
///
/// Filters are applied with `equipo` taking precedence over `fecha`, and
/// `fecha` over `finalizado`; without any filter the full list is returned.
#[derive(Debug, Deserialize)]
pub struct GameListQuery {
    /// Only games a given team participates in, home or away.
    pub equipo: Option<Uuid>,
    /// Only games scheduled on a given `YYYY-MM-DD` day.
    pub fecha: Option<String>,
    /// Only games with the given finished flag.
    pub finalizado: Option<bool>,
}

/// A game as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
    /// Game identifier.
    pub id: Uuid,
    /// Home team reference.
    #[serde(rename = "equipo_local_id")]
    pub home_team_id: Uuid,
    /// Away team reference.
    #[serde(rename = "equipo_visitante_id")]
    pub away_team_id: Uuid,
    /// Home score, 0 while scheduled.
    #[serde(rename = "puntos_local")]
    pub home_points: u32,
    /// Away score, 0 while scheduled.
    #[serde(rename = "puntos_visitante")]
    pub away_points: u32,
    /// Scheduled tip-off, `YYYY-MM-DDThh:mm:ss`.
    #[serde(rename = "fecha", with = "crate::dto::iso_datetime")]
    #[schema(value_type = String, example = "2025-05-04T18:30:00")]
    pub scheduled_at: PrimitiveDateTime,
    /// Whether the final score has been registered.
    #[serde(rename = "finalizado")]
    pub finished: bool,
    /// Winner, absent while scheduled or on a tie.
    #[serde(rename = "ganador_id", default)]
    pub winner_id: Option<Uuid>,
    /// Absolute point difference.
    #[serde(rename = "diferencia_puntos", default)]
    pub point_margin: u32,
}

impl From<GameEntity> for GameResponse {
    fn from(value: GameEntity) -> Self {
        let game = Game::from(value);
        Self {
            id: game.id,
            home_team_id: game.home_team_id,
            away_team_id: game.away_team_id,
            home_points: game.home_points,
            away_points: game.away_points,
            scheduled_at: game.scheduled_at,
            finished: game.finished,
            winner_id: game.winner_id(),
            point_margin: game.point_margin(),
        }
    }
}

impl From<GameResponse> for GameEntity {
    fn from(value: GameResponse) -> Self {
        Self {
            id: value.id,
            home_team_id: value.home_team_id,
            away_team_id: value.away_team_id,
            home_points: value.home_points,
            away_points: value.away_points,
            scheduled_at: value.scheduled_at,
            finished: value.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::model::Team;

    fn finished_game() -> GameEntity {
        let (mut home, mut away) = (
            Team::new("Lakers", "Los Angeles", "Redick"),
            Team::new("Celtics", "Boston", "Mazzulla"),
        );
        let mut game = Game::new(home.id, away.id, datetime!(2025-05-04 18:30:00)).unwrap();
        game.register_result(95, 88, &mut home, &mut away).unwrap();
        GameEntity::from(game)
    }

    #[test]
    fn response_derives_winner_and_margin() {
        let entity = finished_game();
        let response = GameResponse::from(entity.clone());
        assert_eq!(response.winner_id, Some(entity.home_team_id));
        assert_eq!(response.point_margin, 7);
    }

    #[test]
    fn scheduling_a_team_against_itself_fails_validation() {
        let id = Uuid::new_v4();
        let request = CreateGameRequest {
            home_team_id: id,
            away_team_id: id,
            scheduled_at: datetime!(2025-05-04 18:30:00),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn negative_scores_never_decode() {
        let body = serde_json::json!({"puntos_local": -3, "puntos_visitante": 80});
        assert!(serde_json::from_value::<ResultRequest>(body).is_err());
    }

    #[test]
    fn response_round_trips_through_the_wire() {
        let entity = finished_game();
        let encoded = serde_json::to_string(&GameResponse::from(entity.clone())).unwrap();
        let decoded: GameResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(GameEntity::from(decoded), entity);
    }
}
