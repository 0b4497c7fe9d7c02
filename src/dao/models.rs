use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::model::{Game, Team};

/// Persisted representation of a [`Team`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntity {
    /// Identifier, used as the primary key.
    pub id: Uuid,
    /// Team name.
    pub name: String,
    /// Home city.
    pub city: String,
    /// Head coach.
    pub coach: String,
    /// Wins this season.
    pub wins: u32,
    /// Losses this season.
    pub losses: u32,
}

impl From<Team> for TeamEntity {
    fn from(value: Team) -> Self {
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

impl From<TeamEntity> for Team {
    fn from(value: TeamEntity) -> Self {
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

/// Persisted representation of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEntity {
    /// Identifier, used as the primary key.
    pub id: Uuid,
    /// Home team reference.
    pub home_team_id: Uuid,
    /// Away team reference.
    pub away_team_id: Uuid,
    /// Home score, 0 while scheduled.
    pub home_points: u32,
    /// Away score, 0 while scheduled.
    pub away_points: u32,
    /// Scheduled tip-off.
    pub scheduled_at: PrimitiveDateTime,
    /// Whether the final score has been registered.
    pub finished: bool,
}

impl From<Game> for GameEntity {
    fn from(value: Game) -> Self {
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

impl From<GameEntity> for Game {
    fn from(value: GameEntity) -> Self {
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
