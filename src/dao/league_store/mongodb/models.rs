use std::time::SystemTime;

use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

use crate::dao::models::{GameEntity, TeamEntity};

/// BSON document shape of a persisted team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    name: String,
    city: String,
    coach: String,
    wins: u32,
    losses: u32,
}

impl From<TeamEntity> for TeamDocument {
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

impl From<TeamDocument> for TeamEntity {
    fn from(value: TeamDocument) -> Self {
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

/// BSON document shape of a persisted game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    home_points: u32,
    away_points: u32,
    scheduled_at: DateTime,
    finished: bool,
}

impl From<GameEntity> for GameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: value.id,
            home_team_id: value.home_team_id,
            away_team_id: value.away_team_id,
            home_points: value.home_points,
            away_points: value.away_points,
            scheduled_at: bson_datetime(value.scheduled_at),
            finished: value.finished,
        }
    }
}

impl From<GameDocument> for GameEntity {
    fn from(value: GameDocument) -> Self {
        Self {
            id: value.id,
            home_team_id: value.home_team_id,
            away_team_id: value.away_team_id,
            home_points: value.home_points,
            away_points: value.away_points,
            scheduled_at: wire_datetime(value.scheduled_at),
            finished: value.finished,
        }
    }
}

/// Wall-clock timestamps are stored as UTC BSON datetimes.
pub fn bson_datetime(value: PrimitiveDateTime) -> DateTime {
    DateTime::from_system_time(SystemTime::from(value.assume_utc()))
}

fn wire_datetime(value: DateTime) -> PrimitiveDateTime {
    let utc = OffsetDateTime::from(value.to_system_time());
    PrimitiveDateTime::new(utc.date(), utc.time())
}

pub(super) fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

/// Primary-key filter for a uuid-keyed collection.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}

/// Escape a user-supplied fragment so it matches literally inside a regex.
pub fn escape_regex(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if r"\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn datetime_round_trips_through_bson() {
        let scheduled = datetime!(2025-05-04 18:30:00);
        assert_eq!(wire_datetime(bson_datetime(scheduled)), scheduled);
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        assert_eq!(escape_regex("a.b*c"), r"a\.b\*c");
        assert_eq!(escape_regex("(lakers)"), r"\(lakers\)");
        assert_eq!(escape_regex("plain"), "plain");
    }

    #[test]
    fn game_document_round_trips() {
        let entity = GameEntity {
            id: Uuid::new_v4(),
            home_team_id: Uuid::new_v4(),
            away_team_id: Uuid::new_v4(),
            home_points: 95,
            away_points: 88,
            scheduled_at: datetime!(2025-05-04 18:30:00),
            finished: true,
        };
        let round_tripped: GameEntity = GameDocument::from(entity.clone()).into();
        assert_eq!(round_tripped, entity);
    }
}
