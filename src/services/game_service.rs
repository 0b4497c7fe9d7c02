use time::{Date, PrimitiveDateTime, Time, macros::time};
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{GameEntity, TeamEntity},
    dto::game::{CreateGameRequest, ResultRequest},
    error::ServiceError,
    model::{Game, GameError, Team},
    services::{fallback::remote_first, team_service},
    state::SharedState,
};

fn game_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("game `{id}` not found"))
}

/// Inclusive bounds of a calendar day: `[00:00:00, 23:59:59]`.
pub(crate) fn day_bounds(day: Date) -> (PrimitiveDateTime, PrimitiveDateTime) {
    (
        PrimitiveDateTime::new(day, Time::MIDNIGHT),
        PrimitiveDateTime::new(day, time!(23:59:59)),
    )
}

/// All games, remote-preferring.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameEntity>, ServiceError> {
    remote_first(
        "list games",
        state.remote().map(|remote| async move { remote.list_games().await }),
        || async {
            let store = state.require_store().await?;
            Ok(store.list_games().await?)
        },
    )
    .await
}

/// A single game by id, remote-preferring; missing ids are a not-found error.
pub async fn get_game(state: &SharedState, id: Uuid) -> Result<GameEntity, ServiceError> {
    let found = remote_first(
        "get game",
        state
            .remote()
            .map(|remote| async move { remote.get_game(id).await.map(Some) }),
        || async {
            let store = state.require_store().await?;
            Ok(store.find_game(id).await?)
        },
    )
    .await?;

    found.ok_or_else(|| game_not_found(id))
}

/// Games a team participates in, home or away.
pub async fn games_by_team(
    state: &SharedState,
    team_id: Uuid,
) -> Result<Vec<GameEntity>, ServiceError> {
    let store = state.require_store().await?;
    Ok(store.games_by_team(team_id).await?)
}

/// Games scheduled within a calendar day.
pub async fn games_on_day(state: &SharedState, day: Date) -> Result<Vec<GameEntity>, ServiceError> {
    let store = state.require_store().await?;
    let (start, end) = day_bounds(day);
    Ok(store.games_between(start, end).await?)
}

/// Games filtered by their finished flag.
pub async fn games_by_finished(
    state: &SharedState,
    finished: bool,
) -> Result<Vec<GameEntity>, ServiceError> {
    let store = state.require_store().await?;
    Ok(store.games_by_finished(finished).await?)
}

/// Schedule a game between two existing, distinct teams; remote-preferring.
pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameEntity, ServiceError> {
    if request.home_team_id == request.away_team_id {
        return Err(ServiceError::InvalidInput(
            "home and away team must be different".into(),
        ));
    }

    // Both participants must resolve before anything is scheduled.
    let home = team_service::get_team(state, request.home_team_id).await?;
    let away = team_service::get_team(state, request.away_team_id).await?;

    let remote_request = request.clone();
    let created = remote_first(
        "create game",
        state
            .remote()
            .map(|remote| async move { remote.create_game(&remote_request).await }),
        || async {
            let store = state.require_store().await?;
            let game = Game::new(home.id, away.id, request.scheduled_at)
                .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;
            let entity = GameEntity::from(game);
            store.save_game(entity.clone()).await?;
            Ok(entity)
        },
    )
    .await?;

    info!(
        id = %created.id,
        home = %home.name,
        away = %away.name,
        "game scheduled"
    );
    Ok(created)
}

/// Register a final score, remote-preferring.
///
/// The local path owns the full transition: the game must exist and still be
/// scheduled, the score lands on the game, and both teams' tallies are
/// persisted through the same operation.
pub async fn register_result(
    state: &SharedState,
    id: Uuid,
    request: ResultRequest,
) -> Result<GameEntity, ServiceError> {
    let remote_request = request.clone();
    let finished = remote_first(
        "register result",
        state
            .remote()
            .map(|remote| async move { remote.register_result(id, &remote_request).await }),
        || async { register_result_locally(state, id, &request).await },
    )
    .await?;

    info!(
        %id,
        home_points = finished.home_points,
        away_points = finished.away_points,
        "result registered"
    );
    Ok(finished)
}

async fn register_result_locally(
    state: &SharedState,
    id: Uuid,
    request: &ResultRequest,
) -> Result<GameEntity, ServiceError> {
    let store = state.require_store().await?;

    let entity = store.find_game(id).await?.ok_or_else(|| game_not_found(id))?;
    let mut game = Game::from(entity);
    if game.finished {
        return Err(ServiceError::AlreadyFinished { id });
    }

    let home_entity = store
        .find_team(game.home_team_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("team `{}` not found", game.home_team_id)))?;
    let away_entity = store
        .find_team(game.away_team_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("team `{}` not found", game.away_team_id)))?;

    let mut home = Team::from(home_entity);
    let mut away = Team::from(away_entity);

    game.register_result(request.home_points, request.away_points, &mut home, &mut away)
        .map_err(|err| match err {
            GameError::AlreadyFinished { id } => ServiceError::AlreadyFinished { id },
            GameError::SameTeam => ServiceError::InvalidInput(err.to_string()),
        })?;

    let updated = GameEntity::from(game);
    store.save_game(updated.clone()).await?;
    store.save_team(TeamEntity::from(home)).await?;
    store.save_team(TeamEntity::from(away)).await?;

    Ok(updated)
}

/// Delete a game, remote-preferring; locally a missing id is a no-op.
pub async fn delete_game(state: &SharedState, id: Uuid) -> Result<bool, ServiceError> {
    remote_first(
        "delete game",
        state
            .remote()
            .map(|remote| async move { remote.delete_game(id).await.map(|()| true) }),
        || async {
            let store = state.require_store().await?;
            let deleted = store.delete_game(id).await?;
            if !deleted {
                info!(%id, "delete of unknown game was a no-op");
            }
            Ok(deleted)
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::{date, datetime};

    use super::*;
    use crate::{
        config::AppConfig,
        dao::league_store::testing::InMemoryLeagueStore,
        dto::team::CreateTeamRequest,
        services::auth_service::InMemoryCredentials,
        state::AppState,
    };

    async fn test_state() -> SharedState {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(InMemoryCredentials::demo()),
            None,
            reqwest::Client::new(),
        );
        state.install_store(Arc::new(InMemoryLeagueStore::default())).await;
        state
    }

    async fn seed_team(state: &SharedState, name: &str) -> TeamEntity {
        team_service::create_team(
            state,
            CreateTeamRequest {
                name: name.into(),
                city: "Testville".into(),
                coach: "Coach".into(),
            },
        )
        .await
        .unwrap()
    }

    #[test]
    fn day_bounds_span_midnight_to_last_second() {
        let (start, end) = day_bounds(date!(2025 - 05 - 04));
        assert_eq!(start, datetime!(2025-05-04 00:00:00));
        assert_eq!(end, datetime!(2025-05-04 23:59:59));
    }

    #[tokio::test]
    async fn scheduling_requires_both_teams_to_exist() {
        let state = test_state().await;
        let request = CreateGameRequest {
            home_team_id: Uuid::new_v4(),
            away_team_id: Uuid::new_v4(),
            scheduled_at: datetime!(2025-05-04 18:30:00),
        };

        let outcome = create_game(&state, request).await;
        assert!(matches!(outcome, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn scheduling_a_team_against_itself_is_rejected() {
        let state = test_state().await;
        let team = seed_team(&state, "Lakers").await;
        let request = CreateGameRequest {
            home_team_id: team.id,
            away_team_id: team.id,
            scheduled_at: datetime!(2025-05-04 18:30:00),
        };

        let outcome = create_game(&state, request).await;
        assert!(matches!(outcome, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn result_registration_finishes_the_game_and_moves_both_tallies() {
        let state = test_state().await;
        let home = seed_team(&state, "Lakers").await;
        let away = seed_team(&state, "Celtics").await;
        let game = create_game(
            &state,
            CreateGameRequest {
                home_team_id: home.id,
                away_team_id: away.id,
                scheduled_at: datetime!(2025-05-04 18:30:00),
            },
        )
        .await
        .unwrap();
        assert!(!game.finished);

        let finished = register_result(
            &state,
            game.id,
            ResultRequest {
                home_points: 95,
                away_points: 88,
            },
        )
        .await
        .unwrap();

        assert!(finished.finished);
        assert_eq!(finished.home_points, 95);
        assert_eq!(finished.away_points, 88);

        let home_after = team_service::get_team(&state, home.id).await.unwrap();
        let away_after = team_service::get_team(&state, away.id).await.unwrap();
        assert_eq!((home_after.wins, home_after.losses), (1, 0));
        assert_eq!((away_after.wins, away_after.losses), (0, 1));

        let completed = games_by_finished(&state, true).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, game.id);
    }

    #[tokio::test]
    async fn a_second_result_is_rejected_and_nothing_moves() {
        let state = test_state().await;
        let home = seed_team(&state, "Lakers").await;
        let away = seed_team(&state, "Celtics").await;
        let game = create_game(
            &state,
            CreateGameRequest {
                home_team_id: home.id,
                away_team_id: away.id,
                scheduled_at: datetime!(2025-05-04 18:30:00),
            },
        )
        .await
        .unwrap();

        register_result(&state, game.id, ResultRequest { home_points: 80, away_points: 70 })
            .await
            .unwrap();
        let second = register_result(
            &state,
            game.id,
            ResultRequest { home_points: 10, away_points: 90 },
        )
        .await;
        assert!(matches!(second, Err(ServiceError::AlreadyFinished { .. })));

        let stored = get_game(&state, game.id).await.unwrap();
        assert_eq!((stored.home_points, stored.away_points), (80, 70));
        let home_after = team_service::get_team(&state, home.id).await.unwrap();
        assert_eq!((home_after.wins, home_after.losses), (1, 0));
    }

    #[tokio::test]
    async fn a_tie_finishes_the_game_without_moving_tallies() {
        let state = test_state().await;
        let home = seed_team(&state, "Lakers").await;
        let away = seed_team(&state, "Celtics").await;
        let game = create_game(
            &state,
            CreateGameRequest {
                home_team_id: home.id,
                away_team_id: away.id,
                scheduled_at: datetime!(2025-05-04 18:30:00),
            },
        )
        .await
        .unwrap();

        let finished = register_result(
            &state,
            game.id,
            ResultRequest { home_points: 70, away_points: 70 },
        )
        .await
        .unwrap();
        assert!(finished.finished);

        let home_after = team_service::get_team(&state, home.id).await.unwrap();
        let away_after = team_service::get_team(&state, away.id).await.unwrap();
        assert_eq!((home_after.wins, home_after.losses), (0, 0));
        assert_eq!((away_after.wins, away_after.losses), (0, 0));
    }

    #[tokio::test]
    async fn day_filter_keeps_only_that_calendar_day() {
        let state = test_state().await;
        let home = seed_team(&state, "Lakers").await;
        let away = seed_team(&state, "Celtics").await;

        let on_day = create_game(
            &state,
            CreateGameRequest {
                home_team_id: home.id,
                away_team_id: away.id,
                scheduled_at: datetime!(2025-05-04 23:59:59),
            },
        )
        .await
        .unwrap();
        create_game(
            &state,
            CreateGameRequest {
                home_team_id: home.id,
                away_team_id: away.id,
                scheduled_at: datetime!(2025-05-05 00:00:00),
            },
        )
        .await
        .unwrap();

        let found = games_on_day(&state, date!(2025 - 05 - 04)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, on_day.id);
    }

    #[tokio::test]
    async fn deleting_a_missing_game_is_a_no_op() {
        let state = test_state().await;
        let deleted = delete_game(&state, Uuid::new_v4()).await.unwrap();
        assert!(!deleted);
    }
}
