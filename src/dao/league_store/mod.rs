/// MongoDB-backed store implementation.
pub mod mongodb;

use futures::future::BoxFuture;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::dao::models::{GameEntity, TeamEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for teams and games.
///
/// Deletions return whether a record was actually removed; deleting a
/// missing id is a no-op, not an error.
pub trait LeagueStore: Send + Sync {
    /// Insert or replace a team.
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a team by id.
    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    /// All teams, ordered by name.
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// Teams whose name contains `fragment`, case-insensitively.
    fn search_teams(&self, fragment: String) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// Delete a team by id.
    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    /// Insert or replace a game.
    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a game by id.
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// All games, ordered by schedule.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Games where the team appears as home or away.
    fn games_by_team(&self, team_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Games scheduled within the inclusive `[start, end]` window.
    fn games_between(
        &self,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Games filtered by their finished flag.
    fn games_by_finished(&self, finished: bool)
    -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Delete a game by id.
    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    /// Verify the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish the backend connection after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

#[cfg(test)]
pub mod testing {
    //! In-memory [`LeagueStore`] used by service-level tests.

    use std::{collections::HashMap, future::ready, sync::Mutex};

    use futures::future::BoxFuture;
    use time::PrimitiveDateTime;
    use uuid::Uuid;

    use super::LeagueStore;
    use crate::dao::{
        models::{GameEntity, TeamEntity},
        storage::StorageResult,
    };

    /// Stores everything in two maps; every operation resolves immediately.
    #[derive(Default)]
    pub struct InMemoryLeagueStore {
        teams: Mutex<HashMap<Uuid, TeamEntity>>,
        games: Mutex<HashMap<Uuid, GameEntity>>,
    }

    fn done<T: Send + 'static>(value: T) -> BoxFuture<'static, StorageResult<T>> {
        Box::pin(ready(Ok(value)))
    }

    impl LeagueStore for InMemoryLeagueStore {
        fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
            self.teams.lock().unwrap().insert(team.id, team);
            done(())
        }

        fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
            done(self.teams.lock().unwrap().get(&id).cloned())
        }

        fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
            let mut teams: Vec<_> = self.teams.lock().unwrap().values().cloned().collect();
            teams.sort_by(|a, b| a.name.cmp(&b.name));
            done(teams)
        }

        fn search_teams(
            &self,
            fragment: String,
        ) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
            let fragment = fragment.to_lowercase();
            let mut teams: Vec<_> = self
                .teams
                .lock()
                .unwrap()
                .values()
                .filter(|team| team.name.to_lowercase().contains(&fragment))
                .cloned()
                .collect();
            teams.sort_by(|a, b| a.name.cmp(&b.name));
            done(teams)
        }

        fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
            done(self.teams.lock().unwrap().remove(&id).is_some())
        }

        fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
            self.games.lock().unwrap().insert(game.id, game);
            done(())
        }

        fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            done(self.games.lock().unwrap().get(&id).cloned())
        }

        fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
            done(self.sorted_games(|_| true))
        }

        fn games_by_team(
            &self,
            team_id: Uuid,
        ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
            done(self.sorted_games(|game| {
                game.home_team_id == team_id || game.away_team_id == team_id
            }))
        }

        fn games_between(
            &self,
            start: PrimitiveDateTime,
            end: PrimitiveDateTime,
        ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
            done(self.sorted_games(|game| game.scheduled_at >= start && game.scheduled_at <= end))
        }

        fn games_by_finished(
            &self,
            finished: bool,
        ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
            done(self.sorted_games(|game| game.finished == finished))
        }

        fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
            done(self.games.lock().unwrap().remove(&id).is_some())
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            done(())
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            done(())
        }
    }

    impl InMemoryLeagueStore {
        fn sorted_games(&self, keep: impl Fn(&GameEntity) -> bool) -> Vec<GameEntity> {
            let mut games: Vec<_> = self
                .games
                .lock()
                .unwrap()
                .values()
                .filter(|game| keep(game))
                .cloned()
                .collect();
            games.sort_by_key(|game| game.scheduled_at);
            games
        }
    }
}
