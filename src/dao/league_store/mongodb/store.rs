use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Document, doc},
    options::IndexOptions,
};
use time::PrimitiveDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{GameDocument, TeamDocument, bson_datetime, doc_id, escape_regex, uuid_as_binary},
};
use crate::dao::{
    league_store::LeagueStore,
    models::{GameEntity, TeamEntity},
    storage::{StorageError, StorageResult},
};

const TEAM_COLLECTION_NAME: &str = "teams";
const GAME_COLLECTION_NAME: &str = "games";

/// MongoDB-backed [`LeagueStore`] holding the league's two collections.
#[derive(Clone)]
pub struct MongoLeagueStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoLeagueStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        let teams = database.collection::<Document>(TEAM_COLLECTION_NAME);
        let team_name = IndexModel::builder()
            .keys(doc! {"name": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("team_name_idx".to_owned()))
                    .build(),
            )
            .build();
        teams
            .create_index(team_name)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: TEAM_COLLECTION_NAME,
                index: "name",
                source,
            })?;

        let games = database.collection::<Document>(GAME_COLLECTION_NAME);
        for (index_name, keys) in [
            ("game_home_team_idx", doc! {"home_team_id": 1}),
            ("game_away_team_idx", doc! {"away_team_id": 1}),
            ("game_schedule_idx", doc! {"scheduled_at": 1}),
            ("game_finished_idx", doc! {"finished": 1}),
        ] {
            let index = IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .name(Some(index_name.to_owned()))
                        .build(),
                )
                .build();
            games
                .create_index(index)
                .await
                .map_err(|source| MongoDaoError::EnsureIndex {
                    collection: GAME_COLLECTION_NAME,
                    index: index_name,
                    source,
                })?;
        }

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn teams(&self) -> Collection<TeamDocument> {
        self.database().await.collection(TEAM_COLLECTION_NAME)
    }

    async fn games(&self) -> Collection<GameDocument> {
        self.database().await.collection(GAME_COLLECTION_NAME)
    }

    async fn save_team_inner(&self, team: TeamEntity) -> MongoResult<()> {
        let id = team.id;
        let document = TeamDocument::from(team);
        self.teams()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveTeam { id, source })?;
        Ok(())
    }

    async fn find_team_inner(&self, id: Uuid) -> MongoResult<Option<TeamEntity>> {
        let found = self
            .teams()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadTeam { id, source })?;
        Ok(found.map(TeamEntity::from))
    }

    async fn query_teams_inner(&self, filter: Document) -> MongoResult<Vec<TeamEntity>> {
        let cursor = self
            .teams()
            .await
            .find(filter)
            .sort(doc! {"name": 1})
            .await
            .map_err(|source| MongoDaoError::QueryTeams { source })?;
        let documents: Vec<TeamDocument> = cursor
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::QueryTeams { source })?;
        Ok(documents.into_iter().map(TeamEntity::from).collect())
    }

    async fn delete_team_inner(&self, id: Uuid) -> MongoResult<bool> {
        let outcome = self
            .teams()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteTeam { id, source })?;
        Ok(outcome.deleted_count > 0)
    }

    async fn save_game_inner(&self, game: GameEntity) -> MongoResult<()> {
        let id = game.id;
        let document = GameDocument::from(game);
        self.games()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveGame { id, source })?;
        Ok(())
    }

    async fn find_game_inner(&self, id: Uuid) -> MongoResult<Option<GameEntity>> {
        let found = self
            .games()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadGame { id, source })?;
        Ok(found.map(GameEntity::from))
    }

    async fn query_games_inner(&self, filter: Document) -> MongoResult<Vec<GameEntity>> {
        let cursor = self
            .games()
            .await
            .find(filter)
            .sort(doc! {"scheduled_at": 1})
            .await
            .map_err(|source| MongoDaoError::QueryGames { source })?;
        let documents: Vec<GameDocument> = cursor
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::QueryGames { source })?;
        Ok(documents.into_iter().map(GameEntity::from).collect())
    }

    async fn delete_game_inner(&self, id: Uuid) -> MongoResult<bool> {
        let outcome = self
            .games()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteGame { id, source })?;
        Ok(outcome.deleted_count > 0)
    }
}

impl LeagueStore for MongoLeagueStore {
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .save_team_inner(team)
                .await
                .map_err(|err| StorageError::unavailable("saving team", err))
        })
    }

    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_team_inner(id)
                .await
                .map_err(|err| StorageError::unavailable("loading team", err))
        })
    }

    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .query_teams_inner(doc! {})
                .await
                .map_err(|err| StorageError::unavailable("listing teams", err))
        })
    }

    fn search_teams(&self, fragment: String) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let filter = doc! {"name": {"$regex": escape_regex(&fragment), "$options": "i"}};
            store
                .query_teams_inner(filter)
                .await
                .map_err(|err| StorageError::unavailable("searching teams", err))
        })
    }

    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_team_inner(id)
                .await
                .map_err(|err| StorageError::unavailable("deleting team", err))
        })
    }

    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .save_game_inner(game)
                .await
                .map_err(|err| StorageError::unavailable("saving game", err))
        })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_game_inner(id)
                .await
                .map_err(|err| StorageError::unavailable("loading game", err))
        })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .query_games_inner(doc! {})
                .await
                .map_err(|err| StorageError::unavailable("listing games", err))
        })
    }

    fn games_by_team(&self, team_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let id = uuid_as_binary(team_id);
            let filter = doc! {"$or": [{"home_team_id": id.clone()}, {"away_team_id": id}]};
            store
                .query_games_inner(filter)
                .await
                .map_err(|err| StorageError::unavailable("querying games by team", err))
        })
    }

    fn games_between(
        &self,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let filter = doc! {"scheduled_at": {
                "$gte": bson_datetime(start),
                "$lte": bson_datetime(end),
            }};
            store
                .query_games_inner(filter)
                .await
                .map_err(|err| StorageError::unavailable("querying games by date", err))
        })
    }

    fn games_by_finished(
        &self,
        finished: bool,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .query_games_inner(doc! {"finished": finished})
                .await
                .map_err(|err| StorageError::unavailable("querying games by finished flag", err))
        })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_game_inner(id)
                .await
                .map_err(|err| StorageError::unavailable("deleting game", err))
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .inner
                .ping()
                .await
                .map_err(|err| StorageError::unavailable("pinging storage", err))
        })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .inner
                .reconnect()
                .await
                .map_err(|err| StorageError::unavailable("reconnecting storage", err))
        })
    }
}
