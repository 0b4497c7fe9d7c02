use std::sync::Arc;

use reqwest::{Client, Method};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use super::{
    config::RemoteConfig,
    error::{RemoteDaoError, RemoteResult},
};
use crate::{
    dao::models::{GameEntity, TeamEntity},
    dto::{
        game::{CreateGameRequest, GameResponse, ResultRequest},
        team::{CreateTeamRequest, TeamResponse, UpdateTeamRequest},
    },
};

/// HTTP client for a remote instance of the domain API.
///
/// The remote speaks the exact wire format this service exposes, so the
/// regular response DTOs double as the decode targets.
#[derive(Clone)]
pub struct RemoteLeagueClient {
    client: Client,
    base_url: Arc<str>,
}

impl RemoteLeagueClient {
    /// Build a client with an explicit request timeout.
    pub fn new(config: RemoteConfig) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|source| RemoteDaoError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send_json<T>(&self, method: Method, path: &str, body: Option<&impl Serialize>) -> RemoteResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.client.request(method, &url);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|source| RemoteDaoError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteDaoError::RequestStatus { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| RemoteDaoError::DecodeResponse { url, source })
    }

    async fn delete(&self, path: &str) -> RemoteResult<()> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|source| RemoteDaoError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RemoteDaoError::RequestStatus { url, status })
        }
    }

    /// Fetch every team the remote knows about.
    pub async fn list_teams(&self) -> RemoteResult<Vec<TeamEntity>> {
        let teams: Vec<TeamResponse> = self.send_json(Method::GET, "equipos", None::<&()>).await?;
        Ok(teams.into_iter().map(TeamEntity::from).collect())
    }

    /// Fetch a single team; any non-success status is a remote failure, a
    /// 404 included, so callers fall back to local storage.
    pub async fn get_team(&self, id: Uuid) -> RemoteResult<TeamEntity> {
        let team: TeamResponse = self
            .send_json(Method::GET, &format!("equipos/{id}"), None::<&()>)
            .await?;
        Ok(TeamEntity::from(team))
    }

    /// Create a team remotely and return the stored record.
    pub async fn create_team(&self, request: &CreateTeamRequest) -> RemoteResult<TeamEntity> {
        let team: TeamResponse = self
            .send_json(Method::POST, "equipos", Some(request))
            .await?;
        Ok(TeamEntity::from(team))
    }

    /// Update a team's descriptive fields remotely.
    pub async fn update_team(
        &self,
        id: Uuid,
        request: &UpdateTeamRequest,
    ) -> RemoteResult<TeamEntity> {
        let team: TeamResponse = self
            .send_json(Method::PUT, &format!("equipos/{id}"), Some(request))
            .await?;
        Ok(TeamEntity::from(team))
    }

    /// Delete a team remotely.
    pub async fn delete_team(&self, id: Uuid) -> RemoteResult<()> {
        self.delete(&format!("equipos/{id}")).await
    }

    /// Fetch every game the remote knows about.
    pub async fn list_games(&self) -> RemoteResult<Vec<GameEntity>> {
        let games: Vec<GameResponse> = self.send_json(Method::GET, "partidos", None::<&()>).await?;
        Ok(games.into_iter().map(GameEntity::from).collect())
    }

    /// Fetch a single game; any non-success status is a remote failure, a
    /// 404 included, so callers fall back to local storage.
    pub async fn get_game(&self, id: Uuid) -> RemoteResult<GameEntity> {
        let game: GameResponse = self
            .send_json(Method::GET, &format!("partidos/{id}"), None::<&()>)
            .await?;
        Ok(GameEntity::from(game))
    }

    /// Schedule a game remotely and return the stored record.
    pub async fn create_game(&self, request: &CreateGameRequest) -> RemoteResult<GameEntity> {
        let game: GameResponse = self
            .send_json(Method::POST, "partidos", Some(request))
            .await?;
        Ok(GameEntity::from(game))
    }

    /// Register a final score remotely and return the finished game.
    pub async fn register_result(
        &self,
        id: Uuid,
        request: &ResultRequest,
    ) -> RemoteResult<GameEntity> {
        let game: GameResponse = self
            .send_json(
                Method::POST,
                &format!("partidos/{id}/resultado"),
                Some(request),
            )
            .await?;
        Ok(GameEntity::from(game))
    }

    /// Delete a game remotely.
    pub async fn delete_game(&self, id: Uuid) -> RemoteResult<()> {
        self.delete(&format!("partidos/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let client =
            RemoteLeagueClient::new(RemoteConfig::new("http://localhost:5000/api/")).unwrap();
        assert_eq!(client.url("equipos"), "http://localhost:5000/api/equipos");
    }
}
