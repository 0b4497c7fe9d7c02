use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::TeamEntity,
    dto::team::{CreateTeamRequest, UpdateTeamRequest},
    error::ServiceError,
    model::Team,
    services::fallback::remote_first,
    state::SharedState,
};

fn team_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("team `{id}` not found"))
}

/// All teams, remote-preferring.
pub async fn list_teams(state: &SharedState) -> Result<Vec<TeamEntity>, ServiceError> {
    remote_first(
        "list teams",
        state.remote().map(|remote| async move { remote.list_teams().await }),
        || async {
            let store = state.require_store().await?;
            Ok(store.list_teams().await?)
        },
    )
    .await
}

/// A single team by id, remote-preferring; missing ids are a not-found error.
pub async fn get_team(state: &SharedState, id: Uuid) -> Result<TeamEntity, ServiceError> {
    let found = remote_first(
        "get team",
        state
            .remote()
            .map(|remote| async move { remote.get_team(id).await.map(Some) }),
        || async {
            let store = state.require_store().await?;
            Ok(store.find_team(id).await?)
        },
    )
    .await?;

    found.ok_or_else(|| team_not_found(id))
}

/// Teams whose name contains the fragment, case-insensitively.
pub async fn search_teams(
    state: &SharedState,
    fragment: String,
) -> Result<Vec<TeamEntity>, ServiceError> {
    let store = state.require_store().await?;
    Ok(store.search_teams(fragment).await?)
}

/// Register a new team, remote-preferring.
pub async fn create_team(
    state: &SharedState,
    request: CreateTeamRequest,
) -> Result<TeamEntity, ServiceError> {
    let remote_request = request.clone();
    let created = remote_first(
        "create team",
        state
            .remote()
            .map(|remote| async move { remote.create_team(&remote_request).await }),
        || async {
            let store = state.require_store().await?;
            let entity = TeamEntity::from(Team::new(request.name, request.city, request.coach));
            store.save_team(entity.clone()).await?;
            Ok(entity)
        },
    )
    .await?;

    info!(team = %created.name, id = %created.id, "team registered");
    Ok(created)
}

/// Update a team's descriptive fields, remote-preferring.
pub async fn update_team(
    state: &SharedState,
    id: Uuid,
    request: UpdateTeamRequest,
) -> Result<TeamEntity, ServiceError> {
    let remote_request = request.clone();
    remote_first(
        "update team",
        state
            .remote()
            .map(|remote| async move { remote.update_team(id, &remote_request).await }),
        || async {
            let store = state.require_store().await?;
            let mut entity = store.find_team(id).await?.ok_or_else(|| team_not_found(id))?;

            if let Some(name) = request.name {
                entity.name = name;
            }
            if let Some(city) = request.city {
                entity.city = city;
            }
            if let Some(coach) = request.coach {
                entity.coach = coach;
            }

            store.save_team(entity.clone()).await?;
            Ok(entity)
        },
    )
    .await
}

/// Delete a team, remote-preferring.
///
/// Locally the deletion is blocked while any game still references the
/// team; deleting an id that does not exist is a logged no-op.
pub async fn delete_team(state: &SharedState, id: Uuid) -> Result<bool, ServiceError> {
    remote_first(
        "delete team",
        state
            .remote()
            .map(|remote| async move { remote.delete_team(id).await.map(|()| true) }),
        || async {
            let store = state.require_store().await?;

            let referencing = store.games_by_team(id).await?;
            if !referencing.is_empty() {
                return Err(ServiceError::Conflict(format!(
                    "team `{id}` still has {} game(s) on record",
                    referencing.len()
                )));
            }

            let deleted = store.delete_team(id).await?;
            if !deleted {
                info!(%id, "delete of unknown team was a no-op");
            }
            Ok(deleted)
        },
    )
    .await
}

/// Add a win to a team's tally.
pub async fn register_win(state: &SharedState, id: Uuid) -> Result<TeamEntity, ServiceError> {
    adjust_tally(state, id, Team::register_win).await
}

/// Add a loss to a team's tally.
pub async fn register_loss(state: &SharedState, id: Uuid) -> Result<TeamEntity, ServiceError> {
    adjust_tally(state, id, Team::register_loss).await
}

async fn adjust_tally(
    state: &SharedState,
    id: Uuid,
    apply: fn(&mut Team),
) -> Result<TeamEntity, ServiceError> {
    let store = state.require_store().await?;
    let entity = store.find_team(id).await?.ok_or_else(|| team_not_found(id))?;

    let mut team = Team::from(entity);
    apply(&mut team);

    let updated = TeamEntity::from(team);
    store.save_team(updated.clone()).await?;
    Ok(updated)
}
