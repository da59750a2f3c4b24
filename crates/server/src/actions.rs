//! Action API endpoints, including the composite create.

use api_types::action::{ActionListQuery, ActionNew, ActionUpdate, ActionView};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError, mappers,
    server::{CallerId, ServerState},
};

/// Create an action together with its gains and losses in one call.
pub async fn create(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Json(payload): Json<ActionNew>,
) -> Result<(StatusCode, Json<ActionView>), ServerError> {
    let cmd = mappers::action_cmd(&caller.0, payload)?;
    let action = state.engine.create_action(cmd).await?;

    Ok((StatusCode::CREATED, Json(mappers::action_view(&action))))
}

/// List the actions of one goal, newest first.
pub async fn list(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Query(query): Query<ActionListQuery>,
) -> Result<Json<Vec<ActionView>>, ServerError> {
    let actions = state
        .engine
        .actions_for_goal(&caller.0, query.goal_id)
        .await?;
    Ok(Json(actions.iter().map(mappers::action_view).collect()))
}

pub async fn detail(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionView>, ServerError> {
    let action = state.engine.action(&caller.0, id).await?;
    Ok(Json(mappers::action_view(&action)))
}

pub async fn update(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActionUpdate>,
) -> Result<Json<ActionView>, ServerError> {
    let patch = mappers::action_patch(payload)?;
    let action = state.engine.update_action(&caller.0, id, patch).await?;
    Ok(Json(mappers::action_view(&action)))
}

pub async fn remove(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_action(&caller.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
