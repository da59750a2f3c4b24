//! Goal API endpoints.

use api_types::goal::{GoalNew, GoalUpdate, GoalView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError, mappers,
    server::{CallerId, ServerState},
};

pub async fn create(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalView>), ServerError> {
    let goal = state
        .engine
        .new_goal(&caller.0, payload.complex_id, &payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(mappers::goal_view(&goal))))
}

pub async fn list(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GoalView>>, ServerError> {
    let goals = state.engine.goals(&caller.0).await?;
    Ok(Json(goals.iter().map(mappers::goal_view).collect()))
}

pub async fn detail(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state.engine.goal(&caller.0, id).await?;
    Ok(Json(mappers::goal_view(&goal)))
}

pub async fn update(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalUpdate>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state
        .engine
        .update_goal(
            &caller.0,
            id,
            engine::GoalPatch {
                content: payload.content,
            },
        )
        .await?;
    Ok(Json(mappers::goal_view(&goal)))
}

pub async fn remove(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_goal(&caller.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
