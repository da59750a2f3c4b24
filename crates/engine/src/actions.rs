//! Action entities.
//!
//! An `Action` is a concrete step taken toward a [`Goal`]. It is `Open`
//! until `completed_at` is set, and `Completed` afterwards; clearing the
//! timestamp reverts it to `Open`. An action owns its gains and losses,
//! which are written atomically with it.
//!
//! The recurrence rule is opaque to the engine: it travels as JSON and is
//! stored as its serialized text.
//!
//! [`Goal`]: crate::Goal

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Outcome, OutcomeDraft};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    pub user_id: String,
    pub goal_id: Uuid,
    pub content: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub recurrence_pattern: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub gains: Vec<Outcome>,
    pub losses: Vec<Outcome>,
}

impl Action {
    pub fn new(
        user_id: String,
        goal_id: Uuid,
        content: String,
        completed_at: Option<DateTime<Utc>>,
        recurrence_pattern: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            goal_id,
            content,
            completed_at,
            recurrence_pattern,
            created_at: now,
            updated_at: now,
            gains: Vec::new(),
            losses: Vec::new(),
        }
    }
}

/// Everything needed to create an action together with its outcomes.
#[derive(Clone, Debug)]
pub struct ActionNewCmd {
    pub user_id: String,
    pub goal_id: Uuid,
    pub content: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub recurrence_pattern: Option<serde_json::Value>,
    pub gains: Vec<OutcomeDraft>,
    pub losses: Vec<OutcomeDraft>,
}

/// Partial update for an action.
///
/// The outer `Option` distinguishes "field omitted" from "field explicitly
/// cleared": `None` leaves the value untouched, `Some(None)` resets it.
/// Owner and parent goal are never patchable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionPatch {
    pub content: Option<String>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
    pub recurrence_pattern: Option<Option<serde_json::Value>>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "actions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub goal_id: String,
    pub content: String,
    pub completed_at: Option<DateTimeUtc>,
    pub recurrence_pattern: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::goals::Entity",
        from = "Column::GoalId",
        to = "super::goals::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Goals,
    #[sea_orm(has_many = "super::gains::Entity")]
    Gains,
    #[sea_orm(has_many = "super::losses::Entity")]
    Losses,
}

impl Related<super::goals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Goals.def()
    }
}

impl Related<super::gains::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gains.def()
    }
}

impl Related<super::losses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Losses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Action> for ActiveModel {
    fn from(action: &Action) -> Self {
        Self {
            id: ActiveValue::Set(action.id.to_string()),
            user_id: ActiveValue::Set(action.user_id.clone()),
            goal_id: ActiveValue::Set(action.goal_id.to_string()),
            content: ActiveValue::Set(action.content.clone()),
            completed_at: ActiveValue::Set(action.completed_at),
            recurrence_pattern: ActiveValue::Set(
                action.recurrence_pattern.as_ref().map(|v| v.to_string()),
            ),
            created_at: ActiveValue::Set(action.created_at),
            updated_at: ActiveValue::Set(action.updated_at),
        }
    }
}

impl TryFrom<Model> for Action {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let recurrence_pattern = model
            .recurrence_pattern
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|_| {
                EngineError::Validation("stored recurrence pattern is not valid JSON".to_string())
            })?;

        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("action not exists".to_string()))?,
            user_id: model.user_id,
            goal_id: Uuid::parse_str(&model.goal_id)
                .map_err(|_| EngineError::NotFound("goal not exists".to_string()))?,
            content: model.content,
            completed_at: model.completed_at,
            recurrence_pattern,
            created_at: model.created_at,
            updated_at: model.updated_at,
            gains: Vec::new(),
            losses: Vec::new(),
        })
    }
}
