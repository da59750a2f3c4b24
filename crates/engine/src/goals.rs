//! Goal entities.
//!
//! A `Goal` is an intended improvement derived from a [`Complex`]. It can
//! only be attached to a complex owned by the same user.
//!
//! [`Complex`]: crate::Complex

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: String,
    pub complex_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(user_id: String, complex_id: Uuid, content: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            complex_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a goal. The parent complex can never be reassigned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalPatch {
    pub content: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub complex_id: String,
    pub content: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::complexes::Entity",
        from = "Column::ComplexId",
        to = "super::complexes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Complexes,
    #[sea_orm(has_many = "super::actions::Entity")]
    Actions,
}

impl Related<super::complexes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Complexes.def()
    }
}

impl Related<super::actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Goal> for ActiveModel {
    fn from(goal: &Goal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.to_string()),
            user_id: ActiveValue::Set(goal.user_id.clone()),
            complex_id: ActiveValue::Set(goal.complex_id.to_string()),
            content: ActiveValue::Set(goal.content.clone()),
            created_at: ActiveValue::Set(goal.created_at),
            updated_at: ActiveValue::Set(goal.updated_at),
        }
    }
}

impl TryFrom<Model> for Goal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("goal not exists".to_string()))?,
            user_id: model.user_id,
            complex_id: Uuid::parse_str(&model.complex_id)
                .map_err(|_| EngineError::NotFound("complex not exists".to_string()))?,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
