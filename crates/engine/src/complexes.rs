//! Complex entities.
//!
//! A `Complex` is a user-recorded recurring source of distress and the root
//! of the hierarchy: a complex owns goals, a goal owns actions, an action
//! owns gains and losses. Every row is bound to the user that created it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Goal};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub id: Uuid,
    pub user_id: String,
    pub content: String,
    pub category: String,
    pub trigger_episode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Filled only by the detail lookup; list operations leave it empty.
    pub goals: Vec<Goal>,
}

impl Complex {
    pub fn new(
        user_id: String,
        content: String,
        category: String,
        trigger_episode: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content,
            category,
            trigger_episode,
            created_at: now,
            updated_at: now,
            goals: Vec::new(),
        }
    }
}

/// Partial update for a complex. Owner and id are never patchable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplexPatch {
    pub content: Option<String>,
    pub category: Option<String>,
    /// `Some(None)` clears the episode, `None` leaves it unchanged.
    pub trigger_episode: Option<Option<String>>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "complexes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub category: String,
    pub trigger_episode: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::goals::Entity")]
    Goals,
}

impl Related<super::goals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Goals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Complex> for ActiveModel {
    fn from(complex: &Complex) -> Self {
        Self {
            id: ActiveValue::Set(complex.id.to_string()),
            user_id: ActiveValue::Set(complex.user_id.clone()),
            content: ActiveValue::Set(complex.content.clone()),
            category: ActiveValue::Set(complex.category.clone()),
            trigger_episode: ActiveValue::Set(complex.trigger_episode.clone()),
            created_at: ActiveValue::Set(complex.created_at),
            updated_at: ActiveValue::Set(complex.updated_at),
        }
    }
}

impl TryFrom<Model> for Complex {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("complex not exists".to_string()))?,
            user_id: model.user_id,
            content: model.content,
            category: model.category,
            trigger_episode: model.trigger_episode,
            created_at: model.created_at,
            updated_at: model.updated_at,
            goals: Vec::new(),
        })
    }
}
