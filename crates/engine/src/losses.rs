//! Storage model for losses (the negative side of an action's ledger).
//!
//! Same shape as [`gains`](crate::gains); a separate table keeps the two
//! ledger sides apart without a discriminator column.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Outcome, OutcomeKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "losses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub action_id: String,
    pub kind: String,
    pub description: String,
    pub position: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::actions::Entity",
        from = "Column::ActionId",
        to = "super::actions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Actions,
}

impl Related<super::actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Outcome> for ActiveModel {
    fn from(outcome: &Outcome) -> Self {
        Self {
            id: ActiveValue::Set(outcome.id.to_string()),
            user_id: ActiveValue::Set(outcome.user_id.clone()),
            action_id: ActiveValue::Set(outcome.action_id.to_string()),
            kind: ActiveValue::Set(outcome.kind.as_str().to_string()),
            description: ActiveValue::Set(outcome.description.clone()),
            position: ActiveValue::Set(outcome.position),
            created_at: ActiveValue::Set(outcome.created_at),
            updated_at: ActiveValue::Set(outcome.updated_at),
        }
    }
}

impl TryFrom<Model> for Outcome {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("loss not exists".to_string()))?,
            user_id: model.user_id,
            action_id: Uuid::parse_str(&model.action_id)
                .map_err(|_| EngineError::NotFound("action not exists".to_string()))?,
            kind: OutcomeKind::try_from(model.kind.as_str())?,
            description: model.description,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
