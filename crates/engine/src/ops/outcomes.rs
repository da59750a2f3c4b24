use chrono::Utc;
use uuid::Uuid;

use sea_orm::{
    ConnectionTrait, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, Outcome, OutcomeDraft, OutcomeKind, OutcomeSide, ResultEngine, gains, losses,
};

use super::{Engine, validate_text, with_tx};

impl Engine {
    /// Append a gain or loss to an existing action.
    ///
    /// The action must be owned by `user_id`; the new row lands after every
    /// outcome already on that side.
    pub async fn add_outcome(
        &self,
        user_id: &str,
        action_id: Uuid,
        side: OutcomeSide,
        kind: OutcomeKind,
        description: &str,
    ) -> ResultEngine<Outcome> {
        let draft = OutcomeDraft {
            kind,
            description: description.to_string(),
        };

        with_tx!(self, |db_tx| {
            self.require_action(&db_tx, user_id, action_id).await?;
            let position = next_position(&db_tx, action_id, side).await?;
            insert_outcome(&db_tx, user_id, action_id, side, &draft, position).await
        })
    }

    /// Delete a single gain or loss owned by `user_id`.
    pub async fn delete_outcome(
        &self,
        user_id: &str,
        side: OutcomeSide,
        outcome_id: Uuid,
    ) -> ResultEngine<()> {
        let rows_affected = match side {
            OutcomeSide::Gain => {
                gains::Entity::delete_many()
                    .filter(gains::Column::Id.eq(outcome_id.to_string()))
                    .filter(gains::Column::UserId.eq(user_id.to_string()))
                    .exec(&self.database)
                    .await?
                    .rows_affected
            }
            OutcomeSide::Loss => {
                losses::Entity::delete_many()
                    .filter(losses::Column::Id.eq(outcome_id.to_string()))
                    .filter(losses::Column::UserId.eq(user_id.to_string()))
                    .exec(&self.database)
                    .await?
                    .rows_affected
            }
        };
        if rows_affected == 0 {
            return Err(EngineError::NotFound(format!(
                "{} not exists",
                side.as_str()
            )));
        }
        Ok(())
    }
}

/// Validate and insert one outcome row on the given side.
///
/// Validation happens here, per row, so a bad draft in the middle of a
/// composite write surfaces after earlier rows have already been inserted
/// and forces the enclosing transaction to roll back.
pub(super) async fn insert_outcome<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    action_id: Uuid,
    side: OutcomeSide,
    draft: &OutcomeDraft,
    position: i32,
) -> ResultEngine<Outcome> {
    let description = validate_text(&draft.description, "description", 1000)?;

    let outcome = Outcome::new(
        user_id.to_string(),
        action_id,
        draft.kind,
        description,
        position,
        Utc::now(),
    );
    match side {
        OutcomeSide::Gain => {
            gains::ActiveModel::from(&outcome).insert(db).await?;
        }
        OutcomeSide::Loss => {
            losses::ActiveModel::from(&outcome).insert(db).await?;
        }
    }
    Ok(outcome)
}

/// Next free slot on the given side: one past the highest position ever
/// assigned. A plain row count would collide after a deletion.
async fn next_position(
    db: &DatabaseTransaction,
    action_id: Uuid,
    side: OutcomeSide,
) -> ResultEngine<i32> {
    let last = match side {
        OutcomeSide::Gain => gains::Entity::find()
            .filter(gains::Column::ActionId.eq(action_id.to_string()))
            .order_by_desc(gains::Column::Position)
            .one(db)
            .await?
            .map(|model| model.position),
        OutcomeSide::Loss => losses::Entity::find()
            .filter(losses::Column::ActionId.eq(action_id.to_string()))
            .order_by_desc(losses::Column::Position)
            .one(db)
            .await?
            .map(|model| model.position),
    };
    Ok(last.map_or(0, |position| position + 1))
}
