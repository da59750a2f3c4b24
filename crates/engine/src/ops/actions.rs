use chrono::Utc;
use uuid::Uuid;

use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    Action, ActionNewCmd, ActionPatch, EngineError, Outcome, OutcomeSide, ResultEngine, actions,
    gains, losses,
};

use super::{Engine, outcomes::insert_outcome, validate_text, with_tx};

impl Engine {
    /// Create an action together with its gains and losses as one atomic
    /// unit.
    ///
    /// The parent goal's ownership is validated before any write. The
    /// action row and every outcome row are inserted in a single database
    /// transaction; a failure on any row rolls the whole thing back, so a
    /// partially-written action is never observable. The goal foreign key
    /// is the backstop against a parent deleted mid-flight.
    pub async fn create_action(&self, cmd: ActionNewCmd) -> ResultEngine<Action> {
        let content = validate_text(&cmd.content, "content", 1000)?;

        with_tx!(self, |db_tx| {
            self.require_goal(&db_tx, &cmd.user_id, cmd.goal_id).await?;

            let mut action = Action::new(
                cmd.user_id.clone(),
                cmd.goal_id,
                content,
                cmd.completed_at,
                cmd.recurrence_pattern.clone(),
                Utc::now(),
            );
            actions::ActiveModel::from(&action)
                .insert(&db_tx)
                .await
                .map_err(|err| EngineError::AtomicWrite(err.to_string()))?;

            for (position, draft) in cmd.gains.iter().enumerate() {
                let outcome = insert_outcome(
                    &db_tx,
                    &cmd.user_id,
                    action.id,
                    OutcomeSide::Gain,
                    draft,
                    position as i32,
                )
                .await
                .map_err(EngineError::into_atomic)?;
                action.gains.push(outcome);
            }
            for (position, draft) in cmd.losses.iter().enumerate() {
                let outcome = insert_outcome(
                    &db_tx,
                    &cmd.user_id,
                    action.id,
                    OutcomeSide::Loss,
                    draft,
                    position as i32,
                )
                .await
                .map_err(EngineError::into_atomic)?;
                action.losses.push(outcome);
            }

            Ok(action)
        })
    }

    /// List the actions recorded under one of the user's goals, newest
    /// first, with gains and losses attached.
    pub async fn actions_for_goal(&self, user_id: &str, goal_id: Uuid) -> ResultEngine<Vec<Action>> {
        with_tx!(self, |db_tx| {
            self.require_goal(&db_tx, user_id, goal_id).await?;

            let models = actions::Entity::find()
                .filter(actions::Column::GoalId.eq(goal_id.to_string()))
                .filter(actions::Column::UserId.eq(user_id.to_string()))
                .order_by_desc(actions::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(models.len());
            for model in models {
                let mut action = Action::try_from(model)?;
                load_outcomes(&db_tx, &mut action).await?;
                out.push(action);
            }
            Ok(out)
        })
    }

    /// Return one action with its outcomes, scoped to its owner.
    pub async fn action(&self, user_id: &str, action_id: Uuid) -> ResultEngine<Action> {
        with_tx!(self, |db_tx| {
            let model = self.require_action(&db_tx, user_id, action_id).await?;
            let mut action = Action::try_from(model)?;
            load_outcomes(&db_tx, &mut action).await?;
            Ok(action)
        })
    }

    /// Apply a partial update to an action.
    ///
    /// `completed_at` follows the patch convention: omitted leaves the
    /// completion state untouched, an explicit null reverts the action to
    /// open. Owner and parent goal are not patchable.
    pub async fn update_action(
        &self,
        user_id: &str,
        action_id: Uuid,
        patch: ActionPatch,
    ) -> ResultEngine<Action> {
        let content = patch
            .content
            .as_deref()
            .map(|v| validate_text(v, "content", 1000))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let model = self.require_action(&db_tx, user_id, action_id).await?;
            let mut action = Action::try_from(model)?;

            if let Some(content) = content {
                action.content = content;
            }
            if let Some(completed_at) = patch.completed_at {
                action.completed_at = completed_at;
            }
            if let Some(recurrence_pattern) = patch.recurrence_pattern.clone() {
                action.recurrence_pattern = recurrence_pattern;
            }
            action.updated_at = Utc::now();

            let active = actions::ActiveModel {
                id: ActiveValue::Set(action.id.to_string()),
                content: ActiveValue::Set(action.content.clone()),
                completed_at: ActiveValue::Set(action.completed_at),
                recurrence_pattern: ActiveValue::Set(
                    action.recurrence_pattern.as_ref().map(|v| v.to_string()),
                ),
                updated_at: ActiveValue::Set(action.updated_at),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            load_outcomes(&db_tx, &mut action).await?;
            Ok(action)
        })
    }

    /// Delete an action owned by `user_id`; its outcomes cascade at the
    /// schema level.
    pub async fn delete_action(&self, user_id: &str, action_id: Uuid) -> ResultEngine<()> {
        let result = actions::Entity::delete_many()
            .filter(actions::Column::Id.eq(action_id.to_string()))
            .filter(actions::Column::UserId.eq(user_id.to_string()))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("action not exists".to_string()));
        }
        Ok(())
    }
}

/// Attach both outcome sets to an action, in insertion order.
pub(super) async fn load_outcomes<C: ConnectionTrait>(
    db: &C,
    action: &mut Action,
) -> ResultEngine<()> {
    let gain_models = gains::Entity::find()
        .filter(gains::Column::ActionId.eq(action.id.to_string()))
        .order_by_asc(gains::Column::Position)
        .all(db)
        .await?;
    action.gains = gain_models
        .into_iter()
        .map(Outcome::try_from)
        .collect::<ResultEngine<Vec<Outcome>>>()?;

    let loss_models = losses::Entity::find()
        .filter(losses::Column::ActionId.eq(action.id.to_string()))
        .order_by_asc(losses::Column::Position)
        .all(db)
        .await?;
    action.losses = loss_models
        .into_iter()
        .map(Outcome::try_from)
        .collect::<ResultEngine<Vec<Outcome>>>()?;

    Ok(())
}
