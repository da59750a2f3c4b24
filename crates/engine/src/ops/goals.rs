use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Goal, GoalPatch, ResultEngine, goals};

use super::{Engine, validate_text, with_tx};

impl Engine {
    /// Record a new goal under one of the user's complexes.
    ///
    /// The parent is checked first; nothing is written when the complex is
    /// missing or owned by someone else.
    pub async fn new_goal(
        &self,
        user_id: &str,
        complex_id: Uuid,
        content: &str,
    ) -> ResultEngine<Goal> {
        let content = validate_text(content, "content", 255)?;

        with_tx!(self, |db_tx| {
            self.require_complex(&db_tx, user_id, complex_id).await?;

            let goal = Goal::new(user_id.to_string(), complex_id, content, Utc::now());
            goals::ActiveModel::from(&goal).insert(&db_tx).await?;
            Ok(goal)
        })
    }

    /// List all of the user's goals in creation order.
    pub async fn goals(&self, user_id: &str) -> ResultEngine<Vec<Goal>> {
        let models = goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(goals::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Goal::try_from).collect()
    }

    /// Return one goal scoped to its owner.
    pub async fn goal(&self, user_id: &str, goal_id: Uuid) -> ResultEngine<Goal> {
        with_tx!(self, |db_tx| {
            let model = self.require_goal(&db_tx, user_id, goal_id).await?;
            Goal::try_from(model)
        })
    }

    /// Apply a partial update to a goal. The parent complex never changes.
    pub async fn update_goal(
        &self,
        user_id: &str,
        goal_id: Uuid,
        patch: GoalPatch,
    ) -> ResultEngine<Goal> {
        let content = patch
            .content
            .as_deref()
            .map(|v| validate_text(v, "content", 255))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let model = self.require_goal(&db_tx, user_id, goal_id).await?;
            let mut goal = Goal::try_from(model)?;

            if let Some(content) = content {
                goal.content = content;
            }
            goal.updated_at = Utc::now();

            let active = goals::ActiveModel {
                id: ActiveValue::Set(goal.id.to_string()),
                content: ActiveValue::Set(goal.content.clone()),
                updated_at: ActiveValue::Set(goal.updated_at),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(goal)
        })
    }

    /// Delete a goal owned by `user_id`; its actions cascade at the schema
    /// level.
    pub async fn delete_goal(&self, user_id: &str, goal_id: Uuid) -> ResultEngine<()> {
        let result = goals::Entity::delete_many()
            .filter(goals::Column::Id.eq(goal_id.to_string()))
            .filter(goals::Column::UserId.eq(user_id.to_string()))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("goal not exists".to_string()));
        }
        Ok(())
    }
}
