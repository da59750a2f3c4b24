use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Complex, ComplexPatch, EngineError, Goal, ResultEngine, complexes, goals};

use super::{Engine, normalize_optional_text, validate_text, with_tx};

impl Engine {
    /// Record a new complex for `user_id`.
    pub async fn new_complex(
        &self,
        user_id: &str,
        content: &str,
        category: &str,
        trigger_episode: Option<&str>,
    ) -> ResultEngine<Complex> {
        let content = validate_text(content, "content", 255)?;
        let category = validate_text(category, "category", 100)?;
        let trigger_episode = normalize_optional_text(trigger_episode);

        with_tx!(self, |db_tx| {
            let complex = Complex::new(
                user_id.to_string(),
                content,
                category,
                trigger_episode,
                Utc::now(),
            );
            complexes::ActiveModel::from(&complex).insert(&db_tx).await?;
            Ok(complex)
        })
    }

    /// List the user's complexes in creation order, goals not attached.
    pub async fn complexes(&self, user_id: &str) -> ResultEngine<Vec<Complex>> {
        let models = complexes::Entity::find()
            .filter(complexes::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(complexes::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Complex::try_from).collect()
    }

    /// Return one complex with its goals attached.
    pub async fn complex(&self, user_id: &str, complex_id: Uuid) -> ResultEngine<Complex> {
        with_tx!(self, |db_tx| {
            let model = self.require_complex(&db_tx, user_id, complex_id).await?;
            let mut complex = Complex::try_from(model)?;

            let goal_models = goals::Entity::find()
                .filter(goals::Column::ComplexId.eq(complex_id.to_string()))
                .filter(goals::Column::UserId.eq(user_id.to_string()))
                .order_by_asc(goals::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            complex.goals = goal_models
                .into_iter()
                .map(Goal::try_from)
                .collect::<ResultEngine<Vec<Goal>>>()?;

            Ok(complex)
        })
    }

    /// Apply a partial update to a complex. Omitted fields are unchanged;
    /// an explicit null clears `trigger_episode`.
    pub async fn update_complex(
        &self,
        user_id: &str,
        complex_id: Uuid,
        patch: ComplexPatch,
    ) -> ResultEngine<Complex> {
        let content = patch
            .content
            .as_deref()
            .map(|v| validate_text(v, "content", 255))
            .transpose()?;
        let category = patch
            .category
            .as_deref()
            .map(|v| validate_text(v, "category", 100))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let model = self.require_complex(&db_tx, user_id, complex_id).await?;
            let mut complex = Complex::try_from(model)?;

            if let Some(content) = content {
                complex.content = content;
            }
            if let Some(category) = category {
                complex.category = category;
            }
            if let Some(trigger_episode) = patch.trigger_episode {
                complex.trigger_episode = normalize_optional_text(trigger_episode.as_deref());
            }
            complex.updated_at = Utc::now();

            let active = complexes::ActiveModel {
                id: ActiveValue::Set(complex.id.to_string()),
                content: ActiveValue::Set(complex.content.clone()),
                category: ActiveValue::Set(complex.category.clone()),
                trigger_episode: ActiveValue::Set(complex.trigger_episode.clone()),
                updated_at: ActiveValue::Set(complex.updated_at),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(complex)
        })
    }

    /// Delete a complex owned by `user_id`. Children go with it (cascade at
    /// the schema level).
    pub async fn delete_complex(&self, user_id: &str, complex_id: Uuid) -> ResultEngine<()> {
        let result = complexes::Entity::delete_many()
            .filter(complexes::Column::Id.eq(complex_id.to_string()))
            .filter(complexes::Column::UserId.eq(user_id.to_string()))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("complex not exists".to_string()));
        }
        Ok(())
    }
}
