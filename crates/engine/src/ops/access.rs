use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, actions, complexes, goals};

use super::Engine;

/// Generates a `require_*` lookup that only sees rows owned by `user_id`.
///
/// A missing row and a row owned by another user both come back as
/// `NotFound`; callers cannot tell whether a foreign id exists.
macro_rules! impl_require_owned {
    ($fn_name:ident, $entity:path, $user_col:expr, $model:ty, $err_msg:literal) => {
        pub(super) async fn $fn_name(
            &self,
            db: &DatabaseTransaction,
            user_id: &str,
            id: Uuid,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(id.to_string())
                .filter($user_col.eq(user_id.to_string()))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::NotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_require_owned!(
        require_complex,
        complexes::Entity,
        complexes::Column::UserId,
        complexes::Model,
        "complex not exists"
    );

    impl_require_owned!(
        require_goal,
        goals::Entity,
        goals::Column::UserId,
        goals::Model,
        "goal not exists"
    );

    impl_require_owned!(
        require_action,
        actions::Entity,
        actions::Column::UserId,
        actions::Model,
        "action not exists"
    );
}
