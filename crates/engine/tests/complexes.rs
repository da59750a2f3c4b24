use sea_orm::Database;

use engine::{ComplexPatch, Engine, EngineError};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

#[tokio::test]
async fn create_trims_and_normalizes() {
    let engine = engine_with_db().await;

    let complex = engine
        .new_complex("alice", "  fear of failure  ", " work ", Some("   "))
        .await
        .unwrap();

    assert_eq!(complex.content, "fear of failure");
    assert_eq!(complex.category, "work");
    assert!(complex.trigger_episode.is_none());
    assert_eq!(complex.created_at, complex.updated_at);
}

#[tokio::test]
async fn create_rejects_out_of_bounds_text() {
    let engine = engine_with_db().await;

    let err = engine
        .new_complex("alice", "", "work", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine
        .new_complex("alice", &"x".repeat(256), "work", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine
        .new_complex("alice", "fine", &"c".repeat(101), None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn detail_includes_goals_in_creation_order() {
    let engine = engine_with_db().await;

    let complex = engine
        .new_complex("alice", "fear of heights", "phobias", None)
        .await
        .unwrap();
    engine
        .new_goal("alice", complex.id, "visit an observation deck")
        .await
        .unwrap();
    engine
        .new_goal("alice", complex.id, "take a cable car")
        .await
        .unwrap();

    let fetched = engine.complex("alice", complex.id).await.unwrap();
    assert_eq!(fetched.goals.len(), 2);
    assert_eq!(fetched.goals[0].content, "visit an observation deck");
    assert_eq!(fetched.goals[1].content, "take a cable car");
}

#[tokio::test]
async fn patch_updates_only_named_fields() {
    let engine = engine_with_db().await;

    let complex = engine
        .new_complex(
            "alice",
            "social anxiety",
            "social",
            Some("a bad presentation"),
        )
        .await
        .unwrap();

    let patched = engine
        .update_complex(
            "alice",
            complex.id,
            ComplexPatch {
                content: Some("social anxiety at work".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(patched.content, "social anxiety at work");
    assert_eq!(patched.category, "social");
    assert_eq!(patched.trigger_episode.as_deref(), Some("a bad presentation"));
    assert!(patched.updated_at >= complex.updated_at);
}

#[tokio::test]
async fn explicit_null_clears_trigger_episode() {
    let engine = engine_with_db().await;

    let complex = engine
        .new_complex("alice", "stage fright", "social", Some("a school play"))
        .await
        .unwrap();

    let patched = engine
        .update_complex(
            "alice",
            complex.id,
            ComplexPatch {
                trigger_episode: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(patched.trigger_episode.is_none());

    // Omitting the field leaves the cleared state untouched.
    let patched = engine
        .update_complex("alice", complex.id, ComplexPatch::default())
        .await
        .unwrap();
    assert!(patched.trigger_episode.is_none());
}

#[tokio::test]
async fn delete_cascades_to_goals() {
    let engine = engine_with_db().await;

    let complex = engine
        .new_complex("alice", "burnout", "work", None)
        .await
        .unwrap();
    let goal = engine
        .new_goal("alice", complex.id, "take a real vacation")
        .await
        .unwrap();

    engine.delete_complex("alice", complex.id).await.unwrap();

    let err = engine.goal("alice", goal.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("goal not exists".to_string()));
    assert!(engine.goals("alice").await.unwrap().is_empty());
}
