use sea_orm::Database;

use engine::{ComplexPatch, Engine, EngineError, GoalPatch};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

#[tokio::test]
async fn foreign_complex_reads_as_not_found() {
    let engine = engine_with_db().await;

    let complex = engine
        .new_complex("alice", "fear of public speaking", "social", None)
        .await
        .unwrap();

    let err = engine.complex("mallory", complex.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("complex not exists".to_string()));

    // The same answer as for an id that does not exist at all.
    let err = engine.complex("mallory", Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("complex not exists".to_string()));
}

#[tokio::test]
async fn goal_under_foreign_complex_is_rejected_without_writes() {
    let engine = engine_with_db().await;

    let complex = engine
        .new_complex("alice", "perfectionism", "work", None)
        .await
        .unwrap();

    let err = engine
        .new_goal("mallory", complex.id, "ship something imperfect")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("complex not exists".to_string()));

    assert!(engine.goals("mallory").await.unwrap().is_empty());
    assert!(engine.goals("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn foreign_update_and_delete_are_not_found() {
    let engine = engine_with_db().await;

    let complex = engine
        .new_complex("alice", "procrastination", "habits", None)
        .await
        .unwrap();
    let goal = engine
        .new_goal("alice", complex.id, "start tasks the same day")
        .await
        .unwrap();

    let err = engine
        .update_complex(
            "mallory",
            complex.id,
            ComplexPatch {
                content: Some("hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("complex not exists".to_string()));

    let err = engine
        .update_goal(
            "mallory",
            goal.id,
            GoalPatch {
                content: Some("hijacked".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("goal not exists".to_string()));

    let err = engine.delete_goal("mallory", goal.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("goal not exists".to_string()));

    let err = engine
        .delete_complex("mallory", complex.id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("complex not exists".to_string()));

    // Nothing leaked or changed for the owner.
    let fetched = engine.complex("alice", complex.id).await.unwrap();
    assert_eq!(fetched.content, "procrastination");
    assert_eq!(fetched.goals.len(), 1);
}

#[tokio::test]
async fn listings_are_scoped_per_user() {
    let engine = engine_with_db().await;

    engine
        .new_complex("alice", "impostor syndrome", "work", None)
        .await
        .unwrap();
    engine
        .new_complex("bob", "fear of flying", "travel", Some("turbulence in 2019"))
        .await
        .unwrap();

    let alice = engine.complexes("alice").await.unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].content, "impostor syndrome");

    let bob = engine.complexes("bob").await.unwrap();
    assert_eq!(bob.len(), 1);
    assert_eq!(bob[0].trigger_episode.as_deref(), Some("turbulence in 2019"));

    assert!(engine.complexes("carol").await.unwrap().is_empty());
}
