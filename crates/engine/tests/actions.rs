use std::time::Duration;

use sea_orm::Database;
use serde_json::json;

use engine::{
    ActionNewCmd, ActionPatch, Engine, EngineError, OutcomeDraft, OutcomeKind, OutcomeSide,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

async fn seeded_goal(engine: &Engine, user_id: &str) -> Uuid {
    let complex = engine
        .new_complex(user_id, "fear of public speaking", "social", None)
        .await
        .unwrap();
    engine
        .new_goal(user_id, complex.id, "give one talk per quarter")
        .await
        .unwrap()
        .id
}

fn draft(kind: OutcomeKind, description: &str) -> OutcomeDraft {
    OutcomeDraft {
        kind,
        description: description.to_string(),
    }
}

#[tokio::test]
async fn composite_create_attaches_outcomes() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    let action = engine
        .create_action(ActionNewCmd {
            user_id: "alice".to_string(),
            goal_id,
            content: "spoke at the town hall".to_string(),
            completed_at: None,
            recurrence_pattern: Some(json!({"freq": "weekly", "count": 4})),
            gains: vec![
                draft(OutcomeKind::Qualitative, "felt heard"),
                draft(OutcomeKind::Quantitative, "audience of 40"),
            ],
            losses: vec![draft(OutcomeKind::Qualitative, "slept badly before")],
        })
        .await
        .unwrap();

    assert!(action.completed_at.is_none());
    assert_eq!(action.gains.len(), 2);
    assert_eq!(action.losses.len(), 1);

    let fetched = engine.action("alice", action.id).await.unwrap();
    assert_eq!(fetched.content, "spoke at the town hall");
    assert_eq!(
        fetched.recurrence_pattern,
        Some(json!({"freq": "weekly", "count": 4}))
    );
    assert_eq!(fetched.gains[0].description, "felt heard");
    assert_eq!(fetched.gains[1].description, "audience of 40");
    assert_eq!(fetched.gains[0].kind, OutcomeKind::Qualitative);
    assert_eq!(fetched.losses[0].description, "slept badly before");
}

#[tokio::test]
async fn composite_create_rolls_back_on_bad_outcome() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    // The gain is valid and gets inserted first; the blank loss fails
    // afterwards and must take the whole write down with it.
    let err = engine
        .create_action(ActionNewCmd {
            user_id: "alice".to_string(),
            goal_id,
            content: "tried journaling".to_string(),
            completed_at: None,
            recurrence_pattern: None,
            gains: vec![draft(OutcomeKind::Qualitative, "clearer head")],
            losses: vec![draft(OutcomeKind::Qualitative, "   ")],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    assert!(engine.actions_for_goal("alice", goal_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_patch_preserves_the_action() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    let action = engine
        .create_action(ActionNewCmd {
            user_id: "alice".to_string(),
            goal_id,
            content: "walked to work".to_string(),
            completed_at: None,
            recurrence_pattern: None,
            gains: vec![draft(OutcomeKind::Quantitative, "4000 steps")],
            losses: Vec::new(),
        })
        .await
        .unwrap();

    let patched = engine
        .update_action("alice", action.id, ActionPatch::default())
        .await
        .unwrap();

    assert_eq!(patched.content, action.content);
    assert_eq!(patched.completed_at, action.completed_at);
    assert_eq!(patched.recurrence_pattern, action.recurrence_pattern);
    assert_eq!(patched.gains.len(), 1);
}

#[tokio::test]
async fn completed_at_patch_sets_and_clears() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    let action = engine
        .create_action(ActionNewCmd {
            user_id: "alice".to_string(),
            goal_id,
            content: "called an old friend".to_string(),
            completed_at: None,
            recurrence_pattern: None,
            gains: Vec::new(),
            losses: Vec::new(),
        })
        .await
        .unwrap();

    let done_at = chrono::Utc::now();
    let patched = engine
        .update_action(
            "alice",
            action.id,
            ActionPatch {
                completed_at: Some(Some(done_at)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.completed_at, Some(done_at));

    // An explicit null reverts the action to open.
    let reopened = engine
        .update_action(
            "alice",
            action.id,
            ActionPatch {
                completed_at: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(reopened.completed_at.is_none());
}

#[tokio::test]
async fn listing_is_newest_first() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    for content in ["first", "second", "third"] {
        engine
            .create_action(ActionNewCmd {
                user_id: "alice".to_string(),
                goal_id,
                content: content.to_string(),
                completed_at: None,
                recurrence_pattern: None,
                gains: Vec::new(),
                losses: Vec::new(),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let listed = engine.actions_for_goal("alice", goal_id).await.unwrap();
    let contents: Vec<&str> = listed.iter().map(|a| a.content.as_str()).collect();
    assert_eq!(contents, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn late_outcome_lands_after_existing_ones() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    let action = engine
        .create_action(ActionNewCmd {
            user_id: "alice".to_string(),
            goal_id,
            content: "joined a gym".to_string(),
            completed_at: None,
            recurrence_pattern: None,
            gains: vec![
                draft(OutcomeKind::Qualitative, "more energy"),
                draft(OutcomeKind::Quantitative, "2 sessions"),
            ],
            losses: Vec::new(),
        })
        .await
        .unwrap();

    let added = engine
        .add_outcome(
            "alice",
            action.id,
            OutcomeSide::Gain,
            OutcomeKind::Qualitative,
            "better sleep",
        )
        .await
        .unwrap();
    assert_eq!(added.position, 2);

    let fetched = engine.action("alice", action.id).await.unwrap();
    let descriptions: Vec<&str> = fetched.gains.iter().map(|g| g.description.as_str()).collect();
    assert_eq!(descriptions, vec!["more energy", "2 sessions", "better sleep"]);
}

#[tokio::test]
async fn outcome_added_after_a_delete_still_lands_last() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    let action = engine
        .create_action(ActionNewCmd {
            user_id: "alice".to_string(),
            goal_id,
            content: "cooked at home".to_string(),
            completed_at: None,
            recurrence_pattern: None,
            gains: vec![
                draft(OutcomeKind::Quantitative, "saved 15 euro"),
                draft(OutcomeKind::Qualitative, "ate better"),
            ],
            losses: Vec::new(),
        })
        .await
        .unwrap();

    engine
        .delete_outcome("alice", OutcomeSide::Gain, action.gains[0].id)
        .await
        .unwrap();

    let added = engine
        .add_outcome(
            "alice",
            action.id,
            OutcomeSide::Gain,
            OutcomeKind::Qualitative,
            "learned a recipe",
        )
        .await
        .unwrap();

    // The survivor keeps position 1, so the new row must not reuse it.
    assert_eq!(added.position, 2);

    let fetched = engine.action("alice", action.id).await.unwrap();
    let positions: Vec<i32> = fetched.gains.iter().map(|g| g.position).collect();
    assert_eq!(positions, vec![1, 2]);
    let descriptions: Vec<&str> = fetched.gains.iter().map(|g| g.description.as_str()).collect();
    assert_eq!(descriptions, vec!["ate better", "learned a recipe"]);
}

#[tokio::test]
async fn outcome_delete_is_scoped_to_owner() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    let action = engine
        .create_action(ActionNewCmd {
            user_id: "alice".to_string(),
            goal_id,
            content: "skipped dessert".to_string(),
            completed_at: None,
            recurrence_pattern: None,
            gains: Vec::new(),
            losses: vec![draft(OutcomeKind::Qualitative, "felt deprived")],
        })
        .await
        .unwrap();
    let loss_id = action.losses[0].id;

    let err = engine
        .delete_outcome("mallory", OutcomeSide::Loss, loss_id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("loss not exists".to_string()));

    engine
        .delete_outcome("alice", OutcomeSide::Loss, loss_id)
        .await
        .unwrap();

    let fetched = engine.action("alice", action.id).await.unwrap();
    assert!(fetched.losses.is_empty());
}

#[tokio::test]
async fn deleting_an_action_takes_its_outcomes() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    let action = engine
        .create_action(ActionNewCmd {
            user_id: "alice".to_string(),
            goal_id,
            content: "went for a run".to_string(),
            completed_at: Some(chrono::Utc::now()),
            recurrence_pattern: None,
            gains: vec![draft(OutcomeKind::Quantitative, "5 km")],
            losses: Vec::new(),
        })
        .await
        .unwrap();
    let gain_id = action.gains[0].id;

    engine.delete_action("alice", action.id).await.unwrap();

    let err = engine.action("alice", action.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("action not exists".to_string()));

    // The cascade already removed the gain.
    let err = engine
        .delete_outcome("alice", OutcomeSide::Gain, gain_id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("gain not exists".to_string()));
}

#[tokio::test]
async fn actions_listing_requires_an_owned_goal() {
    let engine = engine_with_db().await;
    let goal_id = seeded_goal(&engine, "alice").await;

    let err = engine
        .actions_for_goal("mallory", goal_id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("goal not exists".to_string()));
}
