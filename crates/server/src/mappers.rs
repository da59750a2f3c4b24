//! Conversions between wire DTOs and engine types.
//!
//! Everything here is a pure function; parsing failures surface as
//! validation errors so the handlers can stay thin.

use chrono::{DateTime, Utc};

use api_types::{action, complex, goal, outcome};
use engine::{
    Action, ActionNewCmd, ActionPatch, Complex, ComplexPatch, EngineError, Goal, Outcome,
    OutcomeDraft, OutcomeKind,
};

use crate::ServerError;

pub fn kind_to_engine(kind: outcome::OutcomeKind) -> OutcomeKind {
    match kind {
        outcome::OutcomeKind::Quantitative => OutcomeKind::Quantitative,
        outcome::OutcomeKind::Qualitative => OutcomeKind::Qualitative,
    }
}

pub fn kind_to_api(kind: OutcomeKind) -> outcome::OutcomeKind {
    match kind {
        OutcomeKind::Quantitative => outcome::OutcomeKind::Quantitative,
        OutcomeKind::Qualitative => outcome::OutcomeKind::Qualitative,
    }
}

/// Parse an RFC3339 timestamp from the wire, normalized to UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ServerError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            ServerError::Engine(EngineError::Validation(format!(
                "invalid RFC3339 timestamp: {value}"
            )))
        })
}

pub fn outcome_view(outcome: &Outcome) -> outcome::OutcomeView {
    outcome::OutcomeView {
        id: outcome.id,
        kind: kind_to_api(outcome.kind),
        description: outcome.description.clone(),
        created_at: outcome.created_at,
        updated_at: outcome.updated_at,
    }
}

pub fn outcome_draft(new: &outcome::OutcomeNew) -> OutcomeDraft {
    OutcomeDraft {
        kind: kind_to_engine(new.kind),
        description: new.description.clone(),
    }
}

pub fn complex_view(complex: &Complex) -> complex::ComplexView {
    complex::ComplexView {
        id: complex.id,
        content: complex.content.clone(),
        category: complex.category.clone(),
        trigger_episode: complex.trigger_episode.clone(),
        created_at: complex.created_at,
        updated_at: complex.updated_at,
    }
}

pub fn complex_detail(complex: &Complex) -> complex::ComplexDetail {
    complex::ComplexDetail {
        complex: complex_view(complex),
        goals: complex.goals.iter().map(goal_view).collect(),
    }
}

pub fn complex_patch(update: complex::ComplexUpdate) -> ComplexPatch {
    ComplexPatch {
        content: update.content,
        category: update.category,
        trigger_episode: update.trigger_episode,
    }
}

pub fn goal_view(goal: &Goal) -> goal::GoalView {
    goal::GoalView {
        id: goal.id,
        complex_id: goal.complex_id,
        content: goal.content.clone(),
        created_at: goal.created_at,
        updated_at: goal.updated_at,
    }
}

pub fn action_view(action: &Action) -> action::ActionView {
    action::ActionView {
        id: action.id,
        goal_id: action.goal_id,
        content: action.content.clone(),
        completed_at: action.completed_at,
        recurrence_pattern: action.recurrence_pattern.clone(),
        created_at: action.created_at,
        updated_at: action.updated_at,
        gains: action.gains.iter().map(outcome_view).collect(),
        losses: action.losses.iter().map(outcome_view).collect(),
    }
}

pub fn action_cmd(user_id: &str, new: action::ActionNew) -> Result<ActionNewCmd, ServerError> {
    let completed_at = new
        .completed_at
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;

    Ok(ActionNewCmd {
        user_id: user_id.to_string(),
        goal_id: new.goal_id,
        content: new.content,
        completed_at,
        recurrence_pattern: new.recurrence_pattern,
        gains: new.gains.iter().map(outcome_draft).collect(),
        losses: new.losses.iter().map(outcome_draft).collect(),
    })
}

pub fn action_patch(update: action::ActionUpdate) -> Result<ActionPatch, ServerError> {
    let completed_at = match update.completed_at {
        None => None,
        Some(None) => Some(None),
        Some(Some(raw)) => Some(Some(parse_timestamp(&raw)?)),
    };

    Ok(ActionPatch {
        content: update.content,
        completed_at,
        recurrence_pattern: update.recurrence_pattern,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn timestamp_round_trips_through_utc() {
        let parsed = parse_timestamp("2026-03-01T09:30:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-01T07:30:00+00:00");
    }

    #[test]
    fn malformed_timestamp_is_a_validation_error() {
        let err = parse_timestamp("yesterday").unwrap_err();
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn action_patch_distinguishes_absent_from_null() {
        let update: action::ActionUpdate = serde_json::from_str(r#"{}"#).unwrap();
        let patch = action_patch(update).unwrap();
        assert_eq!(patch.completed_at, None);

        let update: action::ActionUpdate =
            serde_json::from_str(r#"{"completed_at": null}"#).unwrap();
        let patch = action_patch(update).unwrap();
        assert_eq!(patch.completed_at, Some(None));

        let update: action::ActionUpdate =
            serde_json::from_str(r#"{"completed_at": "2026-03-01T07:30:00Z"}"#).unwrap();
        let patch = action_patch(update).unwrap();
        assert!(matches!(patch.completed_at, Some(Some(_))));
    }

    #[test]
    fn complex_update_null_clears_trigger_episode() {
        let update: complex::ComplexUpdate =
            serde_json::from_str(r#"{"trigger_episode": null}"#).unwrap();
        assert_eq!(complex_patch(update).trigger_episode, Some(None));

        let update: complex::ComplexUpdate = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(complex_patch(update).trigger_episode, None);
    }

    #[test]
    fn action_view_carries_the_whole_action() {
        let now = chrono::Utc::now();
        let mut act = Action::new(
            "alice".to_string(),
            uuid::Uuid::new_v4(),
            "spoke at the town hall".to_string(),
            Some(now),
            Some(serde_json::json!({"freq": "weekly"})),
            now,
        );
        act.gains.push(Outcome::new(
            "alice".to_string(),
            act.id,
            OutcomeKind::Qualitative,
            "felt heard".to_string(),
            0,
            now,
        ));
        act.gains.push(Outcome::new(
            "alice".to_string(),
            act.id,
            OutcomeKind::Quantitative,
            "audience of 40".to_string(),
            1,
            now,
        ));
        act.losses.push(Outcome::new(
            "alice".to_string(),
            act.id,
            OutcomeKind::Qualitative,
            "slept badly before".to_string(),
            0,
            now,
        ));

        let view = action_view(&act);
        assert_eq!(view.id, act.id);
        assert_eq!(view.goal_id, act.goal_id);
        assert_eq!(view.content, "spoke at the town hall");
        assert_eq!(view.completed_at, Some(now));
        assert_eq!(
            view.recurrence_pattern,
            Some(serde_json::json!({"freq": "weekly"}))
        );
        assert_eq!(view.gains.len(), 2);
        assert_eq!(view.gains[0].kind, outcome::OutcomeKind::Qualitative);
        assert_eq!(view.gains[0].description, "felt heard");
        assert_eq!(view.gains[1].kind, outcome::OutcomeKind::Quantitative);
        assert_eq!(view.gains[1].description, "audience of 40");
        assert_eq!(view.losses.len(), 1);
        assert_eq!(view.losses[0].description, "slept badly before");
    }

    #[test]
    fn kinds_round_trip() {
        for kind in [OutcomeKind::Quantitative, OutcomeKind::Qualitative] {
            assert_eq!(kind_to_engine(kind_to_api(kind)), kind);
        }
    }
}
