use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Use together with `#[serde(default)]`: an omitted field stays `None`,
/// `null` becomes `Some(None)`, a value becomes `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

pub mod outcome {
    use super::*;

    /// Closed set of outcome kinds accepted on the wire.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum OutcomeKind {
        Quantitative,
        Qualitative,
    }

    /// Request body for attaching a gain or loss.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct OutcomeNew {
        pub kind: OutcomeKind,
        pub description: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OutcomeView {
        pub id: Uuid,
        pub kind: OutcomeKind,
        pub description: String,
        /// RFC3339 timestamp in UTC.
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod complex {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ComplexNew {
        pub content: String,
        pub category: String,
        pub trigger_episode: Option<String>,
    }

    /// Partial update. Omitted fields are left unchanged; an explicit
    /// `null` on `trigger_episode` clears it.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ComplexUpdate {
        pub content: Option<String>,
        pub category: Option<String>,
        #[serde(
            default,
            deserialize_with = "double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub trigger_episode: Option<Option<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ComplexView {
        pub id: Uuid,
        pub content: String,
        pub category: String,
        pub trigger_episode: Option<String>,
        /// RFC3339 timestamp in UTC.
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// A complex with its goals attached, newest last.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ComplexDetail {
        #[serde(flatten)]
        pub complex: ComplexView,
        pub goals: Vec<super::goal::GoalView>,
    }
}

pub mod goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub complex_id: Uuid,
        pub content: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GoalUpdate {
        pub content: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: Uuid,
        pub complex_id: Uuid,
        pub content: String,
        /// RFC3339 timestamp in UTC.
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod action {
    use super::*;
    use super::outcome::{OutcomeNew, OutcomeView};

    /// Request body for the composite create: the action plus its gains
    /// and losses, written as one unit.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActionNew {
        pub goal_id: Uuid,
        pub content: String,
        /// RFC3339 timestamp; absent means the action starts open.
        pub completed_at: Option<String>,
        /// Opaque recurrence rule, passed through as JSON.
        pub recurrence_pattern: Option<serde_json::Value>,
        #[serde(default)]
        pub gains: Vec<OutcomeNew>,
        #[serde(default)]
        pub losses: Vec<OutcomeNew>,
    }

    /// Partial update. Omitted fields are left unchanged; an explicit
    /// `null` on `completed_at` reopens the action, and on
    /// `recurrence_pattern` removes the rule.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ActionUpdate {
        pub content: Option<String>,
        #[serde(
            default,
            deserialize_with = "double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub completed_at: Option<Option<String>>,
        #[serde(
            default,
            deserialize_with = "double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub recurrence_pattern: Option<Option<serde_json::Value>>,
    }

    /// An action as returned by the server. `gains` and `losses` are
    /// always present, empty when there are none.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActionView {
        pub id: Uuid,
        pub goal_id: Uuid,
        pub content: String,
        /// RFC3339 timestamp in UTC; `null` while the action is open.
        pub completed_at: Option<DateTime<Utc>>,
        pub recurrence_pattern: Option<serde_json::Value>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
        pub gains: Vec<OutcomeView>,
        pub losses: Vec<OutcomeView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActionListQuery {
        pub goal_id: Uuid,
    }
}
