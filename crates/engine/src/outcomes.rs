//! Outcome primitives shared by gains and losses.
//!
//! A gain and a loss have the same shape; they differ only by which side of
//! the ledger they land on, which is why they share one domain type here
//! and split into two tables ([`gains`], [`losses`]) at the storage layer.
//!
//! [`gains`]: crate::gains
//! [`losses`]: crate::losses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

/// Closed set of outcome kinds. Anything else is rejected at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Quantitative,
    Qualitative,
}

impl OutcomeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quantitative => "quantitative",
            Self::Qualitative => "qualitative",
        }
    }
}

impl TryFrom<&str> for OutcomeKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "quantitative" => Ok(Self::Quantitative),
            "qualitative" => Ok(Self::Qualitative),
            other => Err(EngineError::Validation(format!(
                "invalid outcome kind: {other}"
            ))),
        }
    }
}

/// Which ledger side an outcome belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeSide {
    Gain,
    Loss,
}

impl OutcomeSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gain => "gain",
            Self::Loss => "loss",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: Uuid,
    pub user_id: String,
    pub action_id: Uuid,
    pub kind: OutcomeKind,
    pub description: String,
    /// Insertion index within the owning action; listings preserve it.
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Outcome {
    pub fn new(
        user_id: String,
        action_id: Uuid,
        kind: OutcomeKind,
        description: String,
        position: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action_id,
            kind,
            description,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An outcome as submitted by the caller, before it is bound to an action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDraft {
    pub kind: OutcomeKind,
    pub description: String,
}
