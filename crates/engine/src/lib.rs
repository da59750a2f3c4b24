pub use actions::{Action, ActionNewCmd, ActionPatch};
pub use complexes::{Complex, ComplexPatch};
pub use error::EngineError;
pub use goals::{Goal, GoalPatch};
pub use ops::{Engine, EngineBuilder};
pub use outcomes::{Outcome, OutcomeDraft, OutcomeKind, OutcomeSide};

mod actions;
mod complexes;
mod error;
mod gains;
mod goals;
mod losses;
mod ops;
mod outcomes;

type ResultEngine<T> = Result<T, EngineError>;
