//! Stateful game layer: the referee and what it derives from its position.

pub mod config;
pub mod questions;
pub mod referee;
pub mod visible;

pub use config::{DEFAULT_REVERSIBLE_MOVE_LIMIT, RefereeConfig};
pub use questions::{AnyProbe, TurnState, possible_questions};
pub use referee::{Referee, RefereeError};
pub use visible::VisibleBoard;
