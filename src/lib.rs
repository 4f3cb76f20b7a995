//! Kriegspiel referee.
//!
//! A referee for the Berkeley variant of Kriegspiel: two players each see
//! only their own pieces and propose moves to a referee who holds the real
//! board. The referee answers every question, keeps both scoresheets and
//! can save and restore a game as JSON.

pub mod domain;
pub mod models;
pub mod persistence;

pub use domain::{Answer, CheckKind, ChessMove, MainAnnouncement, Question, QuestionKind, Scoresheet, SpecialCase};
pub use models::{Referee, RefereeConfig, RefereeError};
pub use persistence::{PersistenceError, load_game, save_game};
