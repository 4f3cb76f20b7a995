//! Pure Kriegspiel domain types.
//! No I/O and no game state - this is the domain layer.

pub mod answer;
pub mod check;
pub mod chess;
pub mod question;
pub mod scoresheet;

pub use answer::{Answer, AnswerError, CheckKind, MainAnnouncement, SpecialCase, SpecialCaseKind};
pub use check::{announce_check, classify};
pub use chess::{ChessMove, MoveParseError, Promotion};
pub use question::{Question, QuestionKind};
pub use scoresheet::{MoveSet, Scoresheet};
