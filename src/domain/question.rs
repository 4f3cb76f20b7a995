//! Questions a player may put to the referee.

use super::chess::{ChessMove, MoveParseError};
use std::fmt;
use std::str::FromStr;

/// What a player asks. Ordering is structural: common moves first (by
/// move), then the any-rule probe.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Question {
    /// "Is this move legal?" - executed immediately if it is
    Common(ChessMove),
    /// "Do I have any pawn capture?"
    AskAny,
}

/// The part of a question the opponent is told about
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum QuestionKind {
    Common,
    AskAny,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::Common(_) => QuestionKind::Common,
            Question::AskAny => QuestionKind::AskAny,
        }
    }

    pub fn chess_move(&self) -> Option<ChessMove> {
        match self {
            Question::Common(m) => Some(*m),
            Question::AskAny => None,
        }
    }
}

impl From<ChessMove> for Question {
    fn from(m: ChessMove) -> Self {
        Question::Common(m)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Question::Common(m) => write!(f, "{m}"),
            Question::AskAny => write!(f, "any"),
        }
    }
}

/// Parses `any` or a coordinate move such as `e2e4`
impl FromStr for Question {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("any") {
            Ok(Question::AskAny)
        } else {
            s.parse().map(Question::Common)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;

    #[test]
    fn test_parse_question() {
        assert_eq!("ANY".parse::<Question>().unwrap(), Question::AskAny);
        assert_eq!(
            "e2e4".parse::<Question>().unwrap(),
            Question::Common(ChessMove::new(Square::E2, Square::E4))
        );
        assert!("anything".parse::<Question>().is_err());
    }

    #[test]
    fn test_ordering_puts_common_before_any() {
        let common = Question::Common(ChessMove::new(Square::H7, Square::H8));
        assert!(common < Question::AskAny);
        assert_eq!(common.kind(), QuestionKind::Common);
        assert_eq!(Question::AskAny.chess_move(), None);
    }
}
