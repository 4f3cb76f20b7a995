//! The referee's answers.
//!
//! An [`Answer`] is a main announcement plus, for completed moves, the
//! capture square and a special-case announcement (check, mate, draw).
//! Fields are private: answers built through the named constructors are
//! valid by construction, and [`Answer::from_parts`] validates raw values
//! coming from outside (saved games).

use super::chess::square_from_index;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shakmaty::{Color, KnownOutcome, Square};
use std::fmt;
use thiserror::Error;

/// Primary outcome of a question
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainAnnouncement {
    /// The question was not in the possible-to-ask set; nothing happened
    ImpossibleToAsk,
    /// The move is illegal on the real board - new information for both sides
    IllegalMove,
    RegularMove,
    CaptureDone,
    HasAny,
    NoAny,
}

impl MainAnnouncement {
    pub const ALL: [MainAnnouncement; 6] = [
        MainAnnouncement::ImpossibleToAsk,
        MainAnnouncement::IllegalMove,
        MainAnnouncement::RegularMove,
        MainAnnouncement::CaptureDone,
        MainAnnouncement::HasAny,
        MainAnnouncement::NoAny,
    ];

    /// True for the two announcements that complete a move and pass the turn
    pub fn is_move_done(self) -> bool {
        matches!(self, MainAnnouncement::RegularMove | MainAnnouncement::CaptureDone)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MainAnnouncement::ImpossibleToAsk => "IMPOSSIBLE_TO_ASK",
            MainAnnouncement::IllegalMove => "ILLEGAL_MOVE",
            MainAnnouncement::RegularMove => "REGULAR_MOVE",
            MainAnnouncement::CaptureDone => "CAPTURE_DONE",
            MainAnnouncement::HasAny => "HAS_ANY",
            MainAnnouncement::NoAny => "NO_ANY",
        }
    }
}

/// Geometric kind of a single check
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum CheckKind {
    Rank,
    File,
    LongDiagonal,
    ShortDiagonal,
    Knight,
}

impl CheckKind {
    pub fn special_kind(self) -> SpecialCaseKind {
        match self {
            CheckKind::Rank => SpecialCaseKind::CheckRank,
            CheckKind::File => SpecialCaseKind::CheckFile,
            CheckKind::LongDiagonal => SpecialCaseKind::CheckLongDiagonal,
            CheckKind::ShortDiagonal => SpecialCaseKind::CheckShortDiagonal,
            CheckKind::Knight => SpecialCaseKind::CheckKnight,
        }
    }
}

/// Special-case announcement layered on top of a completed move
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum SpecialCase {
    None,
    DrawTooManyReversibleMoves,
    DrawStalemate,
    DrawInsufficientMaterial,
    CheckmateWhiteWins,
    CheckmateBlackWins,
    Check(CheckKind),
    DoubleCheck(CheckKind, CheckKind),
}

/// Name-only view of [`SpecialCase`], as announced and stored
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialCaseKind {
    None,
    #[serde(rename = "DRAW_TOOMANYREVERSIBLEMOVES")]
    DrawTooManyReversibleMoves,
    DrawStalemate,
    #[serde(rename = "DRAW_INSUFFICIENT")]
    DrawInsufficientMaterial,
    CheckmateWhiteWins,
    CheckmateBlackWins,
    CheckRank,
    CheckFile,
    CheckLongDiagonal,
    CheckShortDiagonal,
    CheckKnight,
    CheckDouble,
}

impl SpecialCaseKind {
    pub const ALL: [SpecialCaseKind; 12] = [
        SpecialCaseKind::None,
        SpecialCaseKind::DrawTooManyReversibleMoves,
        SpecialCaseKind::DrawStalemate,
        SpecialCaseKind::DrawInsufficientMaterial,
        SpecialCaseKind::CheckmateWhiteWins,
        SpecialCaseKind::CheckmateBlackWins,
        SpecialCaseKind::CheckRank,
        SpecialCaseKind::CheckFile,
        SpecialCaseKind::CheckLongDiagonal,
        SpecialCaseKind::CheckShortDiagonal,
        SpecialCaseKind::CheckKnight,
        SpecialCaseKind::CheckDouble,
    ];

    /// The single-check kind this names, if any
    pub fn single_check(self) -> Option<CheckKind> {
        match self {
            SpecialCaseKind::CheckRank => Some(CheckKind::Rank),
            SpecialCaseKind::CheckFile => Some(CheckKind::File),
            SpecialCaseKind::CheckLongDiagonal => Some(CheckKind::LongDiagonal),
            SpecialCaseKind::CheckShortDiagonal => Some(CheckKind::ShortDiagonal),
            SpecialCaseKind::CheckKnight => Some(CheckKind::Knight),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpecialCaseKind::None => "NONE",
            SpecialCaseKind::DrawTooManyReversibleMoves => "DRAW_TOOMANYREVERSIBLEMOVES",
            SpecialCaseKind::DrawStalemate => "DRAW_STALEMATE",
            SpecialCaseKind::DrawInsufficientMaterial => "DRAW_INSUFFICIENT",
            SpecialCaseKind::CheckmateWhiteWins => "CHECKMATE_WHITE_WINS",
            SpecialCaseKind::CheckmateBlackWins => "CHECKMATE_BLACK_WINS",
            SpecialCaseKind::CheckRank => "CHECK_RANK",
            SpecialCaseKind::CheckFile => "CHECK_FILE",
            SpecialCaseKind::CheckLongDiagonal => "CHECK_LONG_DIAGONAL",
            SpecialCaseKind::CheckShortDiagonal => "CHECK_SHORT_DIAGONAL",
            SpecialCaseKind::CheckKnight => "CHECK_KNIGHT",
            SpecialCaseKind::CheckDouble => "CHECK_DOUBLE",
        }
    }
}

impl SpecialCase {
    pub fn kind(&self) -> SpecialCaseKind {
        match self {
            SpecialCase::None => SpecialCaseKind::None,
            SpecialCase::DrawTooManyReversibleMoves => SpecialCaseKind::DrawTooManyReversibleMoves,
            SpecialCase::DrawStalemate => SpecialCaseKind::DrawStalemate,
            SpecialCase::DrawInsufficientMaterial => SpecialCaseKind::DrawInsufficientMaterial,
            SpecialCase::CheckmateWhiteWins => SpecialCaseKind::CheckmateWhiteWins,
            SpecialCase::CheckmateBlackWins => SpecialCaseKind::CheckmateBlackWins,
            SpecialCase::Check(kind) => kind.special_kind(),
            SpecialCase::DoubleCheck(..) => SpecialCaseKind::CheckDouble,
        }
    }

    /// Whether this announcement ends the game
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SpecialCase::DrawTooManyReversibleMoves
                | SpecialCase::DrawStalemate
                | SpecialCase::DrawInsufficientMaterial
                | SpecialCase::CheckmateWhiteWins
                | SpecialCase::CheckmateBlackWins
        )
    }

    /// Game result carried by a terminal announcement
    pub fn outcome(&self) -> Option<KnownOutcome> {
        match self {
            SpecialCase::CheckmateWhiteWins => Some(KnownOutcome::Decisive { winner: Color::White }),
            SpecialCase::CheckmateBlackWins => Some(KnownOutcome::Decisive { winner: Color::Black }),
            SpecialCase::DrawTooManyReversibleMoves
            | SpecialCase::DrawStalemate
            | SpecialCase::DrawInsufficientMaterial => Some(KnownOutcome::Draw),
            _ => None,
        }
    }

    /// Rebuild a special case from its stored name and double-check details
    pub fn from_parts(
        kind: SpecialCaseKind,
        check_1: Option<SpecialCaseKind>,
        check_2: Option<SpecialCaseKind>,
    ) -> Result<Self, AnswerError> {
        if kind != SpecialCaseKind::CheckDouble && (check_1.is_some() || check_2.is_some()) {
            return Err(AnswerError::UnexpectedCheckDetail(kind));
        }

        Ok(match kind {
            SpecialCaseKind::None => SpecialCase::None,
            SpecialCaseKind::DrawTooManyReversibleMoves => SpecialCase::DrawTooManyReversibleMoves,
            SpecialCaseKind::DrawStalemate => SpecialCase::DrawStalemate,
            SpecialCaseKind::DrawInsufficientMaterial => SpecialCase::DrawInsufficientMaterial,
            SpecialCaseKind::CheckmateWhiteWins => SpecialCase::CheckmateWhiteWins,
            SpecialCaseKind::CheckmateBlackWins => SpecialCase::CheckmateBlackWins,
            SpecialCaseKind::CheckRank => SpecialCase::Check(CheckKind::Rank),
            SpecialCaseKind::CheckFile => SpecialCase::Check(CheckKind::File),
            SpecialCaseKind::CheckLongDiagonal => SpecialCase::Check(CheckKind::LongDiagonal),
            SpecialCaseKind::CheckShortDiagonal => SpecialCase::Check(CheckKind::ShortDiagonal),
            SpecialCaseKind::CheckKnight => SpecialCase::Check(CheckKind::Knight),
            SpecialCaseKind::CheckDouble => {
                let first = check_1.and_then(SpecialCaseKind::single_check);
                let second = check_2.and_then(SpecialCaseKind::single_check);
                match (first, second) {
                    (Some(first), Some(second)) => SpecialCase::DoubleCheck(first, second),
                    _ => return Err(AnswerError::InvalidDoubleCheck),
                }
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("CAPTURE_DONE requires a capture square")]
    MissingCaptureSquare,
    #[error("{0:?} must not carry a capture square")]
    UnexpectedCaptureSquare(MainAnnouncement),
    #[error("invalid square number: {0}. Must be 0-63")]
    SquareOutOfRange(i64),
    #[error("double check must carry exactly two single-check kinds")]
    InvalidDoubleCheck,
    #[error("{0:?} must not carry double-check details")]
    UnexpectedCheckDetail(SpecialCaseKind),
    #[error("{0:?} cannot carry a special announcement")]
    UnexpectedSpecialCase(MainAnnouncement),
}

/// The referee's answer to one question
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Answer {
    main: MainAnnouncement,
    capture_square: Option<Square>,
    special: SpecialCase,
}

impl Answer {
    fn bare(main: MainAnnouncement) -> Self {
        Self {
            main,
            capture_square: None,
            special: SpecialCase::None,
        }
    }

    pub fn impossible_to_ask() -> Self {
        Self::bare(MainAnnouncement::ImpossibleToAsk)
    }

    pub fn illegal_move() -> Self {
        Self::bare(MainAnnouncement::IllegalMove)
    }

    pub fn has_any() -> Self {
        Self::bare(MainAnnouncement::HasAny)
    }

    pub fn no_any() -> Self {
        Self::bare(MainAnnouncement::NoAny)
    }

    pub fn regular_move(special: SpecialCase) -> Self {
        Self {
            main: MainAnnouncement::RegularMove,
            capture_square: None,
            special,
        }
    }

    pub fn capture_done(square: Square, special: SpecialCase) -> Self {
        Self {
            main: MainAnnouncement::CaptureDone,
            capture_square: Some(square),
            special,
        }
    }

    /// Build an answer from raw, untrusted values.
    ///
    /// The capture square must be present exactly for `CaptureDone` and lie
    /// in 0-63; only completed moves may carry a special announcement; and
    /// double-check details must be two single-check kinds.
    pub fn from_parts(
        main: MainAnnouncement,
        capture_square: Option<i64>,
        special: SpecialCaseKind,
        check_1: Option<SpecialCaseKind>,
        check_2: Option<SpecialCaseKind>,
    ) -> Result<Self, AnswerError> {
        let capture_square = match (main, capture_square) {
            (MainAnnouncement::CaptureDone, Some(index)) => {
                Some(square_from_index(index).ok_or(AnswerError::SquareOutOfRange(index))?)
            }
            (MainAnnouncement::CaptureDone, None) => return Err(AnswerError::MissingCaptureSquare),
            (other, Some(_)) => return Err(AnswerError::UnexpectedCaptureSquare(other)),
            (_, None) => None,
        };

        let special = SpecialCase::from_parts(special, check_1, check_2)?;
        if !main.is_move_done() && special != SpecialCase::None {
            return Err(AnswerError::UnexpectedSpecialCase(main));
        }

        Ok(Self {
            main,
            capture_square,
            special,
        })
    }

    pub fn main(&self) -> MainAnnouncement {
        self.main
    }

    pub fn capture_square(&self) -> Option<Square> {
        self.capture_square
    }

    pub fn special(&self) -> SpecialCase {
        self.special
    }

    pub fn move_done(&self) -> bool {
        self.main.is_move_done()
    }

    pub fn check_1(&self) -> Option<CheckKind> {
        match self.special {
            SpecialCase::DoubleCheck(first, _) => Some(first),
            _ => None,
        }
    }

    pub fn check_2(&self) -> Option<CheckKind> {
        match self.special {
            SpecialCase::DoubleCheck(_, second) => Some(second),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.main.as_str())?;
        if let Some(square) = self.capture_square {
            write!(f, " at {square}")?;
        }
        if self.special != SpecialCase::None {
            write!(f, ", {}", self.special.kind().as_str())?;
        }
        if let SpecialCase::DoubleCheck(first, second) = self.special {
            write!(
                f,
                " ({} + {})",
                first.special_kind().as_str(),
                second.special_kind().as_str()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_wire_format() {
        for main in MainAnnouncement::ALL {
            assert_eq!(serde_json::to_value(main).unwrap(), main.as_str());
            let parsed: MainAnnouncement = serde_json::from_value(main.as_str().into()).unwrap();
            assert_eq!(parsed, main);
        }
        for kind in SpecialCaseKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
            let parsed: SpecialCaseKind = serde_json::from_value(kind.as_str().into()).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_outcome_of_terminal_cases() {
        assert_eq!(
            SpecialCase::CheckmateBlackWins.outcome(),
            Some(KnownOutcome::Decisive { winner: Color::Black })
        );
        assert_eq!(SpecialCase::DrawStalemate.outcome(), Some(KnownOutcome::Draw));
        assert_eq!(SpecialCase::Check(CheckKind::File).outcome(), None);
        for kind in SpecialCaseKind::ALL {
            if let Ok(special) = SpecialCase::from_parts(kind, None, None) {
                assert_eq!(special.outcome().is_some(), special.is_terminal());
            }
        }
    }

    #[test]
    fn test_move_done_variants() {
        assert!(Answer::regular_move(SpecialCase::None).move_done());
        assert!(Answer::capture_done(Square::E4, SpecialCase::None).move_done());
        assert!(!Answer::illegal_move().move_done());
        assert!(!Answer::has_any().move_done());
        assert!(!Answer::impossible_to_ask().move_done());
    }

    #[test]
    fn test_capture_requires_square() {
        let err = Answer::from_parts(
            MainAnnouncement::CaptureDone,
            None,
            SpecialCaseKind::None,
            None,
            None,
        );
        assert_eq!(err, Err(AnswerError::MissingCaptureSquare));
    }

    #[test]
    fn test_capture_square_range() {
        for bad in [-1, 64, 1000] {
            let err = Answer::from_parts(
                MainAnnouncement::CaptureDone,
                Some(bad),
                SpecialCaseKind::None,
                None,
                None,
            );
            assert_eq!(err, Err(AnswerError::SquareOutOfRange(bad)));
        }

        let ok = Answer::from_parts(
            MainAnnouncement::CaptureDone,
            Some(28),
            SpecialCaseKind::CheckKnight,
            None,
            None,
        )
        .unwrap();
        assert_eq!(ok.capture_square(), Some(Square::E4));
        assert_eq!(ok.special(), SpecialCase::Check(CheckKind::Knight));
    }

    #[test]
    fn test_square_only_on_capture() {
        let err = Answer::from_parts(
            MainAnnouncement::RegularMove,
            Some(12),
            SpecialCaseKind::None,
            None,
            None,
        );
        assert_eq!(
            err,
            Err(AnswerError::UnexpectedCaptureSquare(MainAnnouncement::RegularMove))
        );
    }

    #[test]
    fn test_double_check_validation() {
        let double = Answer::from_parts(
            MainAnnouncement::RegularMove,
            None,
            SpecialCaseKind::CheckDouble,
            Some(SpecialCaseKind::CheckRank),
            Some(SpecialCaseKind::CheckKnight),
        )
        .unwrap();
        assert_eq!(double.check_1(), Some(CheckKind::Rank));
        assert_eq!(double.check_2(), Some(CheckKind::Knight));

        let missing = Answer::from_parts(
            MainAnnouncement::RegularMove,
            None,
            SpecialCaseKind::CheckDouble,
            Some(SpecialCaseKind::CheckRank),
            None,
        );
        assert_eq!(missing, Err(AnswerError::InvalidDoubleCheck));

        let not_single = Answer::from_parts(
            MainAnnouncement::RegularMove,
            None,
            SpecialCaseKind::CheckDouble,
            Some(SpecialCaseKind::CheckRank),
            Some(SpecialCaseKind::DrawStalemate),
        );
        assert_eq!(not_single, Err(AnswerError::InvalidDoubleCheck));

        let stray = Answer::from_parts(
            MainAnnouncement::RegularMove,
            None,
            SpecialCaseKind::CheckFile,
            Some(SpecialCaseKind::CheckRank),
            None,
        );
        assert_eq!(
            stray,
            Err(AnswerError::UnexpectedCheckDetail(SpecialCaseKind::CheckFile))
        );
    }

    #[test]
    fn test_special_only_on_completed_moves() {
        let err = Answer::from_parts(
            MainAnnouncement::IllegalMove,
            None,
            SpecialCaseKind::CheckFile,
            None,
            None,
        );
        assert_eq!(
            err,
            Err(AnswerError::UnexpectedSpecialCase(MainAnnouncement::IllegalMove))
        );
    }

    #[test]
    fn test_check_details_absent_for_single_check() {
        let answer = Answer::regular_move(SpecialCase::Check(CheckKind::File));
        assert_eq!(answer.check_1(), None);
        assert_eq!(answer.check_2(), None);
    }

    #[test]
    fn test_display() {
        let answer = Answer::capture_done(Square::F7, SpecialCase::Check(CheckKind::ShortDiagonal));
        assert_eq!(answer.to_string(), "CAPTURE_DONE at f7, CHECK_SHORT_DIAGONAL");
        let double = Answer::regular_move(SpecialCase::DoubleCheck(CheckKind::Rank, CheckKind::Knight));
        assert_eq!(
            double.to_string(),
            "REGULAR_MOVE, CHECK_DOUBLE (CHECK_RANK + CHECK_KNIGHT)"
        );
    }
}
