//! The possible-to-ask set.
//!
//! Recomputed from scratch after every answered question: the referee's
//! position plus what the side to move has learned this turn fully
//! determines which questions may still be asked.

use super::visible::VisibleBoard;
use crate::domain::{MainAnnouncement, Question, Scoresheet};
use shakmaty::Chess;
use std::collections::BTreeSet;

/// Outcome of this turn's any-rule question
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnyProbe {
    #[default]
    NotAsked,
    /// A pawn capture exists and the player must try pawn captures
    HasAny,
    NoAny,
}

/// What the side to move has learned since their turn began
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnState {
    pub probe: AnyProbe,
    /// Questions already answered `IllegalMove`
    pub rejected: BTreeSet<Question>,
}

impl TurnState {
    pub fn must_use_pawns(&self) -> bool {
        self.probe == AnyProbe::HasAny
    }

    /// Replay what the side to move learned this turn from their own
    /// scoresheet.
    ///
    /// The latest own move-set belongs to the current turn unless it ends in
    /// a completed move.
    pub fn from_scoresheet(sheet: &Scoresheet) -> Self {
        let mut turn = TurnState::default();
        let Some(current) = sheet.moves_own().last() else {
            return turn;
        };
        if current.last().is_some_and(|(_, answer)| answer.move_done()) {
            return turn;
        }

        for &(question, answer) in current {
            match answer.main() {
                MainAnnouncement::HasAny => turn.probe = AnyProbe::HasAny,
                MainAnnouncement::NoAny => turn.probe = AnyProbe::NoAny,
                MainAnnouncement::IllegalMove => {
                    turn.rejected.insert(question);
                }
                _ => {}
            }
        }
        turn
    }
}

/// Every question the side to move may ask right now.
///
/// Before any-rule: visible moves, pawn-capture probes and `AskAny` (if the
/// rule is on). After `HasAny`: pawn-capture probes only. After `NoAny`:
/// visible moves without the probes. Rejected questions are never offered
/// again this turn.
pub fn possible_questions(position: &Chess, turn: &TurnState, any_rule: bool) -> BTreeSet<Question> {
    let visible = VisibleBoard::of(position);
    let probes: BTreeSet<Question> = visible
        .pawn_capture_probes()
        .into_iter()
        .map(Question::Common)
        .collect();

    let mut questions = match turn.probe {
        AnyProbe::HasAny => probes,
        AnyProbe::NoAny => visible
            .moves()
            .into_iter()
            .map(Question::Common)
            .filter(|q| !probes.contains(q))
            .collect(),
        AnyProbe::NotAsked => {
            let mut all = probes;
            all.extend(visible.moves().into_iter().map(Question::Common));
            if any_rule {
                all.insert(Question::AskAny);
            }
            all
        }
    };

    questions.retain(|q| !turn.rejected.contains(q));
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Answer, ChessMove, SpecialCase};
    use shakmaty::{Color, Square};

    #[test]
    fn test_start_position_count() {
        let questions = possible_questions(&Chess::default(), &TurnState::default(), true);
        assert_eq!(questions.len(), 35);
        assert!(questions.contains(&Question::AskAny));
    }

    #[test]
    fn test_without_any_rule() {
        let questions = possible_questions(&Chess::default(), &TurnState::default(), false);
        assert_eq!(questions.len(), 34);
        assert!(!questions.contains(&Question::AskAny));
    }

    #[test]
    fn test_has_any_leaves_only_probes() {
        let turn = TurnState {
            probe: AnyProbe::HasAny,
            ..TurnState::default()
        };
        assert!(turn.must_use_pawns());
        let questions = possible_questions(&Chess::default(), &turn, true);
        assert_eq!(questions.len(), 14);
        for q in &questions {
            let m = q.chess_move().unwrap();
            assert_ne!(m.from.file(), m.to.file());
        }
    }

    #[test]
    fn test_no_any_drops_probes_and_any() {
        let turn = TurnState {
            probe: AnyProbe::NoAny,
            ..TurnState::default()
        };
        let questions = possible_questions(&Chess::default(), &turn, true);
        assert_eq!(questions.len(), 20);
        assert!(!questions.contains(&Question::AskAny));
    }

    #[test]
    fn test_rejected_questions_removed() {
        let e2e4 = Question::Common(ChessMove::new(Square::E2, Square::E4));
        let mut turn = TurnState::default();
        turn.rejected.insert(e2e4);
        let questions = possible_questions(&Chess::default(), &turn, true);
        assert_eq!(questions.len(), 34);
        assert!(!questions.contains(&e2e4));
    }

    #[test]
    fn test_turn_state_from_open_move_set() {
        let b2c1 = Question::Common(ChessMove::new(Square::B2, Square::C1));
        let mut sheet = Scoresheet::new(Color::White);
        sheet.record_own(b2c1, Answer::illegal_move());
        sheet.record_own(Question::AskAny, Answer::no_any());

        let turn = TurnState::from_scoresheet(&sheet);
        assert_eq!(turn.probe, AnyProbe::NoAny);
        assert!(turn.rejected.contains(&b2c1));
    }

    #[test]
    fn test_turn_state_after_completed_move() {
        let mut sheet = Scoresheet::new(Color::White);
        sheet.record_own(Question::AskAny, Answer::has_any());
        sheet.record_own(
            Question::Common(ChessMove::new(Square::E4, Square::D5)),
            Answer::capture_done(Square::D5, SpecialCase::None),
        );
        assert_eq!(TurnState::from_scoresheet(&sheet), TurnState::default());
        assert_eq!(TurnState::from_scoresheet(&Scoresheet::new(Color::Black)), TurnState::default());
    }
}
