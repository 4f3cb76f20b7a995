//! The referee - the application layer owning the only complete board.
//!
//! Every interaction goes through [`Referee::ask_for`]. The referee checks
//! the question against the possible-to-ask set, executes it on the real
//! position, announces the result, writes both scoresheets and recomputes
//! what the side to move may ask next.

use super::config::RefereeConfig;
use super::questions::{AnyProbe, TurnState, possible_questions};
use crate::domain::{Answer, ChessMove, MainAnnouncement, Question, Scoresheet, SpecialCase, announce_check};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, KnownOutcome, Position, Role, Square};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum RefereeError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("illegal position `{fen}`: {reason}")]
    InvalidPosition { fen: String, reason: String },
}

#[derive(Clone, Debug)]
pub struct Referee {
    config: RefereeConfig,
    position: Chess,
    turn_state: TurnState,
    game_over: bool,
    possible: BTreeSet<Question>,
    white_scoresheet: Scoresheet,
    black_scoresheet: Scoresheet,
}

impl Referee {
    /// Start a game from the standard starting position
    pub fn new(config: RefereeConfig) -> Self {
        Self::with_position(config, Chess::default())
    }

    /// Start a game from an arbitrary position
    pub fn from_fen(fen: &str, config: RefereeConfig) -> Result<Self, RefereeError> {
        let position = parse_position(fen)?;
        Ok(Self::with_position(config, position))
    }

    fn with_position(config: RefereeConfig, position: Chess) -> Self {
        let game_over = terminal_announcement(&position, config.reversible_move_limit).is_some();
        let mut referee = Self {
            config,
            position,
            turn_state: TurnState::default(),
            game_over,
            possible: BTreeSet::new(),
            white_scoresheet: Scoresheet::new(Color::White),
            black_scoresheet: Scoresheet::new(Color::Black),
        };
        referee.refresh_possible();
        referee
    }

    /// Rebuild a game from saved state
    pub(crate) fn restore(
        config: RefereeConfig,
        position: Chess,
        turn_state: TurnState,
        game_over: bool,
        white_scoresheet: Scoresheet,
        black_scoresheet: Scoresheet,
    ) -> Self {
        let mut referee = Self {
            config,
            position,
            turn_state,
            game_over,
            possible: BTreeSet::new(),
            white_scoresheet,
            black_scoresheet,
        };
        referee.refresh_possible();
        referee
    }

    /// Answer one question.
    ///
    /// Questions outside the possible-to-ask set get `ImpossibleToAsk` and
    /// change nothing. Everything else is recorded on both scoresheets.
    pub fn ask_for(&mut self, question: Question) -> Answer {
        if !self.possible.contains(&question) {
            debug!(%question, "question not in possible-to-ask set");
            return Answer::impossible_to_ask();
        }

        let mover = self.position.turn();
        let answer = match question {
            Question::Common(m) => self.ask_common(m),
            Question::AskAny => self.ask_any(),
        };
        debug!(%question, %answer, color = ?mover, "question answered");

        self.record(mover, question, answer);

        match answer.main() {
            MainAnnouncement::RegularMove | MainAnnouncement::CaptureDone => {
                self.turn_state = TurnState::default();
            }
            MainAnnouncement::HasAny => self.turn_state.probe = AnyProbe::HasAny,
            MainAnnouncement::NoAny => self.turn_state.probe = AnyProbe::NoAny,
            MainAnnouncement::IllegalMove => {
                self.turn_state.rejected.insert(question);
            }
            MainAnnouncement::ImpossibleToAsk => {}
        }
        self.refresh_possible();

        answer
    }

    fn ask_common(&mut self, asked: ChessMove) -> Answer {
        let Some(m) = self.position.legal_moves().iter().find(|m| asked.matches(m)).cloned() else {
            return Answer::illegal_move();
        };

        let captured = captured_square(&m);
        self.position = match self.position.clone().play(m) {
            Ok(next) => next,
            Err(err) => {
                error!(error = ?err, %asked, "rules engine refused a move from its own legal list");
                return Answer::illegal_move();
            }
        };
        let special = self.special_case();
        info!(%asked, capture = ?captured, special = ?special, "move done");

        match captured {
            Some(square) => Answer::capture_done(square, special),
            None => Answer::regular_move(special),
        }
    }

    fn ask_any(&self) -> Answer {
        let has_pawn_capture = self
            .position
            .legal_moves()
            .iter()
            .any(|m| m.role() == Role::Pawn && m.is_capture());
        if has_pawn_capture {
            Answer::has_any()
        } else {
            Answer::no_any()
        }
    }

    /// Announcement for the position after a completed move
    fn special_case(&mut self) -> SpecialCase {
        if let Some(terminal) = terminal_announcement(&self.position, self.config.reversible_move_limit) {
            self.game_over = true;
            info!(result = ?terminal, "game over");
            return terminal;
        }

        let Some(king) = self.position.board().king_of(self.position.turn()) else {
            return SpecialCase::None;
        };
        let attackers: Vec<Square> = self.position.checkers().into_iter().collect();
        announce_check(king, &attackers).unwrap_or(SpecialCase::None)
    }

    fn record(&mut self, mover: Color, question: Question, answer: Answer) {
        let (own, opponent) = match mover {
            Color::White => (&mut self.white_scoresheet, &mut self.black_scoresheet),
            Color::Black => (&mut self.black_scoresheet, &mut self.white_scoresheet),
        };
        own.record_own(question, answer);
        opponent.record_opponent(question.kind(), answer);
    }

    fn refresh_possible(&mut self) {
        self.possible = if self.game_over {
            BTreeSet::new()
        } else {
            possible_questions(&self.position, &self.turn_state, self.config.any_rule)
        };
    }

    pub fn config(&self) -> RefereeConfig {
        self.config
    }

    pub fn any_rule(&self) -> bool {
        self.config.any_rule
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn must_use_pawns(&self) -> bool {
        self.turn_state.must_use_pawns()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn possible_to_ask(&self) -> &BTreeSet<Question> {
        &self.possible
    }

    pub fn is_possible_to_ask(&self, question: &Question) -> bool {
        self.possible.contains(question)
    }

    /// Referee's position in FEN
    pub fn board_fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn scoresheet(&self, color: Color) -> &Scoresheet {
        match color {
            Color::White => &self.white_scoresheet,
            Color::Black => &self.black_scoresheet,
        }
    }

    /// Final announcement of a finished game
    pub fn result(&self) -> Option<SpecialCase> {
        if !self.game_over {
            return None;
        }
        terminal_announcement(&self.position, self.config.reversible_move_limit)
    }

    /// Winner or draw of a finished game
    pub fn outcome(&self) -> Option<KnownOutcome> {
        self.result().and_then(|result| result.outcome())
    }
}

impl Default for Referee {
    fn default() -> Self {
        Self::new(RefereeConfig::default())
    }
}

pub(crate) fn parse_position(fen: &str) -> Result<Chess, RefereeError> {
    let parsed = fen.parse::<Fen>().map_err(|err| RefereeError::InvalidFen {
        fen: fen.to_string(),
        reason: err.to_string(),
    })?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|err| RefereeError::InvalidPosition {
            fen: fen.to_string(),
            reason: err.to_string(),
        })
}

/// Square of the piece a move removes, if it captures.
///
/// En passant takes the pawn beside the mover, on the mover's starting rank.
fn captured_square(m: &Move) -> Option<Square> {
    match *m {
        Move::EnPassant { from, to } => Some(Square::from_coords(to.file(), from.rank())),
        Move::Normal {
            capture: Some(_),
            to,
            ..
        } => Some(to),
        _ => None,
    }
}

/// Game-ending announcement for `position`, if the game is over there.
///
/// Checkmate is won by the side that just moved.
fn terminal_announcement(position: &Chess, reversible_move_limit: u32) -> Option<SpecialCase> {
    if position.is_checkmate() {
        Some(match position.turn() {
            Color::White => SpecialCase::CheckmateBlackWins,
            Color::Black => SpecialCase::CheckmateWhiteWins,
        })
    } else if position.is_stalemate() {
        Some(SpecialCase::DrawStalemate)
    } else if position.is_insufficient_material() {
        Some(SpecialCase::DrawInsufficientMaterial)
    } else if position.halfmoves() >= reversible_move_limit {
        Some(SpecialCase::DrawTooManyReversibleMoves)
    } else {
        None
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::Index;

    /// A diagonal pawn step: a guess at a hidden piece
    fn is_pawn_capture_guess(referee: &Referee, question: &Question) -> bool {
        question.chess_move().is_some_and(|m| {
            m.from.file() != m.to.file()
                && referee
                    .position()
                    .board()
                    .piece_at(m.from)
                    .is_some_and(|piece| piece.role == Role::Pawn)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: along a random game every question is answered at most once per turn
        #[test]
        fn prop_questions_answered_once_per_turn(picks in prop::collection::vec(any::<Index>(), 1..120)) {
            let mut referee = Referee::default();
            let mut asked_any = false;

            for pick in picks {
                let possible: Vec<Question> = referee.possible_to_ask().iter().copied().collect();
                if possible.is_empty() {
                    prop_assert!(referee.is_game_over());
                    break;
                }
                let question = *pick.get(&possible);
                if question == Question::AskAny {
                    prop_assert!(!asked_any);
                    asked_any = true;
                }

                let answer = referee.ask_for(question);
                prop_assert_ne!(answer.main(), MainAnnouncement::ImpossibleToAsk);

                if answer.move_done() {
                    asked_any = false;
                    prop_assert!(!referee.must_use_pawns());
                } else {
                    prop_assert!(!referee.is_possible_to_ask(&question));
                    prop_assert_eq!(referee.clone().ask_for(question), Answer::impossible_to_ask());
                }
                if asked_any {
                    prop_assert!(!referee.is_possible_to_ask(&Question::AskAny));
                }

                match answer.main() {
                    MainAnnouncement::HasAny => {
                        prop_assert!(referee.must_use_pawns());
                        for q in referee.possible_to_ask() {
                            prop_assert!(is_pawn_capture_guess(&referee, q), "{} offered after HAS_ANY", q);
                        }
                    }
                    MainAnnouncement::NoAny => {
                        for q in referee.possible_to_ask() {
                            prop_assert!(!is_pawn_capture_guess(&referee, q), "{} offered after NO_ANY", q);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
