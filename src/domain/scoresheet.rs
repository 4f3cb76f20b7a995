//! Per-player scoresheet.
//!
//! Each player keeps two histories: the questions they asked with the
//! answers they got, and the opponent's question kinds with the answers
//! announced for them. A history is a list of move-sets; a move-set groups
//! every question asked under one move number (illegal attempts, any-rule
//! probes and the move that finally went through).

use super::answer::Answer;
use super::question::{Question, QuestionKind};
use shakmaty::Color;

/// Questions asked and answers received during one move number
pub type MoveSet<Q> = Vec<(Q, Answer)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoresheet {
    color: Color,
    moves_own: Vec<MoveSet<Question>>,
    moves_opponent: Vec<MoveSet<QuestionKind>>,
    last_move_number: usize,
}

impl Scoresheet {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            moves_own: Vec::new(),
            moves_opponent: Vec::new(),
            last_move_number: 0,
        }
    }

    /// Rebuild a scoresheet from stored histories
    pub fn from_parts(
        color: Color,
        moves_own: Vec<MoveSet<Question>>,
        moves_opponent: Vec<MoveSet<QuestionKind>>,
        last_move_number: usize,
    ) -> Self {
        Self {
            color,
            moves_own,
            moves_opponent,
            last_move_number,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn moves_own(&self) -> &[MoveSet<Question>] {
        &self.moves_own
    }

    pub fn moves_opponent(&self) -> &[MoveSet<QuestionKind>] {
        &self.moves_opponent
    }

    pub fn last_move_number(&self) -> usize {
        self.last_move_number
    }

    /// Whether the latest move-set of `color` ended with a completed move
    pub fn last_move_done(&self, color: Color) -> bool {
        let last = if color == self.color {
            self.moves_own.last().and_then(|set| set.last()).map(|(_, a)| a)
        } else {
            self.moves_opponent.last().and_then(|set| set.last()).map(|(_, a)| a)
        };
        last.is_some_and(Answer::move_done)
    }

    /// Move number the next recording belongs to.
    ///
    /// The number only advances once both histories are the same length and
    /// both sides' latest move-sets ended in a completed move.
    fn current_move_number(&mut self) -> usize {
        if self.last_move_number == 0 {
            self.last_move_number = 1;
        } else if self.moves_own.len() == self.moves_opponent.len()
            && self.last_move_done(Color::White)
            && self.last_move_done(Color::Black)
        {
            self.last_move_number += 1;
        }
        self.last_move_number
    }

    pub fn record_own(&mut self, question: Question, answer: Answer) {
        let number = self.current_move_number();
        append(&mut self.moves_own, number, (question, answer));
    }

    pub fn record_opponent(&mut self, kind: QuestionKind, answer: Answer) {
        let number = self.current_move_number();
        append(&mut self.moves_opponent, number, (kind, answer));
    }
}

fn append<Q>(history: &mut Vec<MoveSet<Q>>, number: usize, entry: (Q, Answer)) {
    // The latest move-set is still open while its index matches the move number
    if number == history.len() {
        if let Some(set) = history.last_mut() {
            set.push(entry);
            return;
        }
    }
    history.push(vec![entry]);
}
