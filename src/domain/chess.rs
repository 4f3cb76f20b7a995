//! Pure chess coordinate types shared by questions, answers and persistence.
//! Legality is never decided here - that is the rules engine's job.

use shakmaty::{File, Move, Rank, Role, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Piece a pawn may promote to.
///
/// Declaration order is the order promotion probes are listed in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    pub fn role(self) -> Role {
        match self {
            Promotion::Queen => Role::Queen,
            Promotion::Rook => Role::Rook,
            Promotion::Bishop => Role::Bishop,
            Promotion::Knight => Role::Knight,
        }
    }

    /// Convert a shakmaty role, rejecting roles a pawn cannot become
    pub fn from_role(role: Role) -> Option<Self> {
        match role {
            Role::Queen => Some(Promotion::Queen),
            Role::Rook => Some(Promotion::Rook),
            Role::Bishop => Some(Promotion::Bishop),
            Role::Knight => Some(Promotion::Knight),
            Role::Pawn | Role::King => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }
}

/// A move as a player states it: from-square, to-square and an optional
/// promotion piece. It carries no knowledge of the position, so it may be
/// illegal on the referee's board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl ChessMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: Promotion) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Express a shakmaty move in coordinate form.
    ///
    /// Castling is written as the king's two-square step (`e1g1`, `e8c8`),
    /// the way a player who drags the king would state it. Drops have no
    /// coordinate form in standard chess and map to `None`.
    pub fn from_move(m: &Move) -> Option<Self> {
        match *m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => Some(Self {
                from,
                to,
                promotion: promotion.and_then(Promotion::from_role),
            }),
            Move::EnPassant { from, to } => Some(Self::new(from, to)),
            Move::Castle { king, rook } => Some(Self::new(king, castle_destination(king, rook))),
            Move::Put { .. } => None,
        }
    }

    /// Whether this move matches a shakmaty move played on the real board
    pub fn matches(&self, m: &Move) -> bool {
        Self::from_move(m).is_some_and(|own| own == *self)
    }
}

/// Square the king lands on when castling with the given rook
pub fn castle_destination(king: Square, rook: Square) -> Square {
    let file = if rook.file() as u8 > king.file() as u8 {
        File::G
    } else {
        File::C
    };
    Square::from_coords(file, king.rank())
}

/// Whether a square lies on either back rank
pub fn is_back_rank(square: Square) -> bool {
    square.rank() == Rank::First || square.rank() == Rank::Eighth
}

/// Convert a 0-63 index into a square, rejecting anything outside the board
pub fn square_from_index(index: i64) -> Option<Square> {
    if (0..64).contains(&index) {
        Some(Square::new(index as u32))
    } else {
        None
    }
}

pub fn square_index(square: Square) -> u8 {
    square as u8
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move `{0}` must be 4 or 5 ASCII characters")]
    Length(String),
    #[error("move `{0}` has an invalid square")]
    Square(String),
    #[error("move `{0}` has an invalid promotion piece")]
    Promotion(String),
    #[error("move `{0}` starts and ends on the same square")]
    NullMove(String),
}

impl FromStr for ChessMove {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(MoveParseError::Length(s.to_string()));
        }

        let from: Square = s[0..2]
            .parse()
            .map_err(|_| MoveParseError::Square(s.to_string()))?;
        let to: Square = s[2..4]
            .parse()
            .map_err(|_| MoveParseError::Square(s.to_string()))?;
        if from == to {
            return Err(MoveParseError::NullMove(s.to_string()));
        }

        let promotion = match s[4..].chars().next() {
            Some(ch) => {
                Some(Promotion::from_letter(ch).ok_or_else(|| MoveParseError::Promotion(s.to_string()))?)
            }
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}
