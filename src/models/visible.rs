//! The board as the side to move sees it.
//!
//! A Kriegspiel player knows where their own pieces are and nothing else:
//! every opposing piece is removed and its square looks empty. Such a board
//! has no opposing king, so it is not a valid `shakmaty::Chess` position;
//! moves are derived from shakmaty's attack tables instead. With no
//! opposing pieces nothing can be pinned, checked or captured, so every
//! pseudo-legal move here is legal on the visible board.

use crate::domain::chess::{castle_destination, is_back_rank, square_from_index};
use crate::domain::{ChessMove, Promotion};
use shakmaty::{
    Bitboard, Board, CastlingSide, Chess, Color, File, Piece, Position, Rank, Role, Square,
    attacks,
};

#[derive(Clone, Debug)]
pub struct VisibleBoard {
    turn: Color,
    board: Board,
    /// Rooks the side to move may still castle with
    castling_rooks: Vec<Square>,
}

impl VisibleBoard {
    /// Strip the opponent's pieces from the referee's position
    pub fn of(position: &Chess) -> Self {
        let turn = position.turn();
        let mut board = position.board().clone();
        for square in board.by_color(!turn) {
            board.remove_piece_at(square);
        }

        let castling_rooks = [CastlingSide::KingSide, CastlingSide::QueenSide]
            .into_iter()
            .filter_map(|side| position.castles().rook(turn, side))
            .collect();

        Self {
            turn,
            board,
            castling_rooks,
        }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every move the player can find legal from their own view
    pub fn moves(&self) -> Vec<ChessMove> {
        let occupied = self.board.occupied();
        let mut moves = Vec::new();

        for from in occupied {
            let Some(piece) = self.board.piece_at(from) else {
                continue;
            };
            if piece.role == Role::Pawn {
                self.pawn_pushes(from, &mut moves);
            } else {
                let targets = attacks::attacks(from, piece, occupied) & !occupied;
                moves.extend(targets.into_iter().map(|to| ChessMove::new(from, to)));
            }
        }

        self.castling_moves(&mut moves);
        moves
    }

    /// Diagonal pawn steps onto squares that look empty.
    ///
    /// Each is a guess that a hidden piece stands there; a step onto the back
    /// rank is offered once per promotion piece.
    pub fn pawn_capture_probes(&self) -> Vec<ChessMove> {
        let pawns = self.board.by_role(Role::Pawn) & self.board.by_color(self.turn);
        let empty = !self.board.occupied();
        let mut probes = Vec::new();

        for from in pawns {
            for to in attacks::pawn_attacks(self.turn, from) & empty {
                push_with_promotions(from, to, &mut probes);
            }
        }
        probes
    }

    fn pawn_pushes(&self, from: Square, moves: &mut Vec<ChessMove>) {
        let occupied = self.board.occupied();
        let (step, start_rank) = match self.turn {
            Color::White => (8, Rank::Second),
            Color::Black => (-8, Rank::Seventh),
        };

        let Some(one) = square_from_index(from as i64 + step) else {
            return;
        };
        if occupied.contains(one) {
            return;
        }
        push_with_promotions(from, one, moves);

        if from.rank() == start_rank {
            if let Some(two) = square_from_index(from as i64 + 2 * step) {
                if !occupied.contains(two) {
                    moves.push(ChessMove::new(from, two));
                }
            }
        }
    }

    fn castling_moves(&self, moves: &mut Vec<ChessMove>) {
        let Some(king) = self.board.king_of(self.turn) else {
            return;
        };
        let own_rook = Piece {
            color: self.turn,
            role: Role::Rook,
        };

        for &rook in &self.castling_rooks {
            if self.board.piece_at(rook) != Some(own_rook) {
                continue;
            }
            let king_to = castle_destination(king, rook);
            let rook_file = if king_to.file() == File::G {
                File::F
            } else {
                File::D
            };
            let rook_to = Square::from_coords(rook_file, king.rank());

            // Squares that must be vacant, ignoring the castling pieces themselves
            let path = (attacks::between(king, rook) | Bitboard::from(king_to) | Bitboard::from(rook_to))
                & !Bitboard::from(king)
                & !Bitboard::from(rook);
            if (path & self.board.occupied()).is_empty() {
                moves.push(ChessMove::new(king, king_to));
            }
        }
    }
}

fn push_with_promotions(from: Square, to: Square, out: &mut Vec<ChessMove>) {
    if is_back_rank(to) {
        out.extend(
            Promotion::ALL
                .into_iter()
                .map(|promotion| ChessMove::with_promotion(from, to, promotion)),
        );
    } else {
        out.push(ChessMove::new(from, to));
    }
}
