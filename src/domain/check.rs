//! Check classification.
//!
//! Pure geometry: the announcement depends only on where the checking
//! pieces stand relative to the king, never on which pieces they are.

use super::answer::{CheckKind, SpecialCase};
use shakmaty::Square;

fn coords(square: Square) -> (i32, i32) {
    (square.file() as i32, square.rank() as i32)
}

/// Diagonal running lower-left to upper-right (parallel to a1-h8)
fn on_rising_diagonal(a: Square, b: Square) -> bool {
    let (fa, ra) = coords(a);
    let (fb, rb) = coords(b);
    ra - rb == fa - fb
}

/// Diagonal running upper-left to lower-right (parallel to a8-h1)
fn on_falling_diagonal(a: Square, b: Square) -> bool {
    let (fa, ra) = coords(a);
    let (fb, rb) = coords(b);
    ra - rb == fb - fa
}

/// Whether the diagonal joining `attacker` and `king` is the shorter of the
/// two diagonals through the king square.
///
/// In the lower-left and upper-right quadrants the falling diagonal is the
/// short one; in the other two quadrants the rising one is.
fn is_short_diagonal(attacker: Square, king: Square) -> bool {
    let (file, rank) = coords(king);
    let falling_is_short = (rank <= 3 && file <= 3) || (rank > 3 && file > 3);
    if falling_is_short {
        on_falling_diagonal(attacker, king)
    } else {
        on_rising_diagonal(attacker, king)
    }
}

/// Classify a single checking piece by its line to the king
pub fn classify(attacker: Square, king: Square) -> CheckKind {
    if attacker.file() == king.file() {
        CheckKind::File
    } else if attacker.rank() == king.rank() {
        CheckKind::Rank
    } else if on_rising_diagonal(attacker, king) || on_falling_diagonal(attacker, king) {
        if is_short_diagonal(attacker, king) {
            CheckKind::ShortDiagonal
        } else {
            CheckKind::LongDiagonal
        }
    } else {
        CheckKind::Knight
    }
}

/// Announce the check given by `attackers` against `king`.
///
/// Returns `None` when there is no attacker. Two attackers give a double
/// check in the order the attackers were supplied. Chess positions never
/// have more than two checkers; only the first two are considered.
pub fn announce_check(king: Square, attackers: &[Square]) -> Option<SpecialCase> {
    match attackers {
        [] => None,
        [single] => Some(SpecialCase::Check(classify(*single, king))),
        [first, second, ..] => Some(SpecialCase::DoubleCheck(
            classify(*first, king),
            classify(*second, king),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_lines() {
        assert_eq!(classify(Square::A1, Square::A3), CheckKind::File);
        assert_eq!(classify(Square::D3, Square::A3), CheckKind::Rank);
        assert_eq!(classify(Square::E8, Square::E1), CheckKind::File);
    }

    #[test]
    fn test_knight() {
        assert_eq!(classify(Square::C4, Square::B2), CheckKind::Knight);
        assert_eq!(classify(Square::F6, Square::E8), CheckKind::Knight);
    }

    #[test]
    fn test_diagonals_lower_left_quadrant() {
        // King a3: the a1-h8 direction is long, the a8-h1 direction short
        assert_eq!(classify(Square::C1, Square::A3), CheckKind::ShortDiagonal);
        assert_eq!(classify(Square::D6, Square::A3), CheckKind::LongDiagonal);
    }

    #[test]
    fn test_diagonals_upper_right_quadrant() {
        // King g6: falling diagonal e8-h5 is short
        assert_eq!(classify(Square::H5, Square::G6), CheckKind::ShortDiagonal);
        assert_eq!(classify(Square::C2, Square::G6), CheckKind::LongDiagonal);
    }

    #[test]
    fn test_diagonals_other_quadrants() {
        // King b7 (upper-left): rising diagonal a6-c8 is short
        assert_eq!(classify(Square::C8, Square::B7), CheckKind::ShortDiagonal);
        assert_eq!(classify(Square::G2, Square::B7), CheckKind::LongDiagonal);
        // King g2 (lower-right): rising diagonal f1-h3 is short
        assert_eq!(classify(Square::H3, Square::G2), CheckKind::ShortDiagonal);
        assert_eq!(classify(Square::B7, Square::G2), CheckKind::LongDiagonal);
    }

    #[test]
    fn test_announce_check() {
        assert_eq!(announce_check(Square::E1, &[]), None);
        assert_eq!(
            announce_check(Square::E1, &[Square::E8]),
            Some(SpecialCase::Check(CheckKind::File))
        );
        assert_eq!(
            announce_check(Square::B2, &[Square::E2, Square::C4]),
            Some(SpecialCase::DoubleCheck(CheckKind::Rank, CheckKind::Knight))
        );
    }
}
