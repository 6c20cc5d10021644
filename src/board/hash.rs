//! Position key for repetition counting.

use std::fmt;

use super::Board;
use crate::piece::{Color, Piece};
use crate::position::Position;

/// Repetition key: piece placement plus side to move.
///
/// 64 symbols in row-major order from row 0 (`.` for an empty square, the
/// piece letter otherwise) followed by `w` or `b`. Castling rights and
/// en-passant availability are not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionHash(String);

impl PositionHash {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Board {
    pub fn position_hash(&self) -> PositionHash {
        let mut key = String::with_capacity(65);
        key.extend(
            Position::all().map(|pos| self.piece_at(pos).map_or('.', Piece::symbol)),
        );
        key.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });
        PositionHash(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    fn sq(name: &str) -> Position {
        name.parse().expect("test square should be valid")
    }

    #[test]
    fn initial_hash_layout() {
        let hash = Board::new().position_hash();
        assert_eq!(hash.as_str().len(), 65);
        assert_eq!(
            hash.as_str(),
            concat!(
                "rnbqkbnr",
                "pppppppp",
                "........",
                "........",
                "........",
                "........",
                "PPPPPPPP",
                "RNBQKBNR",
                "w"
            )
        );
    }

    #[test]
    fn identical_placement_and_turn_hash_identically() {
        let mut a = Board::new();
        let b = Board::new();
        assert!(a.move_piece(sq("g1"), sq("f3")));
        assert!(a.move_piece(sq("g8"), sq("f6")));
        assert!(a.move_piece(sq("f3"), sq("g1")));
        assert!(a.move_piece(sq("f6"), sq("g8")));
        assert_eq!(a.position_hash(), b.position_hash());
    }

    #[test]
    fn side_to_move_changes_the_hash() {
        let pieces = [Piece::new(Color::White, PieceKind::King, sq("e1"))];
        let white = Board::from_pieces(pieces, Color::White);
        let black = Board::from_pieces(pieces, Color::Black);
        assert_ne!(white.position_hash(), black.position_hash());
    }

    #[test]
    fn piece_color_changes_the_hash() {
        let white = Board::from_pieces(
            [Piece::new(Color::White, PieceKind::Rook, sq("d4"))],
            Color::White,
        );
        let black = Board::from_pieces(
            [Piece::new(Color::Black, PieceKind::Rook, sq("d4"))],
            Color::White,
        );
        assert_ne!(white.position_hash(), black.position_hash());
    }
}
