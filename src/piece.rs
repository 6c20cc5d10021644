use std::fmt;
use std::ops::Not;

use crate::position::Position;

/// The two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn advance. White moves toward row 0.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks in the initial setup.
    #[inline]
    pub const fn back_rank(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row holding this side's pawns in the initial setup.
    #[inline]
    pub const fn pawn_rank(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this side's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> i8 {
        self.opponent().back_rank()
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Kinds a pawn may become.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Material value used by [`crate::Board::material_score`].
    #[inline]
    pub const fn material_value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Single-letter symbol, upper case for White and lower case for Black.
    pub const fn symbol(self, color: Color) -> char {
        let c = match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        };
        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

/// A live piece on the board.
///
/// Records are owned by the board's piece arena; the grid only stores
/// handles into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub position: Position,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind, position: Position) -> Self {
        Self {
            color,
            kind,
            position,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn symbol(&self) -> char {
        self.kind.symbol(self.color)
    }

    /// Whether the piece stands where the initial setup puts pieces of its
    /// kind, i.e. where it may still hold castling or double-step rights.
    pub fn on_home_square(&self) -> bool {
        let (row, col) = (self.position.row(), self.position.col());
        match self.kind {
            PieceKind::King => row == self.color.back_rank() && col == 4,
            PieceKind::Rook => row == self.color.back_rank() && (col == 0 || col == 7),
            PieceKind::Pawn => row == self.color.pawn_rank(),
            _ => true,
        }
    }
}

/// The standard 32-piece setup.
pub fn initial_setup() -> Vec<Piece> {
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    let mut pieces = Vec::with_capacity(32);
    for color in [Color::Black, Color::White] {
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            let col = col as i8;
            pieces.push(Piece::new(color, kind, Position::new(color.back_rank(), col)));
            pieces.push(Piece::new(
                color,
                PieceKind::Pawn,
                Position::new(color.pawn_rank(), col),
            ));
        }
    }
    pieces
}
