//! Move records and pure pre-move classification.

use std::fmt;

use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;
use crate::rules::Occupancy;

/// Log entry for an executed move, handed to the [`crate::MoveRecorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub is_capture: bool,
    pub is_castling: bool,
}

impl Move {
    #[inline]
    pub const fn new(from: Position, to: Position, is_capture: bool, is_castling: bool) -> Self {
        Self {
            from,
            to,
            is_capture,
            is_castling,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if self.is_capture {
            f.write_str(" [Capture]")?;
        }
        if self.is_castling {
            f.write_str(" [Castling]")?;
        }
        Ok(())
    }
}

/// The previous move, kept for en-passant validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Position,
    pub to: Position,
    pub kind: PieceKind,
    pub color: Color,
}

impl LastMove {
    /// Whether this was a pawn double step ending on `square`.
    pub fn is_double_step_to(&self, square: Position) -> bool {
        self.kind == PieceKind::Pawn
            && self.to == square
            && (self.to.row() - self.from.row()).abs() == 2
    }
}

/// What a move does besides relocating the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    Capture,
    DoubleStep,
    /// Pawn lands on an empty square and removes the pawn on `victim`.
    EnPassant { victim: Position },
    /// King moves two files and the rook jumps over it.
    Castle { rook_from: Position, rook_to: Position },
}

impl MoveKind {
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture | MoveKind::EnPassant { .. })
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::Castle { .. })
    }

    /// Square of the piece this move removes, if any.
    pub const fn captured_square(self, to: Position) -> Option<Position> {
        match self {
            MoveKind::Capture => Some(to),
            MoveKind::EnPassant { victim } => Some(victim),
            _ => None,
        }
    }
}

/// Classify `piece` moving to `to` against the pre-move position.
///
/// Pure: assumes nothing about legality and touches no state.
pub fn classify(piece: &Piece, to: Position, view: &impl Occupancy) -> MoveKind {
    let from = piece.position;
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();

    match piece.kind {
        PieceKind::King if dr == 0 && dc.abs() == 2 => {
            let (rook_col, rook_to_col) = if dc > 0 {
                (7, to.col() - 1)
            } else {
                (0, to.col() + 1)
            };
            MoveKind::Castle {
                rook_from: Position::new(from.row(), rook_col),
                rook_to: Position::new(from.row(), rook_to_col),
            }
        }
        PieceKind::Pawn if dc != 0 && view.is_empty(to) => MoveKind::EnPassant {
            victim: Position::new(from.row(), to.col()),
        },
        PieceKind::Pawn if dr.abs() == 2 => MoveKind::DoubleStep,
        _ if !view.is_empty(to) => MoveKind::Capture,
        _ => MoveKind::Quiet,
    }
}
