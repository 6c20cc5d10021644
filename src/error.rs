use thiserror::Error;

use crate::piece::{Color, PieceKind};
use crate::position::Position;

/// Why a move was rejected. Rejection never changes the board.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("square {0:?} is off the board")]
    InvalidSquare(Position),

    #[error("no piece on {0}")]
    EmptySquare(Position),

    #[error("piece on {square} belongs to {color}, not the side to move")]
    WrongTurn { square: Position, color: Color },

    #[error("{kind:?} cannot move from {from} to {to}")]
    IllegalGeometry {
        kind: PieceKind,
        from: Position,
        to: Position,
    },

    #[error("en passant from {from} to {to} requires an immediately preceding double step")]
    EnPassantUnavailable { from: Position, to: Position },

    #[error("cannot castle while in check")]
    CastlingOutOfCheck,

    #[error("cannot castle through attacked square {0}")]
    CastlingThroughCheck(Position),

    #[error("move from {from} to {to} leaves the king in check")]
    KingLeftInCheck { from: Position, to: Position },
}

/// Why a promotion was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PromotionError {
    #[error("no pawn on {0}")]
    NoPawn(Position),

    #[error("a pawn cannot promote to {0:?}")]
    InvalidKind(PieceKind),
}
