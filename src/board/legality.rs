//! Legality filter: a pseudo-legal move is legal unless it leaves the
//! mover's king attacked.
//!
//! Simulation never mutates the board. Each what-if is evaluated against a
//! [`Hypothetical`] view layered over `&Board`, so there is nothing to undo.

use super::{Board, Validated};
use crate::MoveValidator;
use crate::error::MoveError;
use crate::moves::{Move, MoveKind, classify};
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;
use crate::rules::{Occupancy, pseudo_legal_targets, pseudo_legal_to};

/// The board with one piece relocated and up to one piece removed.
struct Hypothetical<'a> {
    board: &'a Board,
    vacated: Option<Position>,
    placed: Option<Piece>,
    removed: Option<Position>,
}

impl Hypothetical<'_> {
    /// Whether a live record no longer takes part in this position.
    fn is_gone(&self, pos: Position) -> bool {
        self.removed == Some(pos)
            || self.vacated == Some(pos)
            || self.placed.is_some_and(|p| p.position == pos)
    }

    fn is_attacked(&self, square: Position, by: Color) -> bool {
        self.board
            .pieces
            .iter()
            .filter(|p| p.color == by && !self.is_gone(p.position))
            .any(|attacker| pseudo_legal_to(attacker, square, self))
    }
}

impl Occupancy for Hypothetical<'_> {
    fn piece_at(&self, pos: Position) -> Option<&Piece> {
        match &self.placed {
            Some(placed) if placed.position == pos => Some(placed),
            _ if self.vacated == Some(pos) || self.removed == Some(pos) => None,
            _ => self.board.piece_at(pos),
        }
    }
}

impl Board {
    /// The piece about to move, after bounds checks on both squares.
    pub(super) fn moving_piece(&self, from: Position, to: Position) -> Result<Piece, MoveError> {
        if !from.is_valid() {
            return Err(MoveError::InvalidSquare(from));
        }
        if !to.is_valid() {
            return Err(MoveError::InvalidSquare(to));
        }
        self.piece_at(from)
            .copied()
            .ok_or(MoveError::EmptySquare(from))
    }

    /// Every check of move execution except the turn check.
    pub(super) fn check_piece_move(&self, piece: Piece, to: Position) -> Result<Validated, MoveError> {
        let from = piece.position;
        if !pseudo_legal_to(&piece, to, self) {
            return Err(MoveError::IllegalGeometry {
                kind: piece.kind,
                from,
                to,
            });
        }

        let kind = classify(&piece, to, self);
        match kind {
            MoveKind::EnPassant { victim } => {
                if !self.last_move.is_some_and(|m| m.is_double_step_to(victim)) {
                    return Err(MoveError::EnPassantUnavailable { from, to });
                }
            }
            MoveKind::Castle { .. } => {
                if self.is_player_in_check(piece.color) {
                    return Err(MoveError::CastlingOutOfCheck);
                }
                let transit = from.offset(0, (to.col() - from.col()).signum());
                if self.leaves_king_attacked(&piece, transit, None) {
                    return Err(MoveError::CastlingThroughCheck(transit));
                }
            }
            _ => {}
        }

        if self.leaves_king_attacked(&piece, to, kind.captured_square(to)) {
            return Err(MoveError::KingLeftInCheck { from, to });
        }
        Ok(Validated { piece, to, kind })
    }

    fn leaves_king_attacked(&self, mover: &Piece, to: Position, removed: Option<Position>) -> bool {
        let view = Hypothetical {
            board: self,
            vacated: Some(mover.position),
            placed: Some(Piece {
                position: to,
                has_moved: true,
                ..*mover
            }),
            removed,
        };
        let king = if mover.kind == PieceKind::King {
            Some(to)
        } else {
            self.king_position(mover.color)
        };
        king.is_some_and(|square| view.is_attacked(square, mover.color.opponent()))
    }

    /// Whether moving the piece on `from` to `to` would leave its own king
    /// attacked. `true` means the move is illegal.
    ///
    /// Geometry is not checked. Returns `false` when there is nothing to
    /// simulate (no piece on `from`, or `to` off the board).
    pub fn would_leave_king_in_check(&self, from: Position, to: Position) -> bool {
        let Ok(piece) = self.moving_piece(from, to) else {
            return false;
        };
        let removed = classify(&piece, to, self).captured_square(to);
        self.leaves_king_attacked(&piece, to, removed)
    }

    /// Whether a piece of the side opposing `by` standing on `square` would be
    /// attacked by `by`.
    pub fn is_square_attacked(&self, square: Position, by: Color) -> bool {
        if !square.is_valid() {
            return false;
        }
        let view = Hypothetical {
            board: self,
            vacated: None,
            placed: Some(Piece {
                has_moved: true,
                ..Piece::new(by.opponent(), PieceKind::King, square)
            }),
            removed: None,
        };
        view.is_attacked(square, by)
    }

    /// `false` when `color` has no king on the board.
    pub fn is_player_in_check(&self, color: Color) -> bool {
        self.king_position(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opponent()))
    }

    /// Pieces of `by` attacking `square`.
    pub fn attackers_of(&self, square: Position, by: Color) -> Vec<Position> {
        self.pieces
            .iter()
            .filter(|p| p.color == by && pseudo_legal_to(p, square, self))
            .map(|p| p.position)
            .collect()
    }

    /// Whether [`Board::move_piece`] would accept the move, ignoring whose turn it is.
    pub fn is_legal_move(&self, from: Position, to: Position) -> bool {
        self.moving_piece(from, to)
            .and_then(|piece| self.check_piece_move(piece, to))
            .is_ok()
    }

    /// All legal destinations for the piece on `from`; empty if there is none.
    pub fn valid_moves(&self, from: Position) -> Vec<Position> {
        let Some(piece) = self.piece_at(from) else {
            return Vec::new();
        };
        pseudo_legal_targets(piece, self)
            .filter(|&to| self.check_piece_move(*piece, to).is_ok())
            .collect()
    }

    /// Every legal move for `color`, ignoring whose turn it is.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        self.pieces
            .iter()
            .filter(|p| p.color == color)
            .flat_map(|piece| {
                pseudo_legal_targets(piece, self)
                    .filter_map(move |to| self.check_piece_move(*piece, to).ok())
            })
            .map(|v| {
                Move::new(
                    v.piece.position,
                    v.to,
                    v.kind.is_capture(),
                    v.kind.is_castling(),
                )
            })
            .collect()
    }

    pub fn has_any_legal_move(&self, color: Color) -> bool {
        self.pieces.iter().filter(|p| p.color == color).any(|piece| {
            pseudo_legal_targets(piece, self).any(|to| self.check_piece_move(*piece, to).is_ok())
        })
    }

    /// Leaf count of the legal move tree `depth` plies deep.
    ///
    /// A pawn reaching the far rank branches into the four promotion kinds.
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut nodes = 0;
        for mv in self.legal_moves(self.turn) {
            let mut child = self.clone();
            if child.try_move(mv.from, mv.to).is_err() {
                continue;
            }
            let promoting = child
                .piece_at(mv.to)
                .is_some_and(|p| p.kind == PieceKind::Pawn && mv.to.row() == p.color.promotion_rank());
            if promoting {
                for kind in PieceKind::PROMOTIONS {
                    let mut promoted = child.clone();
                    if promoted.try_promote(mv.to, kind).is_ok() {
                        nodes += promoted.perft(depth - 1);
                    }
                }
            } else {
                nodes += child.perft(depth - 1);
            }
        }
        nodes
    }
}

/// Accepts any move the piece's movement rule allows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoLegal;

impl MoveValidator for PseudoLegal {
    fn validate(&self, piece: &Piece, to: Position, board: &Board) -> bool {
        pseudo_legal_to(piece, to, board)
    }
}

/// Accepts exactly the moves [`Board::move_piece`] would play, turn aside.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullyLegal;

impl MoveValidator for FullyLegal {
    fn validate(&self, piece: &Piece, to: Position, board: &Board) -> bool {
        to.is_valid() && board.check_piece_move(*piece, to).is_ok()
    }
}
