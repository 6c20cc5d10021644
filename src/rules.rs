//! Per-piece movement geometry.
//!
//! Everything here is pseudo-legal: whether the move exposes the mover's own
//! king is decided by the legality filter in [`crate::board`].

use crate::piece::{Piece, PieceKind};
use crate::position::Position;

/// Read-only view of square occupancy.
///
/// Implemented by the live [`crate::Board`] and by hypothetical positions
/// used during check simulation, so the same rules serve both.
pub trait Occupancy {
    fn piece_at(&self, pos: Position) -> Option<&Piece>;

    #[inline]
    fn is_empty(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }
}

/// Whether `piece` may move to `target` by its movement rule alone.
///
/// Never true for the piece's own square or for an off-board target.
pub fn pseudo_legal_to(piece: &Piece, target: Position, view: &impl Occupancy) -> bool {
    let from = piece.position;
    if !target.is_valid() || !from.is_valid() || target == from {
        return false;
    }
    if view
        .piece_at(target)
        .is_some_and(|other| other.color == piece.color)
    {
        return false;
    }

    let dr = target.row() - from.row();
    let dc = target.col() - from.col();

    match piece.kind {
        PieceKind::King => {
            if dr.abs() <= 1 && dc.abs() <= 1 {
                true
            } else {
                dr == 0 && dc.abs() == 2 && castling_path_open(piece, dc, view)
            }
        }
        PieceKind::Queen => is_line(dr, dc) && path_clear(from, target, view),
        PieceKind::Rook => is_straight(dr, dc) && path_clear(from, target, view),
        PieceKind::Bishop => is_diagonal(dr, dc) && path_clear(from, target, view),
        PieceKind::Knight => matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1)),
        PieceKind::Pawn => pawn_move(piece, target, dr, dc, view),
    }
}

/// Every square `piece` could reach by its movement rule alone.
pub fn pseudo_legal_targets<'a, V: Occupancy>(
    piece: &'a Piece,
    view: &'a V,
) -> impl Iterator<Item = Position> + 'a {
    Position::all().filter(move |&to| pseudo_legal_to(piece, to, view))
}

/// Steps one square at a time from `from` toward `to`, stopping one short,
/// and requires each intermediate square to be empty.
///
/// Only meaningful for straight or diagonal lines.
pub fn path_clear(from: Position, to: Position, view: &impl Occupancy) -> bool {
    let step_r = (to.row() - from.row()).signum();
    let step_c = (to.col() - from.col()).signum();

    let mut current = from.offset(step_r, step_c);
    while current != to {
        if !current.is_valid() || !view.is_empty(current) {
            return false;
        }
        current = current.offset(step_r, step_c);
    }
    true
}

#[inline]
fn is_straight(dr: i8, dc: i8) -> bool {
    (dr == 0) != (dc == 0)
}

#[inline]
fn is_diagonal(dr: i8, dc: i8) -> bool {
    dr != 0 && dr.abs() == dc.abs()
}

#[inline]
fn is_line(dr: i8, dc: i8) -> bool {
    is_straight(dr, dc) || is_diagonal(dr, dc)
}

fn pawn_move(piece: &Piece, target: Position, dr: i8, dc: i8, view: &impl Occupancy) -> bool {
    let from = piece.position;
    let forward = piece.color.forward();

    if dc == 0 && dr == forward {
        return view.is_empty(target);
    }

    if dc == 0 && dr == 2 * forward {
        return !piece.has_moved
            && from.row() == piece.color.pawn_rank()
            && view.is_empty(from.offset(forward, 0))
            && view.is_empty(target);
    }

    if dc.abs() == 1 && dr == forward {
        return match view.piece_at(target) {
            Some(other) => other.color != piece.color,
            // En-passant candidate; the double-step requirement is checked
            // against the previous move when the move is classified.
            None => {
                let beside = Position::new(from.row(), target.col());
                view.piece_at(beside).is_some_and(|other| {
                    other.kind == PieceKind::Pawn && other.color != piece.color
                })
            }
        };
    }

    false
}

/// King and same-side unmoved rook, nothing between them.
fn castling_path_open(king: &Piece, dc: i8, view: &impl Occupancy) -> bool {
    if king.has_moved {
        return false;
    }
    let row = king.position.row();
    let rook_col = if dc > 0 { 7 } else { 0 };
    let corner = Position::new(row, rook_col);

    let rook_ready = view.piece_at(corner).is_some_and(|rook| {
        rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
    });

    rook_ready && path_clear(king.position, corner, view)
}
