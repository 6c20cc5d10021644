//! Board state: the piece arena, its index grid, and move execution.

mod hash;
mod legality;
mod status;

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace, warn};

pub use hash::PositionHash;
pub use legality::{FullyLegal, PseudoLegal};
pub use status::{DrawReason, DrawRules, GameStatus};

use crate::MoveValidator;
use crate::error::{MoveError, PromotionError};
use crate::moves::{LastMove, Move, MoveKind};
use crate::piece::{Color, Piece, PieceKind, initial_setup};
use crate::position::Position;
use crate::rules::Occupancy;

/// Handle into the piece arena. Only valid until the next structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PieceId(usize);

/// A move that passed every check, ready to apply.
#[derive(Debug, Clone, Copy)]
struct Validated {
    piece: Piece,
    to: Position,
    kind: MoveKind,
}

/// One game's board.
///
/// `pieces` owns every live record; `grid` is its projection by square and is
/// rebuilt after each structural change, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,
    grid: [Option<PieceId>; 64],
    turn: Color,
    halfmove_clock: u32,
    fullmove_number: u32,
    last_move: Option<LastMove>,
    repetitions: HashMap<PositionHash, u32>,
    rules: DrawRules,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position, White to move.
    #[inline]
    pub fn new() -> Self {
        Self::with_rules(DrawRules::default())
    }

    pub fn with_rules(rules: DrawRules) -> Self {
        let mut board = Self::empty(Color::White, rules);
        board.pieces = initial_setup();
        board.rebuild_grid();
        board.record_position();
        board
    }

    /// Board holding exactly `pieces`, with `turn` to move.
    ///
    /// Moved-flags are inferred from placement: kings, rooks and pawns away
    /// from their home squares count as moved. Off-board pieces and pieces on
    /// an already occupied square are dropped.
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>, turn: Color) -> Self {
        let mut board = Self::empty(turn, DrawRules::default());
        for mut piece in pieces {
            let Some(idx) = piece.position.index() else {
                warn!("dropping {:?} placed off the board", piece.kind);
                continue;
            };
            if board.grid[idx].is_some() {
                warn!("dropping {:?} on occupied square {}", piece.kind, piece.position);
                continue;
            }
            piece.has_moved = piece.has_moved || !piece.on_home_square();
            board.grid[idx] = Some(PieceId(board.pieces.len()));
            board.pieces.push(piece);
        }
        board.record_position();
        board
    }

    fn empty(turn: Color, rules: DrawRules) -> Self {
        Self {
            pieces: Vec::new(),
            grid: [None; 64],
            turn,
            halfmove_clock: 0,
            fullmove_number: 1,
            last_move: None,
            repetitions: HashMap::new(),
            rules,
        }
    }

    /// Discard the game and return to the starting position.
    pub fn reset(&mut self) {
        debug!("resetting board");
        *self = Self::with_rules(self.rules);
    }

    fn rebuild_grid(&mut self) {
        self.grid = [None; 64];
        for (i, piece) in self.pieces.iter().enumerate() {
            if let Some(idx) = piece.position.index() {
                debug_assert!(self.grid[idx].is_none(), "two pieces on {}", piece.position);
                self.grid[idx] = Some(PieceId(i));
            }
        }
    }

    #[inline]
    fn id_at(&self, pos: Position) -> Option<PieceId> {
        pos.index().and_then(|idx| self.grid[idx])
    }

    /// The piece on `pos`, if any. Off-board positions hold nothing.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.id_at(pos).map(|id| &self.pieces[id.0])
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn count_pieces(&self, color: Color) -> usize {
        self.pieces.iter().filter(|p| p.color == color).count()
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces
            .iter()
            .find(|p| p.kind == PieceKind::King && p.color == color)
            .map(|p| p.position)
    }

    /// Sum of [`PieceKind::material_value`] over `color`'s live pieces.
    pub fn material_score(&self, color: Color) -> i32 {
        self.pieces
            .iter()
            .filter(|p| p.color == color)
            .map(|p| p.kind.material_value())
            .sum()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after each Black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    #[inline]
    pub fn rules(&self) -> &DrawRules {
        &self.rules
    }

    /// How often `hash` has occurred since the last irreversible move.
    pub fn repetition_count(&self, hash: &PositionHash) -> u32 {
        self.repetitions.get(hash).copied().unwrap_or(0)
    }

    /// Execute a move for the side to move.
    ///
    /// Returns `false` and leaves the board untouched if the move is illegal.
    #[inline]
    pub fn move_piece(&mut self, from: Position, to: Position) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Execute a move for the side to move, returning its log record.
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<Move, MoveError> {
        let validated = self
            .moving_piece(from, to)
            .and_then(|piece| {
                if piece.color == self.turn {
                    Ok(piece)
                } else {
                    Err(MoveError::WrongTurn {
                        square: from,
                        color: piece.color,
                    })
                }
            })
            .and_then(|piece| self.check_piece_move(piece, to))
            .inspect_err(|err| debug!("rejected {from} -> {to}: {err}"))?;

        Ok(self.apply(validated))
    }

    fn apply(&mut self, Validated { piece, to, kind }: Validated) -> Move {
        let from = piece.position;
        let mover = self.id_at(from);
        let rook = match kind {
            MoveKind::Castle { rook_from, rook_to } => self.id_at(rook_from).map(|id| (id, rook_to)),
            _ => None,
        };
        let captured = kind.captured_square(to).and_then(|sq| self.id_at(sq));

        if let Some(id) = mover {
            let record = &mut self.pieces[id.0];
            record.position = to;
            record.has_moved = true;
        }
        if let Some((id, rook_to)) = rook {
            let record = &mut self.pieces[id.0];
            record.position = rook_to;
            record.has_moved = true;
        }
        // Removal shifts later handles, so it comes after every update by id.
        if let Some(id) = captured {
            self.pieces.remove(id.0);
        }
        self.rebuild_grid();

        if piece.kind == PieceKind::Pawn || kind.is_capture() {
            self.halfmove_clock = 0;
            self.repetitions.clear();
        } else {
            self.halfmove_clock += 1;
        }
        self.last_move = Some(LastMove {
            from,
            to,
            kind: piece.kind,
            color: piece.color,
        });
        if self.turn == Color::Black {
            self.fullmove_number += 1;
        }
        self.turn = !self.turn;
        self.record_position();

        let mv = Move::new(from, to, kind.is_capture(), kind.is_castling());
        debug!("played {mv}");
        mv
    }

    fn record_position(&mut self) {
        let hash = self.position_hash();
        let count = self.repetitions.entry(hash).or_insert(0);
        *count += 1;
        trace!("position seen {} time(s)", *count);
    }

    /// Replace the pawn on `at` with a piece of `kind`, same color and square.
    #[inline]
    pub fn promote_pawn(&mut self, at: Position, kind: PieceKind) -> bool {
        self.try_promote(at, kind).is_ok()
    }

    /// Typed form of [`Board::promote_pawn`].
    ///
    /// Does not check the rank; callers promote once a pawn reaches the far
    /// rank. The repetition history restarts from the promoted position.
    pub fn try_promote(&mut self, at: Position, kind: PieceKind) -> Result<(), PromotionError> {
        if !kind.is_promotion_target() {
            debug!("rejected promotion on {at} to {kind:?}");
            return Err(PromotionError::InvalidKind(kind));
        }
        let id = self
            .id_at(at)
            .filter(|id| self.pieces[id.0].kind == PieceKind::Pawn)
            .ok_or(PromotionError::NoPawn(at))?;

        let pawn = self.pieces[id.0];
        self.pieces[id.0] = Piece {
            kind,
            has_moved: true,
            ..pawn
        };
        self.rebuild_grid();

        self.repetitions.clear();
        self.record_position();
        debug!("promoted {} pawn on {at} to {kind:?}", pawn.color);
        Ok(())
    }

    /// Ask `validator` about moving the piece on `from` to `to`.
    ///
    /// `false` when `from` holds no piece.
    pub fn validate_move_with(
        &self,
        from: Position,
        to: Position,
        validator: &impl MoveValidator,
    ) -> bool {
        self.piece_at(from)
            .is_some_and(|piece| validator.validate(piece, to, self))
    }
}

impl Occupancy for Board {
    #[inline]
    fn piece_at(&self, pos: Position) -> Option<&Piece> {
        Board::piece_at(self, pos)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                let symbol = self
                    .piece_at(Position::new(row, col))
                    .map_or('.', Piece::symbol);
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.turn)
    }
}
