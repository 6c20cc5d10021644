pub mod board;
pub mod error;
pub mod feedback;
pub mod game_logic;
pub mod history;
pub mod mock;
pub mod moves;
pub mod piece;
pub mod position;
pub mod rules;

pub use board::{Board, DrawReason, DrawRules, GameStatus, PositionHash};
pub use error::{MoveError, PromotionError};
pub use moves::Move;
pub use piece::{Color, Piece, PieceKind};
pub use position::Position;

/// Strategy for ad hoc move checks on the query path.
///
/// Any `Fn(&Piece, Position, &Board) -> bool` closure is a validator, and
/// [`board::PseudoLegal`] / [`board::FullyLegal`] cover the engine's own
/// rules, so custom checks can wrap or combine them.
pub trait MoveValidator {
    fn validate(&self, piece: &Piece, to: Position, board: &Board) -> bool;
}

impl<F> MoveValidator for F
where
    F: Fn(&Piece, Position, &Board) -> bool,
{
    fn validate(&self, piece: &Piece, to: Position, board: &Board) -> bool {
        self(piece, to, board)
    }
}

/// Sink for executed moves, in play order.
///
/// Abstracts over the persistence side of a game session, which owns
/// storage and file layout. [`history::GameHistory`] keeps them in memory.
pub trait MoveRecorder {
    fn record(&mut self, mv: Move);

    /// Forget everything recorded, for a new game.
    fn clear(&mut self);
}
