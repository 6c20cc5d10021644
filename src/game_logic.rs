use log::{debug, info};
use thiserror::Error;

use crate::MoveRecorder;
use crate::board::{Board, GameStatus};
use crate::error::{MoveError, PromotionError};
use crate::feedback::{CheckInfo, FeedbackSource};
use crate::history::GameHistory;
use crate::moves::Move;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;

/// Why the session refused an action.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Promotion(#[from] PromotionError),

    #[error("game is over: {0}")]
    GameOver(GameStatus),

    #[error("pawn on {0} must be promoted first")]
    PromotionPending(Position),

    #[error("no pawn is waiting for promotion")]
    NoPromotionPending,
}

/// Current game state snapshot for feedback and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    legal_moves: Vec<Move>,
    selected: Option<Position>,
    check: Option<CheckInfo>,
    pending_promotion: Option<Position>,
    status: GameStatus,
}

impl GameState {
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<Position> {
        self.pending_promotion
    }
}

impl FeedbackSource for GameState {
    fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    fn selected(&self) -> Option<Position> {
        self.selected
    }

    fn check_info(&self) -> Option<CheckInfo> {
        self.check.clone()
    }
}

/// One game session: plays moves on a [`Board`], hands each executed move to
/// a [`MoveRecorder`] and tracks selection, promotion and the result.
#[derive(Debug, Clone)]
pub struct GameEngine<R: MoveRecorder = GameHistory> {
    board: Board,
    recorder: R,

    /// Piece the player is looking at, for move hints.
    selected: Option<Position>,

    /// Pawn that reached the far rank and still needs a piece kind.
    /// No moves are accepted while this is set.
    pending_promotion: Option<Position>,

    /// Result as of the last completed move.
    status: GameStatus,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    #[inline]
    pub fn new() -> Self {
        Self::with_recorder(GameHistory::new())
    }
}

impl<R: MoveRecorder> GameEngine<R> {
    pub fn with_recorder(recorder: R) -> Self {
        Self::from_board(Board::new(), recorder)
    }

    /// Continue a game from an existing board.
    pub fn from_board(board: Board, recorder: R) -> Self {
        let status = board.status();
        Self {
            board,
            recorder,
            selected: None,
            pending_promotion: None,
            status,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<Position> {
        self.pending_promotion
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Position) -> Option<&Piece> {
        self.board.piece_at(square)
    }

    /// Select a square for move hints, or clear the selection with `None`.
    ///
    /// Only a piece of the side to move stays selected. Returns its legal
    /// destinations, empty when nothing is selected or no move is accepted.
    pub fn select(&mut self, square: Option<Position>) -> Vec<Position> {
        let turn = self.board.current_turn();
        self.selected = square.filter(|&sq| {
            self.piece_at(sq)
                .is_some_and(|piece| piece.color == turn)
        });

        match self.selected {
            Some(from) if self.accepting_moves().is_ok() => self.board.valid_moves(from),
            _ => Vec::new(),
        }
    }

    /// Play a move for the side to move.
    ///
    /// A pawn arriving on the far rank leaves the game waiting for
    /// [`GameEngine::promote`]; the result is evaluated once it is promoted.
    pub fn play(&mut self, from: Position, to: Position) -> Result<GameState, GameError> {
        self.accepting_moves()?;
        let mv = self.board.try_move(from, to)?;
        self.recorder.record(mv);
        self.selected = None;

        let promoting = self
            .board
            .piece_at(to)
            .filter(|p| p.kind == PieceKind::Pawn && to.row() == p.color.promotion_rank())
            .map(|p| p.color);
        if let Some(color) = promoting {
            debug!("{color} pawn on {to} awaits promotion");
            self.pending_promotion = Some(to);
        } else {
            self.refresh_status();
        }
        Ok(self.state())
    }

    /// Promote the waiting pawn to `kind` and evaluate the result.
    pub fn promote(&mut self, kind: PieceKind) -> Result<GameState, GameError> {
        let at = self
            .pending_promotion
            .ok_or(GameError::NoPromotionPending)?;
        self.board.try_promote(at, kind)?;
        self.pending_promotion = None;
        self.refresh_status();
        Ok(self.state())
    }

    /// Start over from the initial position with an empty record.
    pub fn reset(&mut self) {
        self.board.reset();
        self.recorder.clear();
        self.selected = None;
        self.pending_promotion = None;
        self.status = self.board.status();
        info!("new game");
    }

    pub fn state(&self) -> GameState {
        let turn = self.board.current_turn();
        let legal_moves = if self.accepting_moves().is_ok() {
            self.board.legal_moves(turn)
        } else {
            Vec::new()
        };
        let check = self
            .board
            .king_position(turn)
            .filter(|_| self.board.is_player_in_check(turn))
            .map(|king_square| CheckInfo {
                king_square,
                checkers: self.board.attackers_of(king_square, !turn),
            });

        GameState {
            legal_moves,
            selected: self.selected,
            check,
            pending_promotion: self.pending_promotion,
            status: self.status,
        }
    }

    fn accepting_moves(&self) -> Result<(), GameError> {
        if let Some(at) = self.pending_promotion {
            return Err(GameError::PromotionPending(at));
        }
        if self.status.is_over() {
            return Err(GameError::GameOver(self.status));
        }
        Ok(())
    }

    fn refresh_status(&mut self) {
        self.status = self.board.status();
        match self.status {
            GameStatus::Checkmate { winner } => info!("checkmate, {winner} wins"),
            GameStatus::Draw(reason) => info!("game drawn by {reason}"),
            GameStatus::Check(color) => debug!("{color} is in check"),
            GameStatus::Ongoing => {}
        }
    }
}
