use std::collections::VecDeque;
use std::ops::Range;

use thiserror::Error;

use crate::MoveRecorder;
use crate::game_logic::{GameEngine, GameError, GameState};
use crate::piece::PieceKind;
use crate::position::Position;

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid move notation: '{0}'")]
pub struct ScriptError(String);

/// One coordinate move, with the promotion kind when a pawn reaches the far rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedMove {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
}

/// Plays queued coordinate moves against a [`GameEngine`].
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    pending: VecDeque<ScriptedMove>,
}

impl ScriptedPlayer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves not yet played.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - Moves are separated by whitespace
    /// - A move is the origin square followed by the destination (`e2e4`)
    /// - A fifth character picks the promotion kind: `q`, `r`, `b` or `n`
    ///
    /// Nothing is queued if any move fails to parse.
    pub fn push_script(&mut self, script: &str) -> Result<(), ScriptError> {
        let moves = script
            .split_whitespace()
            .map(parse_move)
            .collect::<Result<Vec<_>, _>>()?;
        self.pending.extend(moves);
        Ok(())
    }

    /// Play the next pending move, returning the resulting state.
    /// Returns None if no pending moves.
    ///
    /// A promotion kind given for a move that does not promote is an error.
    pub fn tick<R: MoveRecorder>(
        &mut self,
        engine: &mut GameEngine<R>,
    ) -> Option<Result<GameState, GameError>> {
        let mv = self.pending.pop_front()?;
        let result = engine.play(mv.from, mv.to).and_then(|state| {
            match (mv.promotion, state.pending_promotion()) {
                (Some(kind), Some(_)) => engine.promote(kind),
                (Some(_), None) => Err(GameError::NoPromotionPending),
                (None, _) => Ok(state),
            }
        });
        Some(result)
    }

    /// Play all pending moves, calling the provided callback after each.
    ///
    /// Stops at the first rejected move and discards the rest of the queue.
    pub fn drain<R, F>(
        &mut self,
        engine: &mut GameEngine<R>,
        mut on_tick: F,
    ) -> Result<(), GameError>
    where
        R: MoveRecorder,
        F: FnMut(&GameState),
    {
        while let Some(result) = self.tick(engine) {
            match result {
                Ok(state) => on_tick(&state),
                Err(err) => {
                    self.pending.clear();
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

fn parse_move(token: &str) -> Result<ScriptedMove, ScriptError> {
    let invalid = || ScriptError(token.to_string());
    let square = |range: Range<usize>| {
        token
            .get(range)
            .and_then(|s: &str| s.parse::<Position>().ok())
            .ok_or_else(invalid)
    };

    let from = square(0..2)?;
    let to = square(2..4)?;
    let promotion = match token.get(4..) {
        Some("") => None,
        Some("q") => Some(PieceKind::Queen),
        Some("r") => Some(PieceKind::Rook),
        Some("b") => Some(PieceKind::Bishop),
        Some("n") => Some(PieceKind::Knight),
        _ => return Err(invalid()),
    };
    Ok(ScriptedMove {
        from,
        to,
        promotion,
    })
}
