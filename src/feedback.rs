use crate::moves::Move;
use crate::position::Position;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Legal destination of the selected piece
    Destination,
    /// Legal destination that captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King of the side to move, in check
    Check,
    /// Piece giving check
    Checker,
}

/// Squares to highlight and how, for the current position.
///
/// Computed by [`compute_feedback`] and handed to whatever renders the
/// board; nothing here knows about colors, sprites or terminals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Position, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    #[inline]
    pub fn squares(&self) -> &[(Position, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Position) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any earlier entry.
    pub fn set(&mut self, square: Position, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

/// The king in check and the pieces checking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub king_square: Position,
    pub checkers: Vec<Position>,
}

/// Game state information needed to compute feedback
pub trait FeedbackSource {
    /// Legal moves of the side to move
    fn legal_moves(&self) -> &[Move];

    /// Square of the piece the player has selected
    fn selected(&self) -> Option<Position>;

    /// Set when the side to move is in check
    fn check_info(&self) -> Option<CheckInfo>;
}

/// Compute visual feedback based on current game state.
///
/// - Side to move in check: marks the king and its checkers
/// - Piece selected: marks it and its legal destinations, on top of the above
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();

    if let Some(check) = source.check_info() {
        feedback.set(check.king_square, SquareFeedback::Check);
        for checker in check.checkers {
            feedback.set(checker, SquareFeedback::Checker);
        }
    }

    if let Some(from) = source.selected() {
        feedback.set(from, SquareFeedback::Origin);
        for (to, kind) in destinations_for(source.legal_moves(), from) {
            feedback.set(to, kind);
        }
    }

    feedback
}

fn destinations_for(
    legal_moves: &[Move],
    from: Position,
) -> impl Iterator<Item = (Position, SquareFeedback)> + '_ {
    legal_moves
        .iter()
        .filter(move |mv| mv.from == from)
        .map(classify_move)
}

/// Classify a move as either a capture or regular destination
fn classify_move(mv: &Move) -> (Position, SquareFeedback) {
    if mv.is_capture {
        (mv.to, SquareFeedback::Capture)
    } else {
        (mv.to, SquareFeedback::Destination)
    }
}
