use crate::MoveRecorder;
use crate::moves::Move;

/// In-memory move log for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameHistory {
    moves: Vec<Move>,
}

impl GameHistory {
    #[inline]
    pub const fn new() -> Self {
        Self { moves: Vec::new() }
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Captures so far.
    pub fn capture_count(&self) -> usize {
        self.moves.iter().filter(|mv| mv.is_capture).count()
    }
}

impl MoveRecorder for GameHistory {
    fn record(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    fn clear(&mut self) {
        self.moves.clear();
    }
}

impl<'a> IntoIterator for &'a GameHistory {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
