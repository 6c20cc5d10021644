//! Game-ending conditions and the draw thresholds they use.

use std::fmt;

use super::Board;
use crate::piece::{Color, PieceKind};

/// Draw thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRules {
    /// Halfmoves without a pawn move or capture before the fifty-move rule applies.
    pub halfmove_limit: u32,
    /// Occurrences of one position before it counts as repeated.
    pub repetition_limit: u32,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            halfmove_limit: 100,
            repetition_limit: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        })
    }
}

/// Interpretation of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The given side is in check but has a move.
    Check(Color),
    Checkmate { winner: Color },
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Draw(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => f.write_str("in progress"),
            GameStatus::Check(color) => write!(f, "{color} is in check"),
            GameStatus::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            GameStatus::Draw(reason) => write!(f, "drawn by {reason}"),
        }
    }
}

impl Board {
    pub fn is_player_in_checkmate(&self, color: Color) -> bool {
        self.is_player_in_check(color) && !self.has_any_legal_move(color)
    }

    pub fn is_player_in_stalemate(&self, color: Color) -> bool {
        !self.is_player_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Only bare kings, or kings plus a single bishop or knight.
    pub fn has_insufficient_material(&self) -> bool {
        let mut others = self.pieces.iter().filter(|p| p.kind != PieceKind::King);
        match (others.next(), others.next()) {
            (None, _) => true,
            (Some(only), None) => matches!(only.kind, PieceKind::Bishop | PieceKind::Knight),
            _ => false,
        }
    }

    pub fn is_fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= self.rules.halfmove_limit
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions
            .values()
            .any(|&count| count >= self.rules.repetition_limit)
    }

    /// Status for the side to move, checks applied in order: checkmate,
    /// stalemate, insufficient material, fifty-move rule, repetition, check.
    pub fn status(&self) -> GameStatus {
        let side = self.turn;
        let in_check = self.is_player_in_check(side);
        let can_move = self.has_any_legal_move(side);

        if in_check && !can_move {
            GameStatus::Checkmate {
                winner: side.opponent(),
            }
        } else if !can_move {
            GameStatus::Draw(DrawReason::Stalemate)
        } else if self.has_insufficient_material() {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else if self.is_fifty_move_rule() {
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        } else if self.is_threefold_repetition() {
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        } else if in_check {
            GameStatus::Check(side)
        } else {
            GameStatus::Ongoing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::position::Position;
    use test_case::test_case;

    fn sq(name: &str) -> Position {
        name.parse().expect("test square should be valid")
    }

    fn board(pieces: &[(PieceKind, Color, &str)], turn: Color) -> Board {
        Board::from_pieces(
            pieces
                .iter()
                .map(|&(kind, color, name)| Piece::new(color, kind, sq(name))),
            turn,
        )
    }

    fn play(board: &mut Board, moves: &[(&str, &str)]) {
        for &(from, to) in moves {
            assert!(board.move_piece(sq(from), sq(to)), "{from} -> {to}\n{board}");
        }
    }

    const KNIGHT_CYCLE: [(&str, &str); 4] =
        [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::new();
        play(
            &mut board,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert!(board.is_player_in_check(Color::White));
        assert!(board.is_player_in_checkmate(Color::White));
        assert!(!board.is_player_in_stalemate(Color::White));
        assert_eq!(
            board.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert!(board.status().is_over());
    }

    #[test]
    fn check_with_escape_is_not_mate() {
        let mut board = Board::new();
        play(
            &mut board,
            &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")],
        );
        assert!(board.is_player_in_check(Color::Black));
        assert!(!board.is_player_in_checkmate(Color::Black));
        assert_eq!(board.status(), GameStatus::Check(Color::Black));
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let board = board(
            &[
                (PieceKind::King, Color::Black, "a8"),
                (PieceKind::Queen, Color::White, "c7"),
                (PieceKind::King, Color::White, "e1"),
            ],
            Color::Black,
        );
        assert!(board.is_player_in_stalemate(Color::Black));
        assert!(!board.is_player_in_checkmate(Color::Black));
        assert_eq!(board.status(), GameStatus::Draw(DrawReason::Stalemate));
    }

    #[test]
    fn initial_position_is_ongoing() {
        let board = Board::new();
        assert_eq!(board.status(), GameStatus::Ongoing);
        assert!(!board.status().is_over());
        assert!(!board.is_player_in_stalemate(Color::White));
    }

    #[test_case(&[] => true; "bare kings")]
    #[test_case(&[(PieceKind::Bishop, Color::White)] => true; "king and bishop")]
    #[test_case(&[(PieceKind::Knight, Color::Black)] => true; "king and knight")]
    #[test_case(
        &[(PieceKind::Bishop, Color::White), (PieceKind::Knight, Color::Black)] => false;
        "bishop against knight"
    )]
    #[test_case(
        &[(PieceKind::Knight, Color::White), (PieceKind::Knight, Color::White)] => false;
        "two knights"
    )]
    #[test_case(&[(PieceKind::Pawn, Color::White)] => false; "single pawn")]
    #[test_case(&[(PieceKind::Rook, Color::Black)] => false; "single rook")]
    fn insufficient_material(extra: &[(PieceKind, Color)]) -> bool {
        let spare = ["c4", "f5", "d3"];
        let mut pieces = vec![
            (PieceKind::King, Color::White, "e1"),
            (PieceKind::King, Color::Black, "e8"),
        ];
        pieces.extend(
            extra
                .iter()
                .zip(spare)
                .map(|(&(kind, color), name)| (kind, color, name)),
        );
        board(&pieces, Color::White).has_insufficient_material()
    }

    #[test]
    fn initial_position_has_sufficient_material() {
        assert!(!Board::new().has_insufficient_material());
    }

    const ROOK_CYCLE: [(&str, &str); 4] =
        [("a1", "a2"), ("h8", "h7"), ("a2", "a1"), ("h7", "h8")];

    fn rook_shuffle_board() -> Board {
        board(
            &[
                (PieceKind::King, Color::White, "e1"),
                (PieceKind::Rook, Color::White, "a1"),
                (PieceKind::King, Color::Black, "e8"),
                (PieceKind::Rook, Color::Black, "h8"),
                (PieceKind::Knight, Color::Black, "a3"),
            ],
            Color::White,
        )
    }

    #[test]
    fn fifty_move_rule_after_one_hundred_quiet_halfmoves() {
        let mut board = rook_shuffle_board();
        // 24 cycles of four halfmoves plus three more.
        for _ in 0..24 {
            play(&mut board, &ROOK_CYCLE);
        }
        play(&mut board, &ROOK_CYCLE[..3]);
        assert_eq!(board.halfmove_clock(), 99);
        assert!(!board.is_fifty_move_rule());

        play(&mut board, &ROOK_CYCLE[3..]);
        assert_eq!(board.halfmove_clock(), 100);
        assert!(board.is_fifty_move_rule());
    }

    #[test]
    fn capture_on_halfmove_ninety_nine_resets_the_clock() {
        let mut board = rook_shuffle_board();
        for _ in 0..24 {
            play(&mut board, &ROOK_CYCLE);
        }
        play(&mut board, &ROOK_CYCLE[..2]);
        assert_eq!(board.halfmove_clock(), 98);

        play(&mut board, &[("a2", "a3")]);
        assert_eq!(board.halfmove_clock(), 0);
        assert!(!board.is_fifty_move_rule());
    }

    #[test]
    fn custom_halfmove_limit() {
        let mut board = Board::with_rules(DrawRules {
            halfmove_limit: 4,
            ..DrawRules::default()
        });
        play(&mut board, &KNIGHT_CYCLE[..3]);
        assert!(!board.is_fifty_move_rule());
        play(&mut board, &KNIGHT_CYCLE[3..]);
        assert!(board.is_fifty_move_rule());
        assert_eq!(board.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn threefold_repetition_via_knight_shuffle() {
        let mut board = Board::new();
        let start = board.position_hash();
        assert_eq!(board.repetition_count(&start), 1);

        play(&mut board, &KNIGHT_CYCLE);
        assert_eq!(board.repetition_count(&start), 2);
        assert!(!board.is_threefold_repetition());

        play(&mut board, &KNIGHT_CYCLE);
        assert_eq!(board.repetition_count(&start), 3);
        assert!(board.is_threefold_repetition());
        assert_eq!(
            board.status(),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
    }

    #[test]
    fn pawn_move_clears_repetition_history() {
        let mut board = Board::new();
        let start = board.position_hash();
        play(&mut board, &KNIGHT_CYCLE);
        assert_eq!(board.repetition_count(&start), 2);

        play(&mut board, &[("e2", "e4")]);
        assert_eq!(board.repetition_count(&start), 0);
        assert_eq!(board.repetition_count(&board.position_hash()), 1);

        play(&mut board, &[("g8", "f6"), ("g1", "f3"), ("f6", "g8"), ("f3", "g1")]);
        assert!(!board.is_threefold_repetition());
    }

    #[test]
    fn status_queries_are_idempotent() {
        let mut board = Board::new();
        play(&mut board, &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")]);
        let before = board.clone();
        assert_eq!(board.status(), board.status());
        assert_eq!(
            board.is_player_in_checkmate(Color::Black),
            board.is_player_in_checkmate(Color::Black)
        );
        assert_eq!(board.has_insufficient_material(), board.has_insufficient_material());
        assert_eq!(board, before);
    }
}
