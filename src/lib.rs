//! Xiangqi (Chinese Chess) rules engine and minimax AI
//!
//! 象棋规则引擎 + Alpha-Beta 搜索 AI

pub mod ai;
pub mod board;
pub mod fen;
pub mod game;
pub mod test_positions;
pub mod types;

pub use ai::{
    get_node_count, reset_node_count, AIConfig, MinimaxAI, ScoredMove, DEFAULT_DEPTH,
    NO_MOVES_SCORE, WIN_SCORE,
};
pub use board::Board;
pub use fen::{parse_fen, to_fen, FenState, START_FEN};
pub use game::{Game, Undo};
pub use types::{Color, GameResult, Move, Piece, PieceType, Position};
