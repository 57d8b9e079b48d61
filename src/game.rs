//! 对局状态
//!
//! 持有棋盘、回合、走子记录和胜负状态。吃掉对方将帅即判胜，
//! 不做将军、困毙、长将检测。

use crate::board::Board;
use crate::fen::{parse_fen, to_fen};
use crate::types::{Color, GameResult, Move, Piece, PieceType, Position};

/// 撤销信息，由 [`Game::make_move`] 返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    pub captured: Option<Piece>,
    turn: Color,
    game_over: bool,
    winner: Option<Color>,
    last_move: Option<Move>,
}

/// 一局棋
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<Move>,
    game_over: bool,
    winner: Option<Color>,
    last_move: Option<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// 标准开局，红方先走
    pub fn new() -> Self {
        Game::with_board(Board::initial(), Color::Red)
    }

    /// 从任意棋盘开始
    pub fn with_board(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            history: Vec::new(),
            game_over: false,
            winner: None,
            last_move: None,
        }
    }

    /// 从 FEN 字符串创建
    pub fn from_fen(fen: &str) -> Result<Game, String> {
        let state = parse_fen(fen)?;
        Ok(Game::with_board(state.board, state.turn))
    }

    pub fn to_fen(&self) -> String {
        to_fen(&self.board, self.turn)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.board.get(pos)
    }

    /// 当前回合
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn result(&self) -> GameResult {
        GameResult::from_winner(self.winner)
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// 尝试走棋
    ///
    /// 依次检查：对局未结束、起点有己方棋子、走法符合棋子规则。
    /// 任一条件不满足返回 false，状态不变。
    pub fn attempt_move(&mut self, mv: Move) -> bool {
        if self.game_over {
            return false;
        }
        match self.board.get(mv.from) {
            Some(piece) if piece.color == self.turn => {}
            _ => return false,
        }
        if !self.board.is_legal_move(mv.from, mv.to) {
            return false;
        }
        self.make_move(mv);
        true
    }

    /// 执行走棋（不检查合法性），返回撤销信息
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let undo = Undo {
            mv,
            captured: self.board.get(mv.to),
            turn: self.turn,
            game_over: self.game_over,
            winner: self.winner,
            last_move: self.last_move,
        };

        let mover = self.board.get(mv.from).map_or(self.turn, |p| p.color);
        if let Some(captured) = self.board.relocate(&mv) {
            if captured.kind == PieceType::General && captured.color != mover {
                self.game_over = true;
                self.winner = Some(mover);
            }
        }

        self.turn = self.turn.opposite();
        self.last_move = Some(mv);
        self.history.push(mv);
        undo
    }

    /// 撤销走棋，完全恢复到 make_move 之前的状态
    pub fn undo_move(&mut self, undo: Undo) {
        let piece = self.board.get(undo.mv.to);
        self.board.set(undo.mv.from, piece);
        self.board.set(undo.mv.to, undo.captured);

        self.turn = undo.turn;
        self.game_over = undo.game_over;
        self.winner = undo.winner;
        self.last_move = undo.last_move;
        self.history.pop();
    }

    /// 某方所有走法（不考虑回合和对局是否结束）
    pub fn generate_moves(&self, color: Color) -> Vec<Move> {
        self.board.generate_moves(color)
    }

    /// 当前行棋方的所有走法
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.generate_moves(self.turn)
    }

    /// 静态评估
    pub fn evaluate(&self, color: Color) -> i32 {
        self.board.evaluate(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::Red);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.last_move(), None);
        assert_eq!(game.history_len(), 0);
        assert_eq!(game.result(), GameResult::Ongoing);
    }

    #[test]
    fn test_successful_move_updates_state() {
        let mut game = Game::new();
        let mv = Move::new(1, 7, 4, 7);
        let piece = game.piece_at(mv.from);

        assert!(game.attempt_move(mv));
        assert_eq!(game.piece_at(mv.to), piece);
        assert_eq!(game.piece_at(mv.from), None);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.last_move(), Some(mv));
        assert_eq!(game.history(), &[mv]);
    }

    #[test]
    fn test_rejected_moves_change_nothing() {
        let mut game = Game::new();
        let before = game.clone();

        // 黑方棋子，非黑方回合
        assert!(!game.attempt_move(Move::new(0, 3, 0, 4)));
        // 空格
        assert!(!game.attempt_move(Move::new(4, 4, 4, 5)));
        // 车被自己的兵挡住
        assert!(!game.attempt_move(Move::new(0, 9, 0, 5)));
        // 越界
        assert!(!game.attempt_move(Move::new(0, 9, 0, 10)));
        assert!(!game.attempt_move(Move::new(-1, 9, 0, 9)));

        assert_eq!(game, before);
    }

    #[test]
    fn test_capturing_general_ends_game() {
        let mut game = Game::from_fen("4k4/9/9/9/9/4r4/9/9/9/R3K4 b").unwrap();
        assert!(game.attempt_move(Move::new(4, 5, 4, 9)));
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::Black));
        assert_eq!(game.result(), GameResult::BlackWin);

        let before = game.clone();
        assert!(!game.attempt_move(Move::new(0, 9, 0, 0)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_make_undo_restores_exactly() {
        let mut game = Game::new();
        assert!(game.attempt_move(Move::new(7, 7, 4, 7)));
        let before = game.clone();

        for mv in game.legal_moves() {
            let undo = game.make_move(mv);
            game.undo_move(undo);
            assert_eq!(game, before, "undo of {} did not restore", mv);
        }
    }

    #[test]
    fn test_undo_restores_terminal_flags() {
        let mut game = Game::from_fen("4k4/9/9/9/9/4r4/9/9/9/R3K4 b").unwrap();
        let before = game.clone();
        let undo = game.make_move(Move::new(4, 5, 4, 9));
        assert!(game.is_game_over());
        game.undo_move(undo);
        assert_eq!(game, before);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_fen_roundtrip() {
        let fen = "4k4/9/9/9/9/4r4/9/9/9/R3K4 b";
        assert_eq!(Game::from_fen(fen).unwrap().to_fen(), fen);
    }
}
