//! 象棋棋盘与走法规则
//!
//! 使用 90 格数组存储棋子，提供合法性判断、走法生成与静态评估。
//! 不检查将军、飞将等规则。

use std::fmt;

use crate::types::{Color, Move, Piece, PieceType, Position, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

/// 底线排列（从 x=0 到 x=8）
const BACK_RANK: [PieceType; 9] = [
    PieceType::Rook,
    PieceType::Horse,
    PieceType::Elephant,
    PieceType::Advisor,
    PieceType::General,
    PieceType::Advisor,
    PieceType::Elephant,
    PieceType::Horse,
    PieceType::Rook,
];

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const ELEPHANT_STEPS: [(i8, i8); 4] = [(-2, -2), (2, -2), (-2, 2), (2, 2)];
const HORSE_STEPS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// 90 个格子 (10行 x 9列)，行优先
    squares: [Option<Piece>; BOARD_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// 空棋盘
    pub fn empty() -> Self {
        Board {
            squares: [None; BOARD_CELLS],
        }
    }

    /// 标准开局
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for (x, kind) in BACK_RANK.iter().enumerate() {
            let x = x as i8;
            board.set(Position::new(x, 0), Some(Piece::new(*kind, Color::Black)));
            board.set(Position::new(x, 9), Some(Piece::new(*kind, Color::Red)));
        }
        for x in [1, 7] {
            board.set(Position::new(x, 2), Some(Piece::new(PieceType::Cannon, Color::Black)));
            board.set(Position::new(x, 7), Some(Piece::new(PieceType::Cannon, Color::Red)));
        }
        for x in [0, 2, 4, 6, 8] {
            board.set(Position::new(x, 3), Some(Piece::new(PieceType::Soldier, Color::Black)));
            board.set(Position::new(x, 6), Some(Piece::new(PieceType::Soldier, Color::Red)));
        }
        board
    }

    /// 获取某位置的棋子，越界返回 None
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.to_index()]
    }

    /// 放置或清除棋子，越界时忽略
    #[inline]
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    #[inline]
    fn has_piece(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// 按行优先顺序遍历所有棋子
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, sq)| sq.map(|p| (Position::from_index(idx), p)))
    }

    /// 某方棋子数量
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// 找到将的位置
    pub fn find_general(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.kind == PieceType::General)
            .map(|(pos, _)| pos)
    }

    /// 同一直线上两点之间的棋子数（不含端点），不在同一直线返回 0
    pub fn count_between(&self, from: Position, to: Position) -> usize {
        if from.x == to.x {
            let (lo, hi) = (from.y.min(to.y), from.y.max(to.y));
            ((lo + 1)..hi)
                .filter(|&y| self.has_piece(Position::new(from.x, y)))
                .count()
        } else if from.y == to.y {
            let (lo, hi) = (from.x.min(to.x), from.x.max(to.x));
            ((lo + 1)..hi)
                .filter(|&x| self.has_piece(Position::new(x, from.y)))
                .count()
        } else {
            0
        }
    }

    /// 判断 from 处棋子走到 to 是否符合该棋子的走法（不考虑回合）
    pub fn is_legal_move(&self, from: Position, to: Position) -> bool {
        match self.get(from) {
            Some(piece) => self.is_legal_for(piece, from, to),
            None => false,
        }
    }

    fn is_legal_for(&self, piece: Piece, from: Position, to: Position) -> bool {
        if !to.is_valid() || from == to {
            return false;
        }

        let target = self.get(to);
        if target.is_some_and(|t| t.color == piece.color) {
            return false;
        }

        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let adx = dx.abs();
        let ady = dy.abs();

        match piece.kind {
            PieceType::General => to.is_in_palace(piece.color) && adx + ady == 1,
            PieceType::Advisor => to.is_in_palace(piece.color) && adx == 1 && ady == 1,
            PieceType::Elephant => {
                if adx != 2 || ady != 2 || !to.is_on_own_side(piece.color) {
                    return false;
                }
                // 象眼
                let eye = Position::new(from.x + dx / 2, from.y + dy / 2);
                !self.has_piece(eye)
            }
            PieceType::Horse => {
                let leg = if adx == 2 && ady == 1 {
                    Position::new(from.x + dx.signum(), from.y)
                } else if adx == 1 && ady == 2 {
                    Position::new(from.x, from.y + dy.signum())
                } else {
                    return false;
                };
                // 蹩马腿
                !self.has_piece(leg)
            }
            PieceType::Rook => (dx == 0 || dy == 0) && self.count_between(from, to) == 0,
            PieceType::Cannon => {
                if dx != 0 && dy != 0 {
                    return false;
                }
                let screens = self.count_between(from, to);
                if target.is_some() {
                    screens == 1
                } else {
                    screens == 0
                }
            }
            PieceType::Soldier => {
                if adx == 0 && ady == 1 {
                    return dy == piece.color.forward();
                }
                // 过河后可以左右走
                adx == 1 && ady == 0 && !from.is_on_own_side(piece.color)
            }
        }
    }

    /// 某棋子可能到达的格子（未过滤合法性）
    fn candidate_targets(&self, from: Position, kind: PieceType) -> Vec<Position> {
        let steps = |deltas: &[(i8, i8)]| -> Vec<Position> {
            deltas.iter().map(|&(dx, dy)| from.offset(dx, dy)).collect()
        };
        match kind {
            PieceType::General | PieceType::Soldier => steps(&ORTHOGONAL[..]),
            PieceType::Advisor => steps(&DIAGONAL[..]),
            PieceType::Elephant => steps(&ELEPHANT_STEPS[..]),
            PieceType::Horse => steps(&HORSE_STEPS[..]),
            PieceType::Rook | PieceType::Cannon => {
                let mut targets = Vec::with_capacity(17);
                targets.extend((0..BOARD_HEIGHT).map(|y| Position::new(from.x, y)));
                targets.extend((0..BOARD_WIDTH).map(|x| Position::new(x, from.y)));
                targets
            }
        }
    }

    /// 某个棋子的所有合法走法，目标按行优先排列
    pub fn piece_moves(&self, from: Position) -> Vec<Move> {
        let piece = match self.get(from) {
            Some(p) => p,
            None => return Vec::new(),
        };
        let mut targets: Vec<Position> = self
            .candidate_targets(from, piece.kind)
            .into_iter()
            .filter(|&to| self.is_legal_for(piece, from, to))
            .collect();
        targets.sort_by_key(|to| to.to_index());
        targets.dedup();
        targets.into_iter().map(|to| Move { from, to }).collect()
    }

    /// 生成某方所有走法：起点行优先，每个起点的终点行优先
    pub fn generate_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (from, piece) in self.pieces() {
            if piece.color == color {
                moves.extend(self.piece_moves(from));
            }
        }
        moves
    }

    /// 静态评估（子力 + 过河兵奖励），从 color 视角
    pub fn evaluate(&self, color: Color) -> i32 {
        let mut score = 0;
        for (pos, piece) in self.pieces() {
            let mut value = piece.kind.value();
            if piece.kind == PieceType::Soldier {
                if !pos.is_on_own_side(piece.color) {
                    value += 10;
                }
                // 兵临九宫
                let near_palace = match piece.color {
                    Color::Red => pos.y < 3,
                    Color::Black => pos.y > 6,
                };
                if near_palace && (3..=5).contains(&pos.x) {
                    value += 20;
                }
            }
            if piece.color == color {
                score += value;
            } else {
                score -= value;
            }
        }
        score
    }

    /// 移动棋子，返回被吃的棋子（不做合法性检查）
    pub(crate) fn relocate(&mut self, mv: &Move) -> Option<Piece> {
        let piece = self.get(mv.from);
        let captured = self.get(mv.to);
        self.set(mv.to, piece);
        self.set(mv.from, None);
        captured
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   a b c d e f g h i")?;
        for y in 0..BOARD_HEIGHT {
            write!(f, "{:>2} ", y)?;
            for x in 0..BOARD_WIDTH {
                let c = self
                    .get(Position::new(x, y))
                    .map_or('.', |p| p.to_fen_char());
                if x + 1 < BOARD_WIDTH {
                    write!(f, "{} ", c)?;
                } else {
                    write!(f, "{}", c)?;
                }
            }
            writeln!(f)?;
            if y == 4 {
                writeln!(f, "   ~~~~~~~~~~~~~~~~~")?;
            }
        }
        Ok(())
    }
}
