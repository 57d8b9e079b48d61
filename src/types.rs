//! 象棋核心类型定义
//!
//! 坐标约定：x 为列 (0-8)，y 为行 (0-9)。
//! y=0 是黑方底线（上方），y=9 是红方底线（下方），河界位于 y=4 与 y=5 之间。

use std::fmt;

/// 棋盘列数
pub const BOARD_WIDTH: i8 = 9;
/// 棋盘行数
pub const BOARD_HEIGHT: i8 = 10;
/// 格子总数
pub const BOARD_CELLS: usize = 90;

/// 棋子颜色/阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opposite(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// 兵卒前进方向（y 的增量）
    pub fn forward(&self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    /// 从 FEN 字符解析（`w` 视为红方）
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'r' | 'w' => Some(Color::Red),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::Red => 'r',
            Color::Black => 'b',
        }
    }

    /// 从名称解析（命令行参数）
    pub fn from_name(s: &str) -> Result<Color, String> {
        match s.trim().to_lowercase().as_str() {
            "red" | "r" | "w" => Ok(Color::Red),
            "black" | "b" => Ok(Color::Black),
            other => Err(format!("Unknown color: {} (expected red or black)", other)),
        }
    }

    /// 小写名称
    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    /// 将/帅
    General,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 马
    Horse,
    /// 车
    Rook,
    /// 炮
    Cannon,
    /// 卒/兵
    Soldier,
}

impl PieceType {
    /// 从 FEN 字符解析（大小写均可）
    pub fn from_fen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'k' | 'g' => Some(PieceType::General),
            'a' => Some(PieceType::Advisor),
            'e' | 'b' => Some(PieceType::Elephant),
            'h' | 'n' => Some(PieceType::Horse),
            'r' => Some(PieceType::Rook),
            'c' => Some(PieceType::Cannon),
            'p' | 's' => Some(PieceType::Soldier),
            _ => None,
        }
    }

    /// 转换为 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceType::General => 'k',
            PieceType::Advisor => 'a',
            PieceType::Elephant => 'e',
            PieceType::Horse => 'h',
            PieceType::Rook => 'r',
            PieceType::Cannon => 'c',
            PieceType::Soldier => 'p',
        }
    }

    /// 子力价值
    pub fn value(&self) -> i32 {
        match self {
            PieceType::General => 10000,
            PieceType::Rook => 90,
            PieceType::Cannon => 45,
            PieceType::Horse => 40,
            PieceType::Elephant => 20,
            PieceType::Advisor => 20,
            PieceType::Soldier => 10,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::General => "General",
            PieceType::Advisor => "Advisor",
            PieceType::Elephant => "Elephant",
            PieceType::Horse => "Horse",
            PieceType::Rook => "Rook",
            PieceType::Cannon => "Cannon",
            PieceType::Soldier => "Soldier",
        };
        write!(f, "{}", name)
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self {
        Piece { kind, color }
    }

    /// FEN 字符：红方大写，黑方小写
    pub fn to_fen_char(&self) -> char {
        let c = self.kind.to_fen_char();
        match self.color {
            Color::Red => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceType::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        Some(Piece { kind, color })
    }
}

/// 棋盘位置 (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub fn new(x: i8, y: i8) -> Self {
        Position { x, y }
    }

    /// 检查位置是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..BOARD_WIDTH).contains(&self.x) && (0..BOARD_HEIGHT).contains(&self.y)
    }

    /// 检查位置是否在九宫格内
    pub fn is_in_palace(&self, color: Color) -> bool {
        if !(3..=5).contains(&self.x) {
            return false;
        }
        match color {
            Color::Black => (0..=2).contains(&self.y),
            Color::Red => (7..=9).contains(&self.y),
        }
    }

    /// 检查位置是否在己方半场（未过河）
    pub fn is_on_own_side(&self, color: Color) -> bool {
        match color {
            Color::Black => self.y <= 4,
            Color::Red => self.y >= 5,
        }
    }

    /// 位置加偏移量
    #[inline]
    pub fn offset(&self, dx: i8, dy: i8) -> Position {
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// 行优先索引（调用方保证位置合法）
    #[inline]
    pub fn to_index(&self) -> usize {
        (self.y as usize) * (BOARD_WIDTH as usize) + self.x as usize
    }

    /// 从索引还原位置
    #[inline]
    pub fn from_index(idx: usize) -> Position {
        Position {
            x: (idx % BOARD_WIDTH as usize) as i8,
            y: (idx / BOARD_WIDTH as usize) as i8,
        }
    }

    /// 从坐标字符串解析（如 "e9"）
    pub fn from_fen_str(s: &str) -> Option<Position> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let x = match file {
            'a'..='i' => (file as u8 - b'a') as i8,
            _ => return None,
        };
        let y = rank.to_digit(10)? as i8;
        Some(Position { x, y })
    }

    /// 转换为坐标字符串（如 "e9"）
    pub fn to_fen_str(&self) -> String {
        let file = (b'a' + self.x as u8) as char;
        format!("{}{}", file, self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_str())
    }
}

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from_x: i8, from_y: i8, to_x: i8, to_y: i8) -> Self {
        Move {
            from: Position::new(from_x, from_y),
            to: Position::new(to_x, to_y),
        }
    }

    /// 从走法字符串解析（如 "b7b0"）
    pub fn from_fen_str(s: &str) -> Option<Move> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Position::from_fen_str(&s[0..2])?;
        let to = Position::from_fen_str(&s[2..4])?;
        Some(Move { from, to })
    }

    /// 转换为走法字符串
    pub fn to_fen_str(&self) -> String {
        format!("{}{}", self.from.to_fen_str(), self.to.to_fen_str())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_str())
    }
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    RedWin,
    BlackWin,
}

impl GameResult {
    pub fn from_winner(winner: Option<Color>) -> GameResult {
        match winner {
            None => GameResult::Ongoing,
            Some(Color::Red) => GameResult::RedWin,
            Some(Color::Black) => GameResult::BlackWin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_fen_str() {
        assert_eq!(Position::from_fen_str("a0"), Some(Position::new(0, 0)));
        assert_eq!(Position::from_fen_str("e4"), Some(Position::new(4, 4)));
        assert_eq!(Position::from_fen_str("i9"), Some(Position::new(8, 9)));
        assert_eq!(Position::from_fen_str("j0"), None);
        assert_eq!(Position::from_fen_str("a"), None);
        assert_eq!(Position::from_fen_str("a10"), None);
    }

    #[test]
    fn test_position_to_fen_str() {
        assert_eq!(Position::new(0, 0).to_fen_str(), "a0");
        assert_eq!(Position::new(4, 4).to_fen_str(), "e4");
        assert_eq!(Position::new(8, 9).to_fen_str(), "i9");
    }

    #[test]
    fn test_move_from_fen_str() {
        let m = Move::from_fen_str("b7b0").unwrap();
        assert_eq!(m, Move::new(1, 7, 1, 0));
        assert_eq!(m.to_string(), "b7b0");
        assert!(Move::from_fen_str("b7b").is_none());
        assert!(Move::from_fen_str("z7b0").is_none());
    }

    #[test]
    fn test_position_index() {
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let pos = Position::new(x, y);
                assert!(pos.is_valid());
                assert_eq!(Position::from_index(pos.to_index()), pos);
            }
        }
        assert!(!Position::new(-1, 0).is_valid());
        assert!(!Position::new(0, 10).is_valid());
        assert!(!Position::new(9, 0).is_valid());
    }

    #[test]
    fn test_palace_and_river() {
        assert!(Position::new(4, 0).is_in_palace(Color::Black));
        assert!(!Position::new(4, 0).is_in_palace(Color::Red));
        assert!(Position::new(3, 9).is_in_palace(Color::Red));
        assert!(!Position::new(2, 9).is_in_palace(Color::Red));

        assert!(Position::new(0, 4).is_on_own_side(Color::Black));
        assert!(!Position::new(0, 5).is_on_own_side(Color::Black));
        assert!(Position::new(0, 5).is_on_own_side(Color::Red));
        assert!(!Position::new(0, 4).is_on_own_side(Color::Red));
    }

    #[test]
    fn test_piece_fen_char() {
        let p = Piece::from_fen_char('H').unwrap();
        assert_eq!(p, Piece::new(PieceType::Horse, Color::Red));
        assert_eq!(Piece::from_fen_char('n').unwrap().kind, PieceType::Horse);
        assert_eq!(Piece::from_fen_char('b').unwrap().kind, PieceType::Elephant);
        assert_eq!(Piece::new(PieceType::Soldier, Color::Black).to_fen_char(), 'p');
        assert!(Piece::from_fen_char('x').is_none());
    }

    #[test]
    fn test_color_from_name() {
        assert_eq!(Color::from_name("Red"), Ok(Color::Red));
        assert_eq!(Color::from_name("b"), Ok(Color::Black));
        assert!(Color::from_name("green").is_err());
    }
}
