//! FEN 解析和生成
//!
//! 格式: `<棋盘> <回合>`
//!
//! 棋盘从 y=0（黑方底线）写到 y=9（红方底线），行之间用 `/` 分隔。
//!
//! 棋盘符号：
//! - 红方：K(帅) A(仕) E(相) H(马) R(车) C(炮) P(兵)
//! - 黑方：k a e h r c p
//! - 兼容写法：N/n 表示马，B/b 表示象，G/g 表示将
//! - 空格：数字 (1-9)
//!
//! 回合：`r` 红方，`b` 黑方（`w` 视为红方）

use crate::board::Board;
use crate::types::{Color, Piece, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// 标准开局 FEN
pub const START_FEN: &str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR r";

/// FEN 解析后的状态
#[derive(Debug, Clone)]
pub struct FenState {
    pub board: Board,
    pub turn: Color,
}

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<FenState, String> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 2 {
        return Err(format!(
            "Invalid FEN format: expected '<board> <turn>', got: {}",
            fen
        ));
    }

    let board = parse_board(parts[0])?;
    let turn = match parts.get(1) {
        Some(turn_str) => {
            let mut chars = turn_str.chars();
            match (chars.next().and_then(Color::from_fen_char), chars.next()) {
                (Some(color), None) => color,
                _ => return Err(format!("Invalid turn: {}", turn_str)),
            }
        }
        None => Color::Red,
    };

    Ok(FenState { board, turn })
}

/// 解析棋盘字符串
fn parse_board(board_str: &str) -> Result<Board, String> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != BOARD_HEIGHT as usize {
        return Err(format!(
            "Invalid board: expected 10 rows, got {}",
            rows.len()
        ));
    }

    let mut board = Board::empty();

    for (y, row_str) in rows.iter().enumerate() {
        let y = y as i8;
        let mut x: i8 = 0;

        for ch in row_str.chars() {
            if let Some(run) = ch.to_digit(10) {
                if run == 0 {
                    return Err(format!("Invalid empty run '0' in row {}", y));
                }
                x += run as i8;
            } else {
                let piece =
                    Piece::from_fen_char(ch).ok_or_else(|| format!("Invalid piece char: {}", ch))?;
                if x >= BOARD_WIDTH {
                    return Err(format!("Row {} is too long: {}", y, row_str));
                }
                board.set(Position::new(x, y), Some(piece));
                x += 1;
            }

            if x > BOARD_WIDTH {
                return Err(format!("Row {} is too long: {}", y, row_str));
            }
        }

        if x != BOARD_WIDTH {
            return Err(format!(
                "Row {} has {} columns, expected 9: {}",
                y, x, row_str
            ));
        }
    }

    Ok(board)
}

/// 生成棋盘部分的 FEN
pub fn board_to_fen(board: &Board) -> String {
    let mut rows = Vec::with_capacity(BOARD_HEIGHT as usize);

    for y in 0..BOARD_HEIGHT {
        let mut row = String::new();
        let mut empty = 0;

        for x in 0..BOARD_WIDTH {
            match board.get(Position::new(x, y)) {
                Some(piece) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char());
                }
                None => empty += 1,
            }
        }

        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        rows.push(row);
    }

    rows.join("/")
}

/// 生成完整 FEN
pub fn to_fen(board: &Board, turn: Color) -> String {
    format!("{} {}", board_to_fen(board), turn.to_fen_char())
}
