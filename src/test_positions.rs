//! 象棋测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试和调试
//!
//! 命名规范:
//! - START: 初始局面
//! - 其余局面以其考察的要点命名

// =============================================================================
// 开局
// =============================================================================

/// 初始局面
pub const START: &str = crate::fen::START_FEN;

/// 红方中炮（炮二平五）后，黑方走
pub const CANNON_OPENING: &str =
    "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RHEAKAEHR b";

// =============================================================================
// 炮架
// =============================================================================

/// 红炮 b7 打 b0 马，去掉黑炮后没有炮架
pub const CANNON_NO_SCREEN: &str = "rheakaehr/9/7c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR r";

/// 红炮 b7 打 b0 马，b4 多一个兵，形成两个炮架
pub const CANNON_TWO_SCREENS: &str =
    "rheakaehr/9/1c5c1/p1p1p1p1p/1P7/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR r";

// =============================================================================
// 杀棋
// =============================================================================

/// 黑车 e5 直对红帅，黑方走一步即可吃帅
pub const GENERAL_EXPOSED: &str = "4k4/9/9/9/9/4r4/9/9/9/R3K4 b";

/// 黑车 a5 无保护，红车可以白吃
pub const HANGING_ROOK: &str = "4k4/9/9/9/9/r8/9/9/9/R3K4 r";

// =============================================================================
// 特殊情况
// =============================================================================

/// 黑方唯一走法 a3a4（将、象均被堵死）
pub const BLACK_SINGLE_MOVE: &str = "3ke4/3e1P3/2P1P4/p8/9/9/9/9/9/4K4 b";

/// 黑方无子可走
pub const BLACK_BLOCKED: &str = "3ke4/3e1P3/2P1P4/9/9/9/9/9/9/4K4 b";

/// 所有测试局面
pub const ALL_POSITIONS: &[(&str, &str)] = &[
    ("START", START),
    ("CANNON_OPENING", CANNON_OPENING),
    ("CANNON_NO_SCREEN", CANNON_NO_SCREEN),
    ("CANNON_TWO_SCREENS", CANNON_TWO_SCREENS),
    ("GENERAL_EXPOSED", GENERAL_EXPOSED),
    ("HANGING_ROOK", HANGING_ROOK),
    ("BLACK_SINGLE_MOVE", BLACK_SINGLE_MOVE),
    ("BLACK_BLOCKED", BLACK_BLOCKED),
];
