//! AI 模块
//!
//! 固定深度的 Minimax + Alpha-Beta 搜索

mod minimax;

pub use minimax::{MinimaxAI, NO_MOVES_SCORE, WIN_SCORE};

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::types::Move;

/// 全局节点计数器
pub static NODE_COUNT: AtomicU64 = AtomicU64::new(0);

/// 重置节点计数器
pub fn reset_node_count() {
    NODE_COUNT.store(0, AtomicOrdering::Relaxed);
}

/// 获取当前节点计数
pub fn get_node_count() -> u64 {
    NODE_COUNT.load(AtomicOrdering::Relaxed)
}

/// 默认搜索深度
pub const DEFAULT_DEPTH: u32 = 3;

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度（至少为 1）
    pub depth: u32,
    /// 随机种子，None 时使用系统熵
    pub seed: Option<u64>,
    /// 搜索前是否打乱根节点走法
    pub shuffle: bool,
    /// 开始搜索前的等待时间（毫秒），用于界面显示"思考中"
    pub think_delay_ms: u64,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            depth: DEFAULT_DEPTH,
            seed: None,
            shuffle: true,
            think_delay_ms: 0,
        }
    }
}

/// 走法评分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}
