//! Minimax AI 策略 - 使用 Alpha-Beta 剪枝
//!
//! 所有试走都在同一个 [`Game`] 上进行（make_move / undo_move），
//! 搜索结束后对局状态与调用前完全一致。

use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::prelude::*;

use super::{get_node_count, AIConfig, ScoredMove, NODE_COUNT};
use crate::game::Game;
use crate::types::{Color, Move};

/// 吃掉将帅的分数
pub const WIN_SCORE: i32 = 100_000;
/// 无子可走时的分数
pub const NO_MOVES_SCORE: i32 = 50_000;

/// Minimax AI
pub struct MinimaxAI {
    color: Color,
    depth: u32,
    rng: StdRng,
    shuffle: bool,
    think_delay: Duration,
}

impl MinimaxAI {
    pub fn new(color: Color, config: &AIConfig) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        MinimaxAI {
            color,
            depth: config.depth.max(1),
            rng,
            shuffle: config.shuffle,
            think_delay: Duration::from_millis(config.think_delay_ms),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn think_delay(&self) -> Duration {
        self.think_delay
    }

    /// 选择走法（不会执行该走法）
    pub fn select_move(&mut self, game: &mut Game) -> Option<Move> {
        self.select_move_scored(game).map(|sm| sm.mv)
    }

    /// 等待 delay 后再开始同步搜索，结果与 [`select_move`](Self::select_move) 相同
    pub fn select_move_after(&mut self, game: &mut Game, delay: Duration) -> Option<Move> {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        self.select_move(game)
    }

    /// 选择走法并返回其搜索分数
    pub fn select_move_scored(&mut self, game: &mut Game) -> Option<ScoredMove> {
        if game.is_game_over() {
            return None;
        }
        if game.turn() != self.color {
            warn!(
                "asked to move for {} but it is {}'s turn",
                self.color,
                game.turn()
            );
            return None;
        }

        let mut moves = game.generate_moves(self.color);
        if moves.is_empty() {
            return None;
        }
        if self.shuffle {
            moves.shuffle(&mut self.rng);
        }

        let start = Instant::now();
        let nodes_before = get_node_count();
        let mut best: Option<ScoredMove> = None;

        for mv in moves {
            let undo = game.make_move(mv);
            let score = self.minimax(game, self.depth - 1, i32::MIN, i32::MAX, false);
            game.undo_move(undo);

            debug!("candidate {} scored {}", mv, score);

            // 分数相同时保留先出现的走法
            if best.map_or(true, |b| score > b.score) {
                best = Some(ScoredMove { mv, score });
            }
        }

        if let Some(b) = best {
            info!(
                "{} plays {} (score {}, depth {}, {} nodes, {:.3}s)",
                self.color,
                b.mv,
                b.score,
                self.depth,
                get_node_count().saturating_sub(nodes_before),
                start.elapsed().as_secs_f64()
            );
        }
        best
    }

    /// Minimax 搜索（带 Alpha-Beta 剪枝），分数始终以 AI 所属方为视角
    pub fn minimax(
        &self,
        game: &mut Game,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        NODE_COUNT.fetch_add(1, Ordering::Relaxed);

        if game.is_game_over() {
            return if game.winner() == Some(self.color) {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
        }
        if depth == 0 {
            return game.evaluate(self.color);
        }

        let moves = game.legal_moves();
        if moves.is_empty() {
            // 困毙按输棋处理
            return if maximizing {
                -NO_MOVES_SCORE
            } else {
                NO_MOVES_SCORE
            };
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                let undo = game.make_move(mv);
                let score = self.minimax(game, depth - 1, alpha, beta, false);
                game.undo_move(undo);

                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                let undo = game.make_move(mv);
                let score = self.minimax(game, depth - 1, alpha, beta, true);
                game.undo_move(undo);

                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
