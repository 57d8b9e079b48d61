//! Engine Benchmarks
//!
//! 走法生成、静态评估和固定深度搜索的性能测试

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xiangqi_engine::{AIConfig, Color, Game, MinimaxAI};

fn bench_generate_moves(c: &mut Criterion) {
    let game = Game::new();

    c.bench_function("generate_moves_start", |b| {
        b.iter(|| black_box(game.generate_moves(Color::Red)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let game = Game::new();

    c.bench_function("evaluate_start", |b| {
        b.iter(|| black_box(game.evaluate(Color::Red)))
    });
}

fn bench_search_depth_2(c: &mut Criterion) {
    let config = AIConfig {
        depth: 2,
        shuffle: false,
        ..Default::default()
    };

    c.bench_function("select_move_depth_2", |b| {
        let mut game = Game::new();
        let mut ai = MinimaxAI::new(Color::Red, &config);
        b.iter(|| black_box(ai.select_move(&mut game)))
    });
}

criterion_group!(benches, bench_generate_moves, bench_evaluate, bench_search_depth_2);
criterion_main!(benches);
