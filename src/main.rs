//! Xiangqi engine CLI
//!
//! 命令行界面，用于测试引擎和 AI
//!
//! 支持三种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. 对弈模式：终端里人机对弈
//! 3. Server 模式：长驻进程，通过 stdin/stdout 以 JSON 行通信

use std::io::{self, BufRead, Write};
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use xiangqi_engine::{
    get_node_count, reset_node_count, AIConfig, Color, Game, MinimaxAI, Move, DEFAULT_DEPTH,
    START_FEN,
};

#[derive(Parser)]
#[command(name = "xiangqi-engine")]
#[command(about = "Xiangqi rules engine and minimax AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取当前行棋方的所有走法
    Moves {
        /// FEN 字符串
        #[arg(long, default_value = START_FEN)]
        fen: String,
    },

    /// 选择最佳走法
    Best {
        /// FEN 字符串
        #[arg(long, default_value = START_FEN)]
        fen: String,

        /// 搜索深度
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 不打乱走法顺序
        #[arg(long)]
        no_shuffle: bool,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数（行棋方视角）
    Score {
        /// FEN 字符串
        #[arg(long, default_value = START_FEN)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 人机对弈
    Play {
        /// 人类执子 (red, black)
        #[arg(long, default_value = "red")]
        human: String,

        /// 起始局面
        #[arg(long, default_value = START_FEN)]
        fen: String,

        /// 搜索深度
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// AI 开始思考前的等待时间（毫秒）
        #[arg(long, default_value_t = 10)]
        think_ms: u64,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct BestResponse {
    #[serde(rename = "move")]
    mv: Option<String>,
    score: Option<i32>,
    depth: u32,
    nodes: u64,
    elapsed_ms: f64,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: Option<String>,
    #[serde(default, rename = "move")]
    mv: Option<String>,
    #[serde(default)]
    depth: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Serialize, Deserialize)]
struct StateInfo {
    fen: String,
    turn: String,
    game_over: bool,
    winner: Option<String>,
    last_move: Option<String>,
    history_len: usize,
}

impl StateInfo {
    fn from_game(game: &Game) -> Self {
        StateInfo {
            fen: game.to_fen(),
            turn: game.turn().name().to_string(),
            game_over: game.is_game_over(),
            winner: game.winner().map(|c| c.name().to_string()),
            last_move: game.last_move().map(|m| m.to_fen_str()),
            history_len: game.history_len(),
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none", rename = "move")]
    mv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<StateInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn state(game: &Game) -> Self {
        Self {
            ok: true,
            state: Some(StateInfo::from_game(game)),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error: failed to serialize response: {}", e),
    }
}

fn exit_with(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen } => match Game::from_fen(&fen) {
            Ok(game) => {
                let moves = game.legal_moves();
                println!("Legal moves for {} ({}):", game.turn(), moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
            Err(e) => exit_with(&e),
        },

        Commands::Best {
            fen,
            depth,
            seed,
            no_shuffle,
            json,
        } => {
            let mut game = match Game::from_fen(&fen) {
                Ok(g) => g,
                Err(e) => exit_with(&e),
            };
            let config = AIConfig {
                depth,
                seed,
                shuffle: !no_shuffle,
                ..Default::default()
            };
            let mut ai = MinimaxAI::new(game.turn(), &config);

            reset_node_count();
            let start = Instant::now();
            let best = ai.select_move_scored(&mut game);
            let elapsed = start.elapsed().as_secs_f64();
            let nodes = get_node_count();

            if json {
                let response = BestResponse {
                    mv: best.map(|b| b.mv.to_fen_str()),
                    score: best.map(|b| b.score),
                    depth: ai.depth(),
                    nodes,
                    elapsed_ms: elapsed * 1000.0,
                };
                print_json(&response, true);
            } else {
                match best {
                    Some(b) => println!("Best move for {}: {} (score: {})", game.turn(), b.mv, b.score),
                    None => println!("No legal moves for {}", game.turn()),
                }
                println!(
                    "\nStats: depth={}, nodes={}, time={:.3}s",
                    ai.depth(),
                    nodes,
                    elapsed
                );
            }
        }

        Commands::Score { fen, json } => match Game::from_fen(&fen) {
            Ok(game) => {
                let color = game.turn();
                let score = game.evaluate(color);
                if json {
                    println!(
                        "{{\"fen\": {:?}, \"color\": {:?}, \"score\": {}}}",
                        fen,
                        color.name(),
                        score
                    );
                } else {
                    println!("Evaluation ({} to move): {}", color, score);
                }
            }
            Err(e) => exit_with(&e),
        },

        Commands::Play {
            human,
            fen,
            depth,
            seed,
            think_ms,
        } => {
            let human = match Color::from_name(&human) {
                Ok(c) => c,
                Err(e) => exit_with(&e),
            };
            let game = match Game::from_fen(&fen) {
                Ok(g) => g,
                Err(e) => exit_with(&e),
            };
            let config = AIConfig {
                depth,
                seed,
                think_delay_ms: think_ms,
                ..Default::default()
            };
            if let Err(e) = run_play(game, human, &config) {
                exit_with(&e.to_string());
            }
        }

        Commands::Server => {
            run_server();
        }
    }
}

/// 终端对弈主循环
fn run_play(mut game: Game, human: Color, config: &AIConfig) -> io::Result<()> {
    let mut ai = MinimaxAI::new(human.opposite(), config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        println!("\n{}", game.board());
        if let Some(mv) = game.last_move() {
            println!("Last move: {}", mv);
        }

        if let Some(winner) = game.winner() {
            println!("Game over: {} wins", winner);
            return Ok(());
        }
        if game.legal_moves().is_empty() {
            println!("{} has no legal moves, {} wins", game.turn(), game.turn().opposite());
            return Ok(());
        }

        if game.turn() == human {
            print!("{} to move (e.g. b7e7, 'quit' to exit): ", human);
            stdout.flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(()),
            };
            let input = line.trim();
            if input == "quit" {
                return Ok(());
            }
            match Move::from_fen_str(input) {
                Some(mv) if game.attempt_move(mv) => {}
                Some(mv) => println!("Illegal move: {}", mv),
                None => println!("Cannot parse move: {}", input),
            }
        } else {
            println!("{} is thinking...", ai.color());
            let delay = ai.think_delay();
            match ai.select_move_after(&mut game, delay) {
                Some(mv) => {
                    game.attempt_move(mv);
                    println!("{} plays {}", ai.color(), mv);
                }
                None => {
                    println!("{} has no move", ai.color());
                    return Ok(());
                }
            }
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut game = Game::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                print_json(&ServerResponse::error(&format!("Invalid JSON: {}", e)), false);
                let _ = stdout.flush();
                continue;
            }
        };

        let response = match request.cmd.as_str() {
            "new" => handle_new_request(&mut game, &request),
            "move" => handle_move_request(&mut game, &request),
            "ai" => handle_ai_request(&mut game, &request, true),
            "best" => handle_ai_request(&mut game, &request, false),
            "moves" => ServerResponse {
                legal_moves: Some(game.legal_moves().iter().map(|m| m.to_fen_str()).collect()),
                ..ServerResponse::state(&game)
            },
            "eval" => ServerResponse {
                eval: Some(game.evaluate(game.turn())),
                ..ServerResponse::state(&game)
            },
            "state" => ServerResponse::state(&game),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        print_json(&response, false);
        let _ = stdout.flush();
    }
}

/// 处理 new 命令
fn handle_new_request(game: &mut Game, request: &ServerRequest) -> ServerResponse {
    match request.fen.as_deref() {
        Some(fen) => match Game::from_fen(fen) {
            Ok(g) => *game = g,
            Err(e) => return ServerResponse::error(&format!("Invalid FEN: {}", e)),
        },
        None => *game = Game::new(),
    }
    ServerResponse::state(game)
}

/// 处理 move 命令
fn handle_move_request(game: &mut Game, request: &ServerRequest) -> ServerResponse {
    let mv = match request.mv.as_deref().and_then(Move::from_fen_str) {
        Some(mv) => mv,
        None => return ServerResponse::error("Missing or invalid 'move'"),
    };
    if !game.attempt_move(mv) {
        return ServerResponse {
            error: Some(format!("Illegal move: {}", mv)),
            ok: false,
            ..ServerResponse::state(game)
        };
    }
    ServerResponse {
        mv: Some(mv.to_fen_str()),
        ..ServerResponse::state(game)
    }
}

/// 处理 ai / best 命令，apply 为 true 时执行选出的走法
fn handle_ai_request(game: &mut Game, request: &ServerRequest, apply: bool) -> ServerResponse {
    let config = AIConfig {
        depth: request.depth.unwrap_or(DEFAULT_DEPTH),
        seed: request.seed,
        ..Default::default()
    };
    let mut ai = MinimaxAI::new(game.turn(), &config);

    reset_node_count();
    let best = match ai.select_move_scored(game) {
        Some(b) => b,
        None => return ServerResponse::error("No legal moves"),
    };
    if apply && !game.attempt_move(best.mv) {
        return ServerResponse::error(&format!("AI produced illegal move: {}", best.mv));
    }

    ServerResponse {
        mv: Some(best.mv.to_fen_str()),
        score: Some(best.score),
        nodes: Some(get_node_count()),
        ..ServerResponse::state(game)
    }
}
