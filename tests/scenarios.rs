use xiangqi_engine::test_positions;
use xiangqi_engine::{AIConfig, Color, Game, MinimaxAI, Move, Piece, PieceType, Position, WIN_SCORE};

fn all_squares() -> impl Iterator<Item = Position> {
    (0..10).flat_map(|y| (0..9).map(move |x| Position::new(x, y)))
}

#[test]
fn start_position_layout() {
    let game = Game::new();
    assert_eq!(game.turn(), Color::Red);
    assert_eq!(game.board().count(Color::Red), 16);
    assert_eq!(game.board().count(Color::Black), 16);

    let kinds = [
        (PieceType::General, 1),
        (PieceType::Advisor, 2),
        (PieceType::Elephant, 2),
        (PieceType::Horse, 2),
        (PieceType::Rook, 2),
        (PieceType::Cannon, 2),
        (PieceType::Soldier, 5),
    ];
    for color in [Color::Red, Color::Black] {
        for (kind, expected) in kinds {
            let n = game
                .board()
                .pieces()
                .filter(|(_, p)| *p == Piece::new(kind, color))
                .count();
            assert_eq!(n, expected, "{} {}", color, kind);
        }
    }
}

#[test]
fn every_attempt_from_start_is_applied_or_ignored() {
    let start = Game::new();
    let mut applied = 0;

    for from in all_squares() {
        for to in all_squares() {
            let mut game = start.clone();
            let mv = Move { from, to };
            let piece = game.piece_at(from);

            if game.attempt_move(mv) {
                applied += 1;
                assert_eq!(game.piece_at(to), piece);
                assert_eq!(game.piece_at(from), None);
                assert_eq!(game.turn(), Color::Black);
                assert_eq!(game.last_move(), Some(mv));
                assert_eq!(game.history_len(), 1);
            } else {
                assert_eq!(game, start, "rejected {} changed the game", mv);
            }
        }
    }

    assert_eq!(applied, start.legal_moves().len());
    assert_eq!(applied, 44);
}

#[test]
fn cannon_captures_over_exactly_one_screen() {
    let capture = Move::new(1, 7, 1, 0);

    let mut game = Game::new();
    let snapshot = game.clone();
    assert!(game.attempt_move(capture));
    assert_eq!(
        game.piece_at(Position::new(1, 0)),
        Some(Piece::new(PieceType::Cannon, Color::Red))
    );
    assert_eq!(game.board().count(Color::Black), 15);

    // 回到吃子前：原局面仍可吃
    let mut replay = snapshot.clone();
    assert!(replay.board().is_legal_move(capture.from, capture.to));

    // 去掉炮架
    let mut game = Game::from_fen(test_positions::CANNON_NO_SCREEN).unwrap();
    let before = game.clone();
    assert!(!game.attempt_move(capture));
    assert_eq!(game, before);

    // 两个炮架
    let mut game = Game::from_fen(test_positions::CANNON_TWO_SCREENS).unwrap();
    let before = game.clone();
    assert!(!game.attempt_move(capture));
    assert_eq!(game, before);

    assert!(replay.attempt_move(capture));
}

#[test]
fn black_takes_the_exposed_general() {
    for depth in 1..=2 {
        let mut game = Game::from_fen(test_positions::GENERAL_EXPOSED).unwrap();
        let config = AIConfig {
            depth,
            seed: Some(7),
            ..Default::default()
        };
        let mut ai = MinimaxAI::new(Color::Black, &config);

        let best = ai.select_move_scored(&mut game).unwrap();
        assert_eq!(best.mv, Move::new(4, 5, 4, 9));
        assert!(best.score >= WIN_SCORE);

        assert!(game.attempt_move(best.mv));
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::Black));

        let finished = game.clone();
        assert!(!game.attempt_move(Move::new(0, 9, 0, 0)));
        assert!(!game.attempt_move(Move::new(4, 0, 4, 1)));
        assert_eq!(game, finished);
    }
}

#[test]
fn ai_versus_ai_plays_only_legal_moves() {
    let mut game = Game::new();
    let config = AIConfig {
        depth: 1,
        seed: Some(2024),
        ..Default::default()
    };
    let mut red = MinimaxAI::new(Color::Red, &config);
    let mut black = MinimaxAI::new(Color::Black, &config);

    for ply in 0..20 {
        if game.is_game_over() {
            break;
        }
        let ai = if game.turn() == Color::Red {
            &mut red
        } else {
            &mut black
        };
        let before = game.clone();
        let mv = match ai.select_move(&mut game) {
            Some(mv) => mv,
            None => break,
        };
        assert_eq!(game, before, "search changed the game at ply {}", ply);
        assert!(game.attempt_move(mv), "ply {}: {} rejected", ply, mv);
    }

    assert!(game.history_len() > 0);
    assert_eq!(game.history().last().copied(), game.last_move());
}
