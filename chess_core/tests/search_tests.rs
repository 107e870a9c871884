#[cfg(test)]
mod tests {
    use chess_core::engine::config::EngineConfig;
    use chess_core::engine::search::MiniMax;
    use chess_core::engine::Searcher;
    use chess_core::logic::board::Board;
    use chess_core::logic::coordinate::Coordinate;
    use chess_core::logic::layouts::Layout;
    use chess_core::logic::piece::{Alliance, PieceType};
    use chess_core::logic::rules::{game_status, notation_with_status, GameStatus};
    use std::sync::Arc;

    fn engine(config: EngineConfig) -> MiniMax {
        MiniMax::new(Arc::new(config))
    }

    fn at(square: &str) -> Coordinate {
        Coordinate::from_algebraic(square).unwrap()
    }

    #[test]
    fn test_mate_in_one_with_queen() {
        // Qg7 is mate, the king on f6 guards the queen.
        let board = Board::from_fen("6k1/Q7/5K2/8/8/8/8/8 w - -").unwrap();
        let outcome = engine(EngineConfig::default()).search(&board, 1, 0).unwrap();
        let next = outcome.best_move.apply(&board);
        assert_eq!(game_status(&next), GameStatus::Checkmate(Alliance::White));
        assert!(notation_with_status(&outcome.best_move, &next).ends_with('#'));
    }

    #[test]
    fn test_engine_prefers_promotion_to_queen() {
        let board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - -").unwrap();
        let outcome = engine(EngineConfig::default()).search(&board, 1, 0).unwrap();
        assert_eq!(outcome.best_move.destination, at("a8"));
        assert_eq!(outcome.best_move.upgrade(), Some(PieceType::Queen));
    }

    #[test]
    fn test_repeated_search_is_identical() {
        let board = Layout::Random(5).build();
        let config = EngineConfig {
            search_depth: 2,
            quiescence: 1,
            ..EngineConfig::default()
        };
        let mut first = engine(config.clone());
        let mut second = engine(config);
        let a = first.search(&board, 2, 1).unwrap();
        let b = second.search(&board, 2, 1).unwrap();
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(first.execute(&board), Some(a.best_move));
    }

    #[test]
    fn test_all_toggles_agree() {
        let board = Board::from_fen("r3k3/1pp5/2n5/3q4/3P4/5N2/PP6/4K2R w - -").unwrap();
        let base = engine(EngineConfig::default()).search(&board, 2, 1).unwrap();
        for config in [
            EngineConfig {
                use_alpha_beta: false,
                ..EngineConfig::default()
            },
            EngineConfig {
                parallel_root: true,
                ..EngineConfig::default()
            },
            EngineConfig {
                parallel_root: true,
                use_alpha_beta: false,
                ..EngineConfig::default()
            },
        ] {
            let other = engine(config).search(&board, 2, 1).unwrap();
            assert_eq!(base.best_move, other.best_move);
            assert_eq!(base.score, other.score);
        }
    }

    #[test]
    fn test_execute_plays_until_game_over() {
        let mut board = Board::from_fen("7k/8/8/8/8/8/1R6/KR6 w - -").unwrap();
        let mut searcher = engine(EngineConfig {
            search_depth: 2,
            quiescence: 0,
            ..EngineConfig::default()
        });
        for _ in 0..12 {
            if game_status(&board).is_over() {
                break;
            }
            let mv = searcher.execute(&board).unwrap();
            board = board.current_player().make_move(&mv).into_board().unwrap();
        }
        assert_eq!(game_status(&board), GameStatus::Checkmate(Alliance::White));
        assert!(searcher.execute(&board).is_none());
        assert!(searcher.last_stats().nodes > 0);
    }

    #[test]
    fn test_stats_report_depth() {
        let board = Board::standard();
        let mut searcher = engine(EngineConfig::default());
        let outcome = searcher.search(&board, 2, 0).unwrap();
        assert_eq!(outcome.stats.depth, 2);
        assert!(outcome.stats.nodes > 20);
        assert_eq!(searcher.last_stats(), outcome.stats);
    }
}
