use chess_core::logic::board::Board;
use chess_core::logic::coordinate::Coordinate;
use chess_core::logic::layouts::Layout;
use chess_core::logic::moves::{Move, MoveFactory, MoveKind};
use chess_core::logic::piece::{Alliance, PieceType};
use chess_core::logic::player::MoveStatus;
use chess_core::logic::rules::{attempt_move, game_status, GameStatus};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn at(square: &str) -> Coordinate {
    Coordinate::from_algebraic(square).unwrap()
}

fn xy(square: &str) -> (i32, i32) {
    at(square).into()
}

fn play(board: &Board, from: &str, to: &str) -> Board {
    let transition = attempt_move(board, xy(from), xy(to), None).unwrap();
    assert_eq!(transition.status, MoveStatus::Done, "{from}-{to} on {board}");
    transition.into_board().unwrap()
}

/// Plays seeded random legal moves, handing every visited board to `check`.
fn random_walk(start: Board, seed: u64, plies: usize, mut check: impl FnMut(&Board)) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = start;
    for _ in 0..plies {
        check(&board);
        let Some(mv) = board.current_player().legal_moves().choose(&mut rng).copied() else {
            break;
        };
        board = board
            .current_player()
            .make_move(&mv)
            .into_board()
            .unwrap();
    }
    check(&board);
}

fn layouts() -> Vec<Layout> {
    vec![
        Layout::Standard,
        Layout::Random(3),
        Layout::Random(11),
        Layout::Horde,
        Layout::LightBrigade,
    ]
}

#[test]
fn test_pseudo_legal_destinations_are_on_board_and_not_friendly() {
    for (seed, layout) in layouts().into_iter().enumerate() {
        random_walk(layout.build(), seed as u64, 60, |board| {
            for alliance in [Alliance::White, Alliance::Black] {
                for mv in board.pseudo_legal_moves(alliance) {
                    let (file, rank): (i32, i32) = mv.destination.into();
                    assert!((0..8).contains(&file) && (0..8).contains(&rank));
                    let occupant = board.piece_at(mv.destination);
                    assert!(
                        occupant.map_or(true, |p| p.alliance != alliance),
                        "{mv} lands on a friendly piece"
                    );
                }
            }
        });
    }
}

#[test]
fn test_legal_moves_never_leave_king_in_check() {
    for seed in 0..4 {
        random_walk(Board::standard(), seed, 50, |board| {
            let mover = board.next_move_maker();
            for mv in board.current_player().legal_moves() {
                let next = mv.apply(board);
                assert!(
                    !next.player(mover).is_in_check(),
                    "{mv} leaves the {mover} king in check"
                );
            }
        });
    }
}

#[test]
fn test_checkmate_and_stalemate_are_exclusive() {
    let check_statuses = |board: &Board| {
        let player = board.current_player();
        assert!(!(player.is_in_checkmate() && player.is_in_stalemate()));
        if player.is_in_checkmate() || player.is_in_stalemate() {
            assert!(player.legal_moves().is_empty());
        }
    };
    for seed in 0..4 {
        random_walk(Layout::LightBrigade.build(), seed, 80, check_statuses);
    }
    for fen in [
        "8/8/8/8/8/4k3/4q3/4K3 w - -",
        "k7/2Q5/1K6/8/8/8/8/8 b - -",
    ] {
        check_statuses(&Board::from_fen(fen).unwrap());
    }
}

#[test]
fn test_opening_has_twenty_moves() {
    let board = Board::standard();
    let moves = board.current_player().legal_moves();
    assert_eq!(moves.len(), 20);
    let pawn_moves = moves.iter().filter(|m| m.piece.is_pawn()).count();
    let knight_moves = moves
        .iter()
        .filter(|m| m.piece.piece_type == PieceType::Knight)
        .count();
    assert_eq!(pawn_moves, 16);
    assert_eq!(knight_moves, 4);
}

#[test]
fn test_adjacent_protected_queen_mates() {
    // The e2 queen checks the e1 king and is guarded by the e3 king.
    let board = Board::from_fen("8/8/8/8/8/4k3/4q3/4K3 w - -").unwrap();
    let player = board.current_player();
    assert!(player.is_in_check());
    assert!(player.is_in_checkmate());
    assert!(!player.is_in_stalemate());
    assert_eq!(game_status(&board), GameStatus::Checkmate(Alliance::Black));
}

#[test]
fn test_lone_king_stalemate() {
    let board = Board::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - -").unwrap();
    let player = board.current_player();
    assert!(!player.is_in_check());
    assert!(player.is_in_stalemate());
    assert!(!player.is_in_checkmate());
    assert_eq!(game_status(&board), GameStatus::Stalemate);
}

#[test]
fn test_en_passant_after_double_push() {
    let board = Board::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - -").unwrap();
    let after_jump = play(&board, "d7", "d5");
    assert_eq!(after_jump.en_passant_pawn().map(|p| p.coordinate), Some(at("d5")));

    let pawn = after_jump.piece_at(at("e5")).unwrap();
    let pawn_moves = after_jump.current_player().legal_moves_for_piece(pawn);
    let en_passant: Vec<&Move> = pawn_moves
        .iter()
        .filter(|m| m.kind == MoveKind::EnPassant)
        .collect();
    assert_eq!(en_passant.len(), 1);
    assert_eq!(en_passant[0].destination, at("d6"));

    let captured = play(&after_jump, "e5", "d6");
    assert!(captured.piece_at(at("d5")).is_none());
    assert_eq!(captured.black_pieces().len(), 1);
}

#[test]
fn test_en_passant_expires_after_another_move() {
    let board = Board::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - -").unwrap();
    let after_jump = play(&board, "d7", "d5");
    let waited = play(&after_jump, "e1", "e2");
    assert!(waited.en_passant_pawn().is_none());
    let back = play(&waited, "e8", "e7");
    assert!(back.en_passant_pawn().is_none());

    let pawn = back.piece_at(at("e5")).unwrap();
    assert!(back
        .current_player()
        .legal_moves_for_piece(pawn)
        .iter()
        .all(|m| m.kind != MoveKind::EnPassant));
    let transition = attempt_move(&back, xy("e5"), xy("d6"), None).unwrap();
    assert_eq!(transition.status, MoveStatus::IllegalMove);
}

#[test]
fn test_promotion_offers_four_pieces() {
    let board = Board::from_fen("7k/2P5/8/8/8/8/8/4K3 w - -").unwrap();
    let pawn = board.piece_at(at("c7")).unwrap();
    let moves = board.current_player().legal_moves_for_piece(pawn);
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|m| m.destination == at("c8")));
    let upgrades: Vec<PieceType> = moves.iter().filter_map(Move::upgrade).collect();
    assert_eq!(upgrades, PieceType::PROMOTIONS.to_vec());

    let default = MoveFactory::create_move(&board, at("c7"), at("c8")).unwrap();
    assert_eq!(default.upgrade(), Some(PieceType::Queen));
}

#[test]
fn test_promotion_only_on_final_rank() {
    for seed in 0..3 {
        random_walk(Board::standard(), seed, 60, |board| {
            for alliance in [Alliance::White, Alliance::Black] {
                for mv in board.pseudo_legal_moves(alliance) {
                    let reaches_end =
                        mv.piece.is_pawn() && alliance.is_pawn_promotion_rank(mv.destination);
                    assert_eq!(mv.is_promotion(), reaches_end, "{mv}");
                }
            }
        });
    }
}

#[test]
fn test_position_equality_for_repetition() {
    let start = Board::standard();
    let mut board = start.clone();
    for (from, to) in [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")] {
        board = play(&board, from, to);
    }
    assert_eq!(board, start);
    assert_ne!(play(&board, "g1", "f3"), start);
}
