use super::*;
use crate::movegen::legal_moves;

fn assert_round_trip(fen: &str) {
    let mut pos = Position::from_fen(fen).unwrap();
    let before = pos.clone();
    for mv in legal_moves(&pos) {
        let undo = pos.make_move(mv);
        pos.unmake_move(mv, undo);
        assert_eq!(pos, before, "make/unmake of {mv} did not restore {fen}");
    }
}

#[test]
fn test_make_unmake_restores_every_field() {
    assert_round_trip(START_FEN);
    // castling both ways, promotions with capture, en passant
    assert_round_trip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 3 17");
    assert_round_trip("r3k2r/1P6/8/8/8/8/6p1/R3K2R b KQkq - 0 40");
    assert_round_trip("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
}

#[test]
fn test_fen_round_trip() {
    for fen in [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
        "8/8/8/4k3/8/4K3/8/8 b - - 99 60",
    ] {
        assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
    }
    assert_eq!(Position::startpos().to_fen(), START_FEN);
}

#[test]
fn test_fen_drops_castling_rights_without_pieces_at_home() {
    // No rook on h1 or a8, black king off e8
    let pos = Position::from_fen("r3k3/8/8/8/8/8/8/R3K3 w KQkq - 0 1").unwrap();
    assert_eq!(
        pos.castling,
        CastlingRights {
            wk: false,
            wq: true,
            bk: false,
            bq: true,
        }
    );
    assert_eq!(pos.to_fen(), "r3k3/8/8/8/8/8/8/R3K3 w Qq - 0 1");

    let moved_king = Position::from_fen("r2k3r/8/8/8/8/8/8/4K3 b kq - 0 1").unwrap();
    assert_eq!(moved_king.castling, CastlingRights::none());
}

#[test]
fn test_fen_errors() {
    assert_eq!(
        Position::from_fen("8/8/8 w - -"),
        Err(FenError::RankCount(3))
    );
    assert_eq!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq"),
        Err(FenError::FieldCount(3))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4KX2 w - - 0 1"),
        Err(FenError::Piece('X'))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1"),
        Err(FenError::RankLength { rank: 1 })
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
        Err(FenError::SideToMove("x".to_string()))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
        Err(FenError::KingCount {
            color: "black",
            count: 0
        })
    );
}

#[test]
fn test_halfmove_clock_resets_on_pawn_move_and_capture() {
    let mut pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K2N w - - 7 30").unwrap();
    let knight = Move::new(7, 22); // h1g3
    pos.make_move(knight);
    assert_eq!(pos.halfmove_clock, 8);

    let mut pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K2N w - - 7 30").unwrap();
    pos.make_move(Move::new(28, 35)); // e4xd5
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.fullmove_number, 30);
    assert_eq!(pos.side_to_move, Color::Black);
}

#[test]
fn test_checkmate_and_stalemate() {
    // Scholar's mate, black to move
    let mate =
        Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    assert!(mate.is_checkmate());
    assert!(!mate.is_stalemate());
    assert_eq!(
        mate.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );

    let stalemate = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(stalemate.is_stalemate());
    assert!(!stalemate.is_checkmate());
    assert_eq!(stalemate.outcome(), Some(Outcome::Stalemate));

    assert!(!Position::startpos().is_game_over());
}

#[test]
fn test_insufficient_material() {
    let drawn = [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/6N1 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/5B2 w - - 0 1",
        // bishops on same colored squares
        "8/8/8/4kb2/8/4K3/8/5B2 w - - 0 1",
    ];
    for fen in drawn {
        let pos = Position::from_fen(fen).unwrap();
        assert!(pos.is_insufficient_material(), "{fen}");
        assert_eq!(pos.outcome(), Some(Outcome::InsufficientMaterial));
    }

    let playable = [
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        // bishops on opposite colored squares can still mate
        "8/8/8/4k1b1/8/4K3/8/5B2 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/5BN1 w - - 0 1",
    ];
    for fen in playable {
        let pos = Position::from_fen(fen).unwrap();
        assert!(!pos.is_insufficient_material(), "{fen}");
    }
}

#[test]
fn test_seventyfive_move_rule() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/4R3 w - - 150 90").unwrap();
    assert!(pos.is_seventyfive_moves());
    assert_eq!(pos.outcome(), Some(Outcome::SeventyFiveMoves));

    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/4R3 w - - 149 90").unwrap();
    assert!(!pos.is_game_over());
}

#[test]
fn test_piece_count() {
    assert_eq!(Position::startpos().piece_count(), 32);
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1").unwrap();
    assert_eq!(pos.piece_count(), 3);
}
