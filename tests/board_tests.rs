use rand::rngs::SmallRng;
use rand::SeedableRng;
use salvo::{
    AttackResult, Board, CellState, CellView, GameError, Orientation, PlacementError, TargetView,
    DEFAULT_FLEET, DEFAULT_GRID_SIZE,
};

#[test]
fn test_sink_single_ship() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    board.place_ship(0, 0, false, 3).unwrap();

    assert_eq!(board.attack(0, 0).unwrap(), AttackResult::Hit);
    assert_eq!(board.attack(0, 1).unwrap(), AttackResult::Hit);
    assert!(board.has_ships_remaining());
    assert_eq!(board.attack(0, 2).unwrap(), AttackResult::Hit);
    assert!(!board.has_ships_remaining());
    assert!(board.is_sunk_at(0, 1));
}

#[test]
fn test_placement_bounds() {
    let board = Board::new(DEFAULT_GRID_SIZE);
    assert!(!board.is_valid_placement(0, 5, false, 3));
    assert!(board.is_valid_placement(0, 4, false, 3));
    assert!(!board.is_valid_placement(5, 0, true, 3));
    assert!(board.is_valid_placement(4, 0, true, 3));
    assert!(!board.is_valid_placement(7, 0, false, 3));
    assert!(!board.is_valid_placement(0, 0, false, 0));
}

#[test]
fn test_repeat_attack_is_noop() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    board.place_ship(3, 3, true, 3).unwrap();

    for (r, c) in [(3, 3), (0, 0)] {
        let first = board.attack(r, c).unwrap();
        assert_ne!(first, AttackResult::AlreadyAttacked);
        let after_first = board.clone();
        assert_eq!(board.attack(r, c).unwrap(), AttackResult::AlreadyAttacked);
        assert_eq!(board, after_first);
    }
    assert_eq!(board.cell_state(3, 3), Some(CellState::Hit));
    assert_eq!(board.cell_state(0, 0), Some(CellState::Miss));
}

#[test]
fn test_place_rejects_overlap_and_out_of_bounds() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    assert_eq!(board.place_ship(2, 1, false, 4).unwrap(), 0);
    assert_eq!(
        board.place_ship(0, 2, true, 3).unwrap_err(),
        GameError::InvalidPlacement(PlacementError::Overlaps)
    );
    assert_eq!(
        board.place_ship(6, 6, false, 3).unwrap_err(),
        GameError::InvalidPlacement(PlacementError::OutOfBounds)
    );
    assert_eq!(board.ships().len(), 1);
    assert_eq!(board.remaining_ship_cells(), 4);
}

#[test]
fn test_placed_cells_match_request() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    let idx = board.place_ship(1, 4, true, 5).unwrap();
    let ship = &board.ships()[idx];
    assert_eq!(ship.cells(), &[(1, 4), (2, 4), (3, 4), (4, 4), (5, 4)]);
    assert_eq!(ship.orientation(), Orientation::Vertical);
    assert_eq!(ship.origin(), (1, 4));
    for (r, c) in board.coords() {
        let expected = if ship.contains(r, c) {
            CellState::ShipPresent
        } else {
            CellState::Water
        };
        assert_eq!(board.cell_state(r, c), Some(expected));
    }
}

#[test]
fn test_attack_freezes_fleet() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    board.place_ship(0, 0, false, 3).unwrap();
    assert!(!board.is_frozen());
    board.attack(6, 6).unwrap();
    assert!(board.is_frozen());
    assert!(!board.is_valid_placement(3, 0, false, 3));
    assert_eq!(
        board.place_ship(3, 0, false, 3).unwrap_err(),
        GameError::InvalidPlacement(PlacementError::BoardFrozen)
    );
}

#[test]
fn test_attack_out_of_bounds() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    assert_eq!(
        board.attack(7, 0).unwrap_err(),
        GameError::OutOfBounds { row: 7, col: 0 }
    );
    assert!(!board.is_frozen());
    assert_eq!(board.cell_state(0, 7), None);
}

#[test]
fn test_sunk_tracked_per_ship() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    board.place_ship(0, 0, false, 3).unwrap();
    board.place_ship(2, 0, false, 3).unwrap();
    for c in 0..3 {
        board.attack(0, c).unwrap();
    }
    assert!(board.is_sunk_at(0, 0));
    assert!(!board.is_sunk_at(2, 0));
    assert!(!board.is_sunk_at(5, 5));
    assert_eq!(board.ships_afloat(), 1);
    assert!(board.has_ships_remaining());
}

#[test]
fn test_target_view_hides_ships() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    board.place_ship(0, 0, false, 3).unwrap();
    board.attack(0, 0).unwrap();
    board.attack(1, 0).unwrap();
    assert_eq!(board.view(0, 0), Some(CellView::Hit));
    assert_eq!(board.view(1, 0), Some(CellView::Miss));
    assert_eq!(board.view(0, 1), Some(CellView::Unknown));
    assert_eq!(board.view(2, 2), Some(CellView::Unknown));
    assert_eq!(board.view(9, 9), None);
    assert!(board.is_open(0, 1));
    assert!(!board.is_open(0, 0));
}

#[test]
fn test_place_fleet_randomly_no_overlap() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    let mut rng = SmallRng::seed_from_u64(42);
    board.place_fleet_randomly(&mut rng, &DEFAULT_FLEET).unwrap();

    let expected: usize = DEFAULT_FLEET.iter().sum();
    assert_eq!(board.ships().len(), DEFAULT_FLEET.len());
    assert_eq!(
        board.remaining_ship_cells(),
        expected,
        "all ships should be placed without overlap"
    );
}

#[test]
fn test_random_placement_is_valid() {
    let mut board = Board::new(5);
    let mut rng = SmallRng::seed_from_u64(7);
    for length in [5, 4, 3] {
        let (r, c, vertical) = board.random_placement(&mut rng, length).unwrap();
        assert!(board.is_valid_placement(r, c, vertical, length));
        board.place_ship(r, c, vertical, length).unwrap();
    }
    assert_eq!(
        board.random_placement(&mut rng, 6).unwrap_err(),
        GameError::InvalidPlacement(PlacementError::InvalidLength)
    );
    assert_eq!(
        Board::new(3).random_placement(&mut rng, 4).unwrap_err(),
        GameError::InvalidPlacement(PlacementError::OutOfBounds)
    );
}

#[test]
fn test_ship_length_limits() {
    let mut board = Board::new(DEFAULT_GRID_SIZE);
    for length in [0, 1, 2, 6, 7] {
        assert!(!board.is_valid_placement(0, 0, false, length));
        assert_eq!(
            board.place_ship(0, 0, false, length),
            Err(GameError::InvalidPlacement(PlacementError::InvalidLength)),
            "length {}",
            length
        );
    }
    assert!(board.ships().is_empty());
    assert_eq!(board.remaining_ship_cells(), 0);
    for (row, length) in [(0, 3), (2, 5)] {
        board.place_ship(row, 0, false, length).unwrap();
    }
}

#[test]
fn test_tight_fleet_is_always_placed() {
    // 15 of 16 cells: greedy placement often paints itself into a corner
    let fleet = [3; 5];
    for seed in 0..200 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(4);
        board.place_fleet_randomly(&mut rng, &fleet).unwrap();
        assert_eq!(board.ships().len(), 5, "seed {}", seed);
        assert_eq!(board.remaining_ship_cells(), 15, "seed {}", seed);
    }
}

#[test]
fn test_failed_fleet_placement_leaves_board_unchanged() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut board = Board::new(5);
    board.place_ship(2, 0, false, 5).unwrap();
    let before = board.clone();
    // only four more fives fit beside the full row
    assert_eq!(
        board.place_fleet_randomly(&mut rng, &[5, 5, 5, 5, 5]),
        Err(GameError::InvalidPlacement(PlacementError::UnableToPlace))
    );
    assert_eq!(board, before);
}

#[test]
fn test_display_uses_cell_symbols() {
    let mut board = Board::new(3);
    board.place_ship(0, 0, false, 3).unwrap();
    board.attack(0, 1).unwrap();
    board.attack(2, 2).unwrap();
    assert_eq!(board.to_string(), "S X S\n~ ~ ~\n~ ~ O\n");
}
