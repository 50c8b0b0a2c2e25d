//! Fifteen puzzle behaviour through the public API.

use puzzle_demos::puzzle::{EMPTY, TARGET};
use puzzle_demos::{generate_solvable_grid, is_solvable, Move, Position, PuzzleError, PuzzleState};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn assert_valid_grid(state: &PuzzleState) {
    let cells = state.cells();
    assert_eq!(cells.iter().filter(|&&c| c == EMPTY).count(), 1);
    for tile in 1..=15u8 {
        assert_eq!(
            cells.iter().filter(|&&c| c == tile).count(),
            1,
            "tile {} should appear once",
            tile
        );
    }
    assert_eq!(state.tile_at(state.empty()), Some(EMPTY));
}

#[test]
fn test_solved_layout_scenario() {
    let mut state: PuzzleState = "13 14 15 _ 9 10 11 12 5 6 7 8 1 2 3 4".parse().unwrap();
    assert!(state.is_solved());
    assert_eq!(state.empty(), Position::new(3, 0));

    assert!(state.apply_move(Position::new(2, 0)));
    assert_eq!(
        state.cells(),
        &[13, 14, EMPTY, 15, 9, 10, 11, 12, 5, 6, 7, 8, 1, 2, 3, 4]
    );
    assert_eq!(state.empty(), Position::new(2, 0));
    assert!(!state.is_solved());
}

#[test]
fn test_corner_tiles_not_adjacent() {
    let state: PuzzleState = "1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,_".parse().unwrap();
    assert!(!state.is_adjacent(Position::new(0, 0)));
    assert!(state.is_adjacent(Position::new(2, 3)));
    assert!(state.is_adjacent(Position::new(3, 2)));
    assert!(!state.is_solved());
}

#[test]
fn test_non_adjacent_moves_are_noops() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut state = PuzzleState::shuffled(&mut rng);
    let before = state.clone();

    for index in 0..16 {
        let target = Position::from_index(index);
        if target.distance(state.empty()) != 1 {
            assert!(!state.apply_move(target));
            assert_eq!(state, before);
        }
    }
}

#[test]
fn test_every_generated_grid_is_valid_and_solvable() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
        let cells = generate_solvable_grid(&mut rng);
        assert!(is_solvable(&cells));
        let state = PuzzleState::from_cells(&cells).unwrap();
        assert_valid_grid(&state);
    }
}

#[test]
fn test_random_play_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut state = PuzzleState::shuffled(&mut rng);
    let dirs = [Move::Up, Move::Down, Move::Left, Move::Right];

    for _ in 0..300 {
        let dir = dirs[rng.gen_range(0..4)];
        let before = state.clone();
        match state.target_of(dir) {
            Some(target) => {
                assert!(state.apply_move(target));
                assert!(state.apply_move(before.empty()));
                assert_eq!(state.cells(), before.cells());
                assert!(state.apply_move(target));
            }
            None => assert_eq!(state, before),
        }
        assert_valid_grid(&state);
        assert!(state.is_solvable());
    }
}

#[test]
fn test_only_target_counts_as_solved() {
    let mut cells = TARGET;
    cells.swap(4, 5);
    let state = PuzzleState::from_cells(&cells).unwrap();
    assert!(!state.is_solved());
    assert!(!state.is_solvable());
}

#[test]
fn test_unsolvable_grid_text_is_refused() {
    let result = "14 13 15 _ 9 10 11 12 5 6 7 8 1 2 3 4"
        .parse::<PuzzleState>()
        .and_then(PuzzleState::require_solvable);
    assert_eq!(result, Err(PuzzleError::Unsolvable));

    let ok = "13 14 _ 15 9 10 11 12 5 6 7 8 1 2 3 4"
        .parse::<PuzzleState>()
        .and_then(PuzzleState::require_solvable)
        .unwrap();
    assert_eq!(ok.empty(), Position::new(2, 0));
}
