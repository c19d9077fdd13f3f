//! Integration tests for the game state transitions

use tetra_turns::core::{
    level_for_score, line_clear_points, GameState, Grid, RandomSource, SequenceRng, SimpleRng,
    Tetromino, SHAPES,
};
use tetra_turns::types::{Color, GameAction, Rotation, GRID_SIZE};

const N: i8 = GRID_SIZE as i8;

fn i_piece_at(x: i8, y: i8) -> Tetromino {
    Tetromino::from_coords([(x, y), (x + 1, y), (x + 2, y), (x + 3, y)], Color::Cyan)
}

fn assert_in_bounds(state: &GameState) {
    if let Some(piece) = state.current_piece() {
        for (x, y) in piece.coords() {
            assert!((0..N).contains(&x), "block x={x} outside the field");
            assert!(y < N, "block y={y} below the field");
            assert!(
                !state.grid().is_occupied(x, y),
                "block ({x}, {y}) overlaps a settled cell"
            );
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut rng = SequenceRng::new(vec![2, 4]);
    let state = GameState::new();
    assert!(state.current_piece().is_none());

    let state = state.gravity_tick(&mut rng);
    let piece = state.current_piece().expect("spawned");
    assert_eq!(piece.color(), Color::ALL[4]);
    assert_eq!(*piece, Tetromino::spawn(&SHAPES[2], Color::ALL[4]));

    let state = state.apply_action(GameAction::MoveLeft);
    let state = state.apply_action(GameAction::SoftDrop);
    let moved = state.current_piece().unwrap();
    assert_eq!(moved.coords(), piece.translated(-1, 1).coords());
}

#[test]
fn test_bounds_invariant_over_a_long_random_game() {
    let mut spawn_rng = SimpleRng::new(7);
    let mut input_rng = SimpleRng::new(99);
    let mut state = GameState::new();

    for step in 0..5_000u32 {
        state = match input_rng.next_below(10) {
            0..=5 => state.apply_action(GameAction::ALL[input_rng.next_below(4) as usize]),
            6 => state.rotation_tick(),
            _ => state.gravity_tick(&mut spawn_rng),
        };
        assert_in_bounds(&state);
        if state.game_over() {
            assert!(step > 0);
            state = state.reset();
        }
    }
}

#[test]
fn test_no_mutation_while_paused_or_over() {
    let piece = i_piece_at(3, 4);
    let paused = GameState::new().with_piece(piece).toggle_pause();
    let over = GameState::with_grid(Grid::new().with_full_rows(&[0], Color::Red))
        .gravity_tick(&mut SequenceRng::new(vec![0]));
    assert!(over.game_over());

    for state in [paused, over] {
        assert_eq!(state.try_move(-1, 0), state);
        assert_eq!(state.try_move(1, 0), state);
        assert_eq!(state.try_move(0, 1), state);
        assert_eq!(state.rotate_piece(), state);
        assert_eq!(state.gravity_tick(&mut SequenceRng::new(vec![1])), state);
        assert_eq!(state.rotation_tick(), state);
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::RotatePiece,
        ] {
            assert_eq!(state.apply_action(action), state);
        }
    }
}

#[test]
fn test_spawn_and_lock_are_gated() {
    // I piece spawns across x = 4..=7; (7, 0) blocks it.
    let grid = Grid::new().with_cell(7, 0, Some(Color::Red));
    let over = GameState::with_grid(grid).spawn_piece(&mut SequenceRng::new(vec![0, 0]));
    assert!(over.game_over());
    assert_eq!(over.spawn_piece(&mut SequenceRng::new(vec![1, 0])), over);
    assert_eq!(over.lock_piece(), over);

    let paused = GameState::new().with_piece(i_piece_at(3, 9)).toggle_pause();
    assert_eq!(paused.lock_piece(), paused);
    assert_eq!(paused.spawn_piece(&mut SequenceRng::new(vec![1, 0])), paused);

    // An active piece is never replaced.
    let active = GameState::new().with_piece(i_piece_at(3, 4));
    assert_eq!(active.spawn_piece(&mut SequenceRng::new(vec![1, 0])), active);
}

#[test]
fn test_moves_are_rejected_exactly_at_the_boundary() {
    // Column 2 filled from row 5 down; the piece sits right of it.
    let mut grid = Grid::new();
    for y in 5..N {
        grid.set(2, y, Some(Color::Green));
    }
    let piece = Tetromino::from_coords([(3, 5), (3, 6), (3, 7), (3, 8)], Color::Red);
    let state = GameState::with_grid(grid).with_piece(piece);

    assert_eq!(state.try_move(-1, 0), state);
    let right = state.try_move(1, 0);
    assert_eq!(
        right.current_piece().unwrap().coords(),
        [(4, 5), (4, 6), (4, 7), (4, 8)]
    );

    let down = state.try_move(0, 1);
    assert_eq!(down.current_piece().unwrap().coords()[3], (3, 9));
    assert_eq!(down.try_move(0, 1), down);
}

#[test]
fn test_lock_clears_lines_and_scores() {
    // Row 9 missing x = 6..=9; an I piece fills the gap.
    let mut grid = Grid::new().with_full_rows(&[9], Color::Blue);
    for x in 6..N {
        grid.set(x, 9, None);
    }
    let state = GameState::with_grid(grid).with_piece(i_piece_at(6, 9));

    let locked = state.gravity_tick(&mut SequenceRng::new(vec![0]));
    assert!(locked.current_piece().is_none());
    assert_eq!(locked.grid().occupied_count(), 0);
    assert_eq!(locked.score(), 100);
    let event = locked.last_lock().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.points, 100);
}

#[test]
fn test_scoring_formula() {
    assert_eq!(line_clear_points(0), 0);
    assert_eq!(line_clear_points(1), 100);
    assert_eq!(line_clear_points(2), 300);
    assert_eq!(line_clear_points(3), 675);
    assert_eq!(line_clear_points(4), 1350);
}

#[test]
fn test_double_clear_scores_three_hundred() {
    let mut grid = Grid::new().with_full_rows(&[8, 9], Color::Yellow);
    grid.set(0, 8, None);
    grid.set(0, 9, None);
    let vertical = Tetromino::from_coords([(0, 6), (0, 7), (0, 8), (0, 9)], Color::Red);

    let locked = GameState::with_grid(grid)
        .with_piece(vertical)
        .lock_piece();
    assert_eq!(locked.score(), 300);
    // The two blocks above the cleared rows drop to the bottom.
    assert!(locked.grid().is_occupied(0, 8));
    assert!(locked.grid().is_occupied(0, 9));
    assert_eq!(locked.grid().occupied_count(), 2);
}

#[test]
fn test_spawn_collision_ends_the_game() {
    let grid = Grid::new()
        .with_cell(4, 0, Some(Color::Orange))
        .with_cell(5, 0, Some(Color::Orange));

    for shape in 0..SHAPES.len() as u32 {
        let state = GameState::with_grid(grid.clone());
        let over = state.spawn_piece(&mut SequenceRng::new(vec![shape, 0]));
        assert!(over.game_over(), "shape {shape} should not fit");
        assert!(over.current_piece().is_none());
        assert_eq!(over.grid(), &grid);
    }
}

#[test]
fn test_level_progression() {
    assert_eq!(level_for_score(0), 1);
    assert_eq!(level_for_score(999), 1);
    assert_eq!(level_for_score(1000), 2);
    assert_eq!(level_for_score(2531), 3);

    let mut last = 1;
    for score in (0..20_000).step_by(37) {
        let level = level_for_score(score);
        assert!(level >= last);
        last = level;
    }
}

#[test]
fn test_level_follows_score_on_lock() {
    let mut grid = Grid::new().with_full_rows(&[9], Color::Blue);
    for x in 6..N {
        grid.set(x, 9, None);
    }
    let state = GameState::with_grid(grid)
        .with_score(950)
        .with_piece(i_piece_at(6, 9));
    assert_eq!(state.level(), 1);

    let locked = state.lock_piece();
    assert_eq!(locked.score(), 1050);
    assert_eq!(locked.level(), 2);
    assert!(locked.gravity_interval() < state.gravity_interval());
}

#[test]
fn test_rotate_piece_advances_cosmetic_rotation() {
    let state = GameState::new().with_piece(Tetromino::from_coords(
        [(3, 5), (4, 5), (5, 5), (4, 4)],
        Color::Magenta,
    ));
    let turned = state.apply_action(GameAction::RotatePiece);
    assert_eq!(turned.current_piece().unwrap().rotation, Rotation::Deg90);
}

#[test]
fn test_grid_rotation_carries_the_piece() {
    let state = GameState::with_grid(Grid::new().with_cell(0, 9, Some(Color::Red)))
        .with_piece(i_piece_at(2, 3));
    let turned = state.rotation_tick();

    assert_eq!(turned.grid_rotations(), 1);
    assert!(turned.grid().is_occupied(0, 0));
    let piece = turned.current_piece().unwrap();
    assert_eq!(piece.coords(), [(6, 2), (6, 3), (6, 4), (6, 5)]);
    assert_eq!(piece.rotation, Rotation::Deg90);
}

#[test]
fn test_four_grid_rotations_restore_the_board() {
    let grid = Grid::new()
        .with_cell(1, 9, Some(Color::Red))
        .with_cell(2, 9, Some(Color::Green))
        .with_cell(9, 4, Some(Color::Blue));
    let mut state = GameState::with_grid(grid.clone());
    for _ in 0..4 {
        state = state.rotation_tick();
    }
    assert_eq!(state.grid(), &grid);
    assert_eq!(state.grid_rotations(), 4);
}

#[test]
fn test_reset_restores_a_fresh_game() {
    let state = GameState::with_grid(Grid::new().with_full_rows(&[9], Color::Red))
        .with_score(4200)
        .with_piece(i_piece_at(0, 0))
        .toggle_pause();
    assert_eq!(state.apply_action(GameAction::Reset), GameState::new());
    assert!(!state.apply_action(GameAction::TogglePause).paused());
}
