//! JSON shape of published snapshots (the snapshot log format)

use serde_json::{json, Value};
use tetra_turns::core::{GameSnapshot, GameState, Grid, Tetromino};
use tetra_turns::types::Color;

fn to_value(snap: &GameSnapshot) -> Value {
    serde_json::to_value(snap).expect("snapshot serializes")
}

#[test]
fn snapshot_has_stable_top_level_keys() {
    let v = to_value(&GameState::new().snapshot());
    let obj = v.as_object().expect("object");
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "active",
            "game_over",
            "grid",
            "grid_rotations",
            "last_lock",
            "level",
            "paused",
            "score"
        ]
    );
    assert_eq!(v["active"], Value::Null);
    assert_eq!(v["level"], 1);
}

#[test]
fn grid_is_rows_of_color_names() {
    let grid = Grid::new().with_cell(3, 9, Some(Color::Orange));
    let v = to_value(&GameState::with_grid(grid).snapshot());

    let rows = v["grid"].as_array().expect("rows");
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|r| r.as_array().map(Vec::len) == Some(10)));
    assert_eq!(rows[9][3], "orange");
    assert_eq!(rows[0][0], Value::Null);
}

#[test]
fn active_piece_reports_blocks_color_and_degrees() {
    let piece = Tetromino::from_coords([(4, -1), (4, 0), (5, 0), (6, 0)], Color::Blue);
    let v = to_value(&GameState::new().with_piece(piece).snapshot());
    assert_eq!(
        v["active"],
        json!({
            "blocks": [[4, -1], [4, 0], [5, 0], [6, 0]],
            "color": "blue",
            "rotation": 0
        })
    );
}

#[test]
fn lock_event_is_reported_after_a_clear() {
    let mut grid = Grid::new().with_full_rows(&[9], Color::Red);
    grid.set(0, 9, None);
    let piece = Tetromino::from_coords([(0, 6), (0, 7), (0, 8), (0, 9)], Color::Green);
    let v = to_value(&GameState::with_grid(grid).with_piece(piece).lock_piece().snapshot());
    assert_eq!(v["last_lock"], json!({ "lines_cleared": 1, "points": 100 }));
    assert_eq!(v["score"], 100);
}
