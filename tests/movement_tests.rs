mod common;

use common::{any_actor_inside_wall, grid_from_map, world_from_map};
use dungeonrun::resolve_movement;
use macroquad::math::{vec2, Rect, Vec2};

const DT: f32 = 1.0 / 60.0;

fn body_shape() -> Rect {
    Rect::new(8.0, 48.0, 48.0, 16.0)
}

#[test]
fn no_penetration_while_pushing_into_walls() {
    // Closed room; hold every direction in turn and keep the footprint out
    // of the walls on every single frame
    let text = "WWWWWW\nW.P..W\nW....W\nW....W\nWWWWWW";
    let directions = [
        vec2(1.0, 0.0),
        vec2(-1.0, 0.0),
        vec2(0.0, 1.0),
        vec2(0.0, -1.0),
    ];

    for direction in directions {
        let mut world = world_from_map(text);
        for _ in 0..180 {
            world.set_player_movement(direction);
            world.update(DT);
            assert!(
                !any_actor_inside_wall(&world),
                "player footprint entered a wall while moving {:?}",
                direction
            );
        }
    }
}

#[test]
fn pushing_right_pins_on_the_wall_edge() {
    let text = "WWWWWW\nW.P..W\nW....W\nW....W\nWWWWWW";
    let mut world = world_from_map(text);

    for _ in 0..180 {
        world.set_player_movement(vec2(1.0, 0.0));
        world.update(DT);
    }

    // Right wall column starts at x = 320; the shape's right edge
    // (position + 8 + 48) rests exactly on it
    let player = world.player();
    assert_eq!(player.position.x, 320.0 - 56.0);
    assert_eq!(player.position.y, 64.0);
}

#[test]
fn axis_independence_against_vertical_wall() {
    // Wall directly right of the mover: X halts, Y drift continues untouched
    let grid = grid_from_map("...W\n...W\n...W");
    let position = vec2(130.0, 70.0);
    let resolved = resolve_movement(
        &grid,
        64.0,
        body_shape(),
        position,
        vec2(400.0, 50.0),
        0.1,
    );

    // Expanded left edge of the col-3 wall: 192 - (8 + 48) = 136
    assert_eq!(resolved.x, 136.0);
    assert_eq!(resolved.y, 70.0 + 50.0 * 0.1);
}

#[test]
fn axis_independence_against_horizontal_wall() {
    // Mirror case: floor strip above a wall row, horizontal motion unaffected
    let grid = grid_from_map("....\nWWWW");
    let position = vec2(70.0, -10.0);
    let resolved = resolve_movement(
        &grid,
        64.0,
        body_shape(),
        position,
        vec2(50.0, 400.0),
        0.1,
    );

    // Expanded top edge of the wall row: 64 - 64 = 0
    assert_eq!(resolved.y, 0.0);
    assert_eq!(resolved.x, 70.0 + 50.0 * 0.1);
}

#[test]
fn diagonal_push_pins_in_concave_corner() {
    let text = "WWWWW\nWP..W\nW...W\nW...W\nWWWWW";
    let mut world = world_from_map(text);
    let diagonal = vec2(1.0, 1.0).normalize();

    for _ in 0..240 {
        world.set_player_movement(diagonal);
        world.update(DT);
        assert!(!any_actor_inside_wall(&world));
    }

    // Pinned against both walls of the bottom-right corner: right wall
    // column at x = 256, bottom wall row at y = 256
    let player = world.player();
    assert_eq!(player.position.x, 256.0 - 56.0);
    assert_eq!(player.position.y, 256.0 - 64.0);
}

#[test]
fn diagonal_approach_to_one_cell_gap_never_overlaps() {
    // Single-cell-wide gap in a vertical wall, approached diagonally with
    // held input: the mover may funnel through or stop, but its footprint
    // must never end a frame inside either wall segment
    let text = "WWWWWW\nWP.W.W\nW....W\nW..W.W\nWWWWWW";
    let mut world = world_from_map(text);
    let diagonal = vec2(1.0, 1.0).normalize();

    for _ in 0..300 {
        world.set_player_movement(diagonal);
        world.update(DT);
        assert!(!any_actor_inside_wall(&world));
    }
}

#[test]
fn resolver_is_idempotent_at_rest() {
    let text = "WWWWWW\nW.P..W\nW....W\nW....W\nWWWWWW";
    let mut world = world_from_map(text);

    // Settle against the right wall, then release input; the flat
    // deceleration stops the actor in one frame
    for _ in 0..180 {
        world.set_player_movement(vec2(1.0, 0.0));
        world.update(DT);
    }
    world.set_player_movement(Vec2::ZERO);
    world.update(DT);

    let rest = world.player().position;
    world.update(DT);
    world.update(DT);
    assert_eq!(world.player().position, rest);
}

#[test]
fn wall_clamp_scenario_through_map_parsing() {
    // Cell size 64, shape (8, 48) + (48, 16), single wall cell at grid
    // (0, 1), mover at (70, 70) heading left at 100 units/s for 0.1s
    let grid = grid_from_map("..\nW.");
    let resolved = resolve_movement(
        &grid,
        64.0,
        body_shape(),
        vec2(70.0, 70.0),
        vec2(-100.0, 0.0),
        0.1,
    );

    // The shape's left edge may never cross the wall's right edge
    assert!(resolved.x + 8.0 >= 64.0);
    assert_eq!(resolved, vec2(60.0, 70.0));

    // Three times the speed crosses the edge and clamps exactly onto it
    let clamped = resolve_movement(
        &grid,
        64.0,
        body_shape(),
        vec2(70.0, 70.0),
        vec2(-300.0, 0.0),
        0.1,
    );
    assert_eq!(clamped.x + 8.0, 64.0);
}
