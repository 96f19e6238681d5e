use dungeonrun::{Config, Grid, World};

/// Build a world from inline map text with the default configuration
pub fn world_from_map(text: &str) -> World {
    World::from_map_text(text, &Config::default()).expect("test map should parse")
}

/// Build just the grid from inline map text
pub fn grid_from_map(text: &str) -> Grid {
    let (grid, _) = Grid::from_map_text(text).expect("test map should parse");
    grid
}

/// Check whether any actor's solid footprint overlaps any obstacle cell.
/// Touching edges (shared boundary, zero-area intersection) does not count
/// as overlap.
pub fn any_actor_inside_wall(world: &World) -> bool {
    let cell = world.cell_size;
    for actor in &world.actors {
        let shape = actor.world_shape();
        for row in 0..world.grid.rows {
            for col in 0..world.grid.cols {
                if !world.grid.is_obstacle(col, row) {
                    continue;
                }
                let wall_x = col as f32 * cell;
                let wall_y = row as f32 * cell;
                let overlap_x = shape.x < wall_x + cell && shape.x + shape.w > wall_x;
                let overlap_y = shape.y < wall_y + cell && shape.y + shape.h > wall_y;
                if overlap_x && overlap_y {
                    return true;
                }
            }
        }
    }
    false
}
