use arboard::Clipboard;
use macroquad::prelude::*;

use dungeonrun::actor::ActorKind;
use dungeonrun::config::Config;
use dungeonrun::grid::Grid;
use dungeonrun::save_state::SaveState;
use dungeonrun::tiles::TileIndex;
use dungeonrun::world::{GamePhase, World};

use std::fs;

/// Tile edge length inside the sprite sheet, in pixels
const SHEET_TILE_SIZE: f32 = 16.0;

const SAVE_STATE_PATH: &str = "save_state.json";

/// Built-in map used when the configured map file cannot be read
const DEFAULT_MAP: &str = "\
WWWWWWWWWWWWWWWW
W..............W
W.P..W.........W
W....W...WWW...W
W....W.....W...W
W..WWWWW...W...W
W..W...........W
W..W...WWWWW..HW
W......W...W...W
W..H...W.E.W...W
W..............W
WWWWWWWWWWWWWWWW
";

fn window_conf() -> Conf {
    Conf {
        window_title: "Dungeonrun".to_string(),
        window_width: 1024,
        window_height: 768,
        ..Default::default()
    }
}

/// Read held movement keys into a unit-length (or zero) intent vector.
/// Diagonals are normalized here so the integrator's per-axis clamp cannot
/// push diagonal speed past the cap.
fn read_movement() -> Vec2 {
    let mut movement = Vec2::ZERO;
    if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
        movement.x -= 1.0;
    }
    if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
        movement.x += 1.0;
    }
    if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
        movement.y -= 1.0;
    }
    if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
        movement.y += 1.0;
    }

    let length = movement.length();
    if length > 0.0 {
        movement /= length;
    }
    movement
}

/// Fallback palette when no tile sheet is shipped: one color per sheet row
fn tile_color(tile: TileIndex) -> Color {
    match tile.row {
        0 => Color::from_rgba(52, 48, 42, 255),    // floor
        1 => Color::from_rgba(110, 106, 98, 255),  // wall
        _ => Color::from_rgba(200, 180, 60, 255),  // actor frames
    }
}

/// Blit one tile, from the sheet when available, as a flat rectangle otherwise
fn draw_tile(sheet: Option<&Texture2D>, tile: TileIndex, dest: Vec2, size: f32) {
    match sheet {
        Some(texture) => {
            let (sx, sy) = tile.sheet_offset(SHEET_TILE_SIZE);
            draw_texture_ex(
                texture,
                dest.x,
                dest.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(size, size)),
                    source: Some(Rect::new(sx, sy, SHEET_TILE_SIZE, SHEET_TILE_SIZE)),
                    ..Default::default()
                },
            );
        }
        None => draw_rectangle(dest.x, dest.y, size, size, tile_color(tile)),
    }
}

fn draw_world(world: &World, config: &Config, sheet: Option<&Texture2D>) {
    clear_background(Color::from_rgba(20, 18, 16, 255));

    let cell_size = world.cell_size;
    let camera = &world.camera;

    // Only the cells intersecting the viewport
    let first_col = (camera.origin.x / cell_size).floor() as i32;
    let first_row = (camera.origin.y / cell_size).floor() as i32;
    let last_col = ((camera.origin.x + camera.view_size.x) / cell_size).ceil() as i32;
    let last_row = ((camera.origin.y + camera.view_size.y) / cell_size).ceil() as i32;

    for row in first_row..=last_row {
        for col in first_col..=last_col {
            if let Some(cell) = world.grid.cell(col, row) {
                let dest = camera.to_view(vec2(col as f32 * cell_size, row as f32 * cell_size));
                draw_tile(sheet, cell.tile, dest, cell_size);
            }
        }
    }

    for actor in &world.actors {
        let dest = camera.to_view(actor.position);
        draw_tile(sheet, actor.frame(), dest, cell_size);
    }

    // Collision footprints, debug only
    if config.visual.debug_boxes {
        for actor in &world.actors {
            let shape = actor.world_shape();
            let dest = camera.to_view(vec2(shape.x, shape.y));
            draw_rectangle_lines(dest.x, dest.y, shape.w, shape.h, 2.0, GREEN);
        }
    }

    match world.phase {
        GamePhase::Playing => {}
        GamePhase::Winning => {
            draw_rectangle(
                0.0,
                0.0,
                camera.view_size.x,
                camera.view_size.y,
                Color::new(0.2, 0.8, 0.3, 0.3),
            );
            draw_text("You escaped!", 420.0, 380.0, 48.0, WHITE);
        }
        GamePhase::Losing => {
            draw_rectangle(
                0.0,
                0.0,
                camera.view_size.x,
                camera.view_size.y,
                Color::new(0.8, 0.2, 0.2, 0.3),
            );
            draw_text("You died!", 440.0, 380.0, 48.0, WHITE);
        }
    }
}

/// Render the live world back into map text (walls from the grid, actor
/// markers at their current cells)
fn map_to_string(world: &World) -> String {
    let cell_size = world.cell_size;
    let mut result = String::new();

    for row in 0..world.grid.rows {
        for col in 0..world.grid.cols {
            let mut symbol = if world.grid.is_obstacle(col, row) {
                'W'
            } else {
                '.'
            };

            for actor in &world.actors {
                let actor_col = (actor.position.x / cell_size).floor() as i32;
                let actor_row = (actor.position.y / cell_size).floor() as i32;
                if (actor_col, actor_row) == (col, row) {
                    symbol = match actor.kind {
                        ActorKind::Player => 'P',
                        ActorKind::Hostile => 'H',
                        ActorKind::Exit => 'E',
                    };
                }
            }

            result.push(symbol);
        }
        result.push('\n');
    }

    result
}

fn copy_to_clipboard(world: &World) {
    let map_string = map_to_string(world);
    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(&map_string) {
                println!("Failed to copy to clipboard: {}", e);
            } else {
                println!("Map layout copied to clipboard!");
                // Keep clipboard alive for a moment so clipboard managers can capture it
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
        }
        Err(e) => {
            println!("Failed to access clipboard: {}", e);
        }
    }
}

/// Parse a map and report what it contains, without opening a window
fn check_map(path: &str) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read '{}': {}", path, e);
            return;
        }
    };

    match Grid::from_map_text(&text) {
        Ok((grid, spawns)) => {
            println!("Map '{}' is valid", path);
            println!("  {} columns x {} rows", grid.cols, grid.rows);
            println!("  {} obstacle cells", grid.obstacle_cells().len());
            println!("  {} spawns", spawns.len());
        }
        Err(e) => {
            eprintln!("Map '{}' is invalid: {}", path, e);
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 && args[1] == "--check" {
        check_map(&args[2]);
        return;
    }

    let config = Config::load();

    let map_text = match fs::read_to_string(&config.default_map_file.path) {
        Ok(text) => text,
        Err(_) => {
            println!(
                "Map file '{}' not found, using built-in map",
                config.default_map_file.path
            );
            DEFAULT_MAP.to_string()
        }
    };

    let mut world = match World::from_map_text(&map_text, &config) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Failed to load map: {}", e);
            return;
        }
    };

    let sheet = load_texture("dungeon_tiles.png").await.ok();
    if let Some(texture) = &sheet {
        texture.set_filter(FilterMode::Nearest);
    } else {
        println!("No dungeon_tiles.png found, drawing flat tiles");
    }

    loop {
        let dt = get_frame_time();

        world.set_player_movement(read_movement());
        world.update(dt);

        draw_world(&world, &config, sheet.as_ref());

        if is_key_pressed(KeyCode::F5) {
            match SaveState::from_world(&world).save_to_file(SAVE_STATE_PATH) {
                Ok(()) => println!("Saved state to {}", SAVE_STATE_PATH),
                Err(e) => eprintln!("{}", e),
            }
        }

        if is_key_pressed(KeyCode::C) {
            copy_to_clipboard(&world);
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        next_frame().await
    }
}
