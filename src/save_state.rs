use serde::{Deserialize, Serialize};
use std::fs;

use macroquad::math::vec2;

use crate::actor::{Actor, ActorKind};
use crate::grid::Grid;
use crate::world::{GamePhase, World};

/// Debug snapshot of a running world: grid obstacles, actor kinematics and
/// the game phase, dumped to JSON for offline inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveState {
    pub grid_cols: i32,
    pub grid_rows: i32,
    /// Obstacle cells stored as cell ids
    pub obstacle_cells: Vec<i32>,
    pub phase: String,
    pub actors: Vec<ActorSaveData>,
}

/// Minimal actor data for saving/loading
#[derive(Debug, Serialize, Deserialize)]
pub struct ActorSaveData {
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub speed_cap: f32,
}

fn kind_name(kind: ActorKind) -> &'static str {
    match kind {
        ActorKind::Player => "player",
        ActorKind::Hostile => "hostile",
        ActorKind::Exit => "exit",
    }
}

fn kind_from_name(name: &str) -> Result<ActorKind, String> {
    match name {
        "player" => Ok(ActorKind::Player),
        "hostile" => Ok(ActorKind::Hostile),
        "exit" => Ok(ActorKind::Exit),
        other => Err(format!("unknown actor kind '{}'", other)),
    }
}

fn phase_name(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Playing => "playing",
        GamePhase::Winning => "winning",
        GamePhase::Losing => "losing",
    }
}

impl SaveState {
    /// Capture the current world
    pub fn from_world(world: &World) -> Self {
        let actors = world
            .actors
            .iter()
            .map(|actor| ActorSaveData {
                kind: kind_name(actor.kind).to_string(),
                x: actor.position.x,
                y: actor.position.y,
                vx: actor.velocity.x,
                vy: actor.velocity.y,
                speed_cap: actor.speed_cap,
            })
            .collect();

        SaveState {
            grid_cols: world.grid.cols,
            grid_rows: world.grid.rows,
            obstacle_cells: world.grid.obstacle_cells(),
            phase: phase_name(world.phase).to_string(),
            actors,
        }
    }

    /// Save to file
    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize save state: {}", e))?;

        fs::write(path, json).map_err(|e| format!("Failed to write save file: {}", e))?;

        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let json =
            fs::read_to_string(path).map_err(|e| format!("Failed to read save file: {}", e))?;

        let save_state: SaveState =
            serde_json::from_str(&json).map_err(|e| format!("Failed to parse save file: {}", e))?;

        Ok(save_state)
    }

    /// Restore the obstacle grid (decorative tiles are recomputed)
    pub fn restore_grid(&self) -> Grid {
        Grid::from_obstacle_cells(self.grid_cols, self.grid_rows, &self.obstacle_cells)
    }

    /// Restore the actor list with captured positions and velocities
    pub fn restore_actors(&self) -> Result<Vec<Actor>, String> {
        self.actors
            .iter()
            .map(|data| {
                let kind = kind_from_name(&data.kind)?;
                let mut actor = Actor::new(kind, vec2(data.x, data.y), data.speed_cap);
                actor.velocity = vec2(data.vx, data.vy);
                Ok(actor)
            })
            .collect()
    }
}
