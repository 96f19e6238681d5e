use macroquad::math::{vec2, Vec2};

use crate::actor::{Actor, ActorKind};
use crate::camera::Camera;
use crate::collision::resolve_movement;
use crate::config::Config;
use crate::grid::{Grid, Spawn, SpawnKind};

/// Coarse whole-game state. `Winning` and `Losing` are terminal: once left,
/// `Playing` is never re-entered and every actor freezes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Winning,
    Losing,
}

/// Stable handle to an actor in the world's list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorId(pub usize);

/// The frame driver: owns the grid, the actors and the camera, and runs the
/// fixed per-frame sequence (triggers -> AI -> integrate/resolve -> animation
/// -> camera follow).
pub struct World {
    pub grid: Grid,
    pub cell_size: f32,
    pub actors: Vec<Actor>,
    /// Explicit player handle - never "whatever spawned first in the list"
    pub player: ActorId,
    pub camera: Camera,
    pub phase: GamePhase,
    anim_timer: f32,
    kill_radius: f32,
    win_radius: f32,
    activation_radius: f32,
    animation_period: f32,
    scale_deceleration_by_dt: bool,
}

impl World {
    /// Parse map text and assemble a ready-to-run world.
    ///
    /// A map without a player spawn is a load-time error.
    pub fn from_map_text(text: &str, config: &Config) -> Result<World, Box<dyn std::error::Error>> {
        let (grid, spawns) = Grid::from_map_text(text)?;
        World::new(grid, &spawns, config)
    }

    pub fn new(
        grid: Grid,
        spawns: &[Spawn],
        config: &Config,
    ) -> Result<World, Box<dyn std::error::Error>> {
        let cell_size = config.grid.cell_size;

        let mut actors = Vec::new();
        let mut player = None;
        for spawn in spawns {
            let position = vec2(
                spawn.column as f32 * cell_size,
                spawn.row as f32 * cell_size,
            );
            let (kind, speed_cap) = match spawn.kind {
                SpawnKind::Player => (ActorKind::Player, config.actors.player_speed),
                SpawnKind::Hostile => (ActorKind::Hostile, config.actors.hostile_speed),
                SpawnKind::Exit => (ActorKind::Exit, 0.0),
            };
            if kind == ActorKind::Player && player.is_none() {
                player = Some(ActorId(actors.len()));
            }
            actors.push(Actor::new(kind, position, speed_cap));
        }

        let player = player.ok_or("map contains no player spawn 'P'")?;

        let camera = Camera::new(
            vec2(config.visual.view_width, config.visual.view_height),
            config.visual.camera_margin,
        );

        Ok(World {
            grid,
            cell_size,
            actors,
            player,
            camera,
            phase: GamePhase::Playing,
            anim_timer: 0.0,
            kill_radius: config.rules.kill_radius,
            win_radius: config.rules.win_radius,
            activation_radius: config.rules.activation_radius,
            animation_period: config.rules.animation_period,
            scale_deceleration_by_dt: config.physics.scale_deceleration_by_dt,
        })
    }

    pub fn player(&self) -> &Actor {
        &self.actors[self.player.0]
    }

    /// Map extent in world units
    pub fn map_size(&self) -> Vec2 {
        vec2(
            self.grid.cols as f32 * self.cell_size,
            self.grid.rows as f32 * self.cell_size,
        )
    }

    /// Set the player's movement intent for the upcoming frame. Callers pass
    /// a unit-length or zero vector; diagonals must already be normalized.
    pub fn set_player_movement(&mut self, movement: Vec2) {
        self.actors[self.player.0].movement = movement;
    }

    /// Advance the simulation by one frame. `dt` is the externally supplied
    /// elapsed time in seconds and must be non-negative.
    pub fn update(&mut self, dt: f32) {
        self.update_triggers();
        self.update_ai();

        // Terminal phases freeze every actor, every frame
        if self.phase != GamePhase::Playing {
            for actor in &mut self.actors {
                actor.movement = Vec2::ZERO;
                actor.velocity = Vec2::ZERO;
            }
        }

        // Integrate then resolve, one actor at a time, in spawn order.
        // Actors collide only with the static grid, so iteration order does
        // not affect the outcome.
        let grid = &self.grid;
        for actor in &mut self.actors {
            actor.integrate(dt, self.scale_deceleration_by_dt);
            actor.position = resolve_movement(
                grid,
                self.cell_size,
                actor.shape,
                actor.position,
                actor.velocity,
                dt,
            );
        }

        self.advance_animation(dt);

        let target = self.player().center();
        let map_size = self.map_size();
        self.camera.follow(target, map_size);
    }

    /// Proximity triggers: hostiles end the run, the exit wins it.
    /// Checked before anything moves this frame.
    fn update_triggers(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let player_center = self.player().center();
        for (index, actor) in self.actors.iter().enumerate() {
            if index == self.player.0 {
                continue;
            }
            let distance = actor.center().distance(player_center);
            match actor.kind {
                ActorKind::Hostile if distance <= self.kill_radius => {
                    self.phase = GamePhase::Losing;
                    println!("Caught by a hostile - game over");
                    return;
                }
                ActorKind::Exit if distance <= self.win_radius => {
                    self.phase = GamePhase::Winning;
                    println!("Reached the exit - you win");
                    return;
                }
                _ => {}
            }
        }
    }

    /// Seek AI: aggressive actors head straight for the player while inside
    /// the activation radius, and stand still outside it.
    fn update_ai(&mut self) {
        let player_center = self.player().center();
        let player_index = self.player.0;

        for (index, actor) in self.actors.iter_mut().enumerate() {
            if index == player_index || !actor.aggressive {
                continue;
            }

            let delta = player_center - actor.center();
            let distance = delta.length();
            if distance > 0.0 && distance <= self.activation_radius {
                // Normalized so diagonal pursuit honors the speed cap
                actor.movement = delta / distance;
            } else {
                actor.movement = Vec2::ZERO;
            }
        }
    }

    /// Shared animation clock: every period crossing advances every actor's
    /// frame cursor by one step.
    fn advance_animation(&mut self, dt: f32) {
        self.anim_timer += dt;
        if self.anim_timer >= self.animation_period {
            self.anim_timer -= self.animation_period;
            for actor in &mut self.actors {
                actor.advance_frame();
            }
        }
    }
}
