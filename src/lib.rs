pub mod actor;
pub mod camera;
pub mod collision;
pub mod config;
pub mod grid;
pub mod save_state;
pub mod tiles;
pub mod world;

pub use actor::{Actor, ActorKind};
pub use camera::Camera;
pub use collision::resolve_movement;
pub use config::Config;
pub use grid::{Cell, Grid, Spawn, SpawnKind};
pub use world::{ActorId, GamePhase, World};
