use serde::Deserialize;
use std::fs;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub actors: ActorsConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub default_map_file: DefaultMapFileConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActorsConfig {
    #[serde(default = "default_player_speed")]
    pub player_speed: f32,
    #[serde(default = "default_hostile_speed")]
    pub hostile_speed: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhysicsConfig {
    /// The reference integrator subtracts a flat deceleration step per frame,
    /// making stops frame-rate-dependent. Enable to scale the step by dt.
    #[serde(default)]
    pub scale_deceleration_by_dt: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_kill_radius")]
    pub kill_radius: f32,
    #[serde(default = "default_win_radius")]
    pub win_radius: f32,
    #[serde(default = "default_activation_radius")]
    pub activation_radius: f32,
    #[serde(default = "default_animation_period")]
    pub animation_period: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_view_width")]
    pub view_width: f32,
    #[serde(default = "default_view_height")]
    pub view_height: f32,
    #[serde(default = "default_camera_margin")]
    pub camera_margin: f32,
    #[serde(default)]
    pub debug_boxes: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultMapFileConfig {
    #[serde(default = "default_map_path")]
    pub path: String,
}

// Default values
fn default_cell_size() -> f32 { 64.0 }
fn default_player_speed() -> f32 { 300.0 }
fn default_hostile_speed() -> f32 { 220.0 }
fn default_kill_radius() -> f32 { 28.0 }
fn default_win_radius() -> f32 { 40.0 }
fn default_activation_radius() -> f32 { 320.0 }
fn default_animation_period() -> f32 { 0.25 }
fn default_window_title() -> String { "Dungeonrun".to_string() }
fn default_view_width() -> f32 { 1024.0 }
fn default_view_height() -> f32 { 768.0 }
fn default_camera_margin() -> f32 { 160.0 }
fn default_map_path() -> String { "maps/dungeon.txt".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
        }
    }
}

impl Default for ActorsConfig {
    fn default() -> Self {
        Self {
            player_speed: default_player_speed(),
            hostile_speed: default_hostile_speed(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            scale_deceleration_by_dt: false,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            kill_radius: default_kill_radius(),
            win_radius: default_win_radius(),
            activation_radius: default_activation_radius(),
            animation_period: default_animation_period(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            view_width: default_view_width(),
            view_height: default_view_height(),
            camera_margin: default_camera_margin(),
            debug_boxes: false,
        }
    }
}

impl Default for DefaultMapFileConfig {
    fn default() -> Self {
        Self {
            path: default_map_path(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from config.toml");
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Failed to parse config.toml: {}", e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }
}
