//! Lane Dodger - a canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, score)
//! - `driver`: Frame chain scheduling (start/stop/step)
//! - `game`: Loop controller tying simulation, driver and rendering together
//! - `renderer`: 2D drawing surface abstraction
//! - `persistence`: Key/value storage (LocalStorage on web)

pub mod audio;
pub mod best_score;
pub mod driver;
pub mod game;
pub mod headless;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use game::{Game, GameEvent};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Player car footprint (collision box)
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Horizontal player speed (pixels per frame)
    pub const PLAYER_SPEED: f32 = 7.0;
    /// Distance from the canvas bottom to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 120.0;

    /// Obstacle car footprint (collision box)
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 100.0;
    /// Downward obstacle speed (pixels per frame)
    pub const OBSTACLE_SPEED: f32 = 5.0;
    /// Spawn height, one car length above the visible area
    pub const OBSTACLE_SPAWN_Y: f32 = -100.0;

    /// Milliseconds between obstacle spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Milliseconds between score ticks
    pub const SCORE_INTERVAL_MS: f64 = 1000.0;
    /// Nominal display frame period used by the headless host
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Car artwork is authored sideways and twice as wide as the hitbox
    pub const SPRITE_WIDTH_SCALE: f32 = 2.0;
    /// Sprite rotations (radians)
    pub const PLAYER_SPRITE_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;
    pub const OBSTACLE_SPRITE_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

    /// How long the game-over banner stays up (ms)
    pub const GAME_OVER_BANNER_MS: i32 = 1500;
}
