//! Game state and core simulation types
//!
//! One explicit session struct; callbacks take it by `&mut` instead of
//! sharing ambient globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Whether the simulation advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Frames advance, score ticks
    Running,
    /// Frame chain halted, score frozen
    Paused,
    /// Crashed; only observed between the collision and the reset
    Ended,
}

/// Playfield dimensions and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player_size: Vec2,
    pub player_speed: f32,
    pub player_bottom_offset: f32,
    pub obstacle_size: Vec2,
    pub obstacle_speed: f32,
    pub obstacle_spawn_y: f32,
    pub spawn_interval_ms: f64,
    pub score_interval_ms: f64,
}

impl GameConfig {
    /// Default tuning for a canvas of the given size
    pub fn for_canvas(width: f32, height: f32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_speed: PLAYER_SPEED,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            obstacle_size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_spawn_y: OBSTACLE_SPAWN_Y,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            score_interval_ms: SCORE_INTERVAL_MS,
        }
    }

    /// Rightmost x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        (self.canvas_width - self.player_size.x).max(0.0)
    }

    /// Rightmost x an obstacle may spawn at
    pub fn obstacle_max_x(&self) -> f32 {
        (self.canvas_width - self.obstacle_size.x).max(0.0)
    }

    /// Player start position: centered, fixed offset above the bottom
    pub fn player_home(&self) -> Vec2 {
        Vec2::new(
            self.canvas_width / 2.0 - self.player_size.x / 2.0,
            self.canvas_height - self.player_bottom_offset,
        )
    }
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame
    pub speed: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: config.player_home(),
            size: config.player_size,
            speed: config.player_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An oncoming car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Best score seen, persisted by the presentation layer
    pub best_score: u64,
    /// Timestamp (ms) of the last obstacle spawn
    pub last_spawn_ms: f64,
}

impl GameState {
    /// Create a running session. `now_ms` starts the spawn clock.
    pub fn new(config: GameConfig, seed: u64, best_score: u64, now_ms: f64) -> Self {
        Self {
            player: Player::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Running,
            obstacles: Vec::new(),
            score: 0,
            best_score,
            last_spawn_ms: now_ms,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }
}
