//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as an argument
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use state::{GameConfig, GameState, Obstacle, Player, SessionPhase};
pub use tick::{
    TickInput, advance_obstacles, autopilot, find_collision, maybe_spawn, move_player, reset,
    score_tick, toggle_pause,
};
