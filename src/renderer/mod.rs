//! 2D rendering
//!
//! The simulation never touches the canvas directly. The controller issues
//! sprite draws through the `Surface` trait; on the web that is a
//! `CanvasRenderingContext2d`, in tests it records the calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::consts::{OBSTACLE_SPRITE_ANGLE, PLAYER_SPRITE_ANGLE, SPRITE_WIDTH_SCALE};
use crate::sim::{Obstacle, Player, Rect};

/// Which artwork to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    PlayerCar,
    ObstacleCar,
}

/// A drawing target
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);

    /// Draw `sprite` stretched over `rect`, rotated by `angle` radians about
    /// the rect's center
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, angle: f32);
}

/// Screen rect for a car. The artwork is sideways, so it is drawn twice as
/// wide as the hitbox and then rotated.
pub fn sprite_rect(hitbox: Rect) -> Rect {
    Rect::new(
        hitbox.pos.x,
        hitbox.pos.y,
        hitbox.size.x * SPRITE_WIDTH_SCALE,
        hitbox.size.y,
    )
}

pub fn draw_player(surface: &mut impl Surface, player: &Player) {
    surface.draw_sprite(
        Sprite::PlayerCar,
        sprite_rect(player.rect()),
        PLAYER_SPRITE_ANGLE,
    );
}

pub fn draw_obstacles(surface: &mut impl Surface, obstacles: &[Obstacle]) {
    for obstacle in obstacles {
        surface.draw_sprite(
            Sprite::ObstacleCar,
            sprite_rect(obstacle.rect()),
            OBSTACLE_SPRITE_ANGLE,
        );
    }
}

/// Discards everything (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}

    fn draw_sprite(&mut self, _sprite: Sprite, _rect: Rect, _angle: f32) {}
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Sprite { sprite: Sprite, rect: Rect, angle: f32 },
}

/// Keeps every call for inspection
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls since the most recent clear (inclusive of the clear)
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .unwrap_or(0);
        &self.calls[start..]
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, angle: f32) {
        self.calls.push(DrawCall::Sprite {
            sprite,
            rect,
            angle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_sprite_rect_doubles_width() {
        let r = sprite_rect(Rect::new(10.0, 20.0, 50.0, 100.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 100.0, 100.0));
    }

    #[test]
    fn test_player_and_obstacles_rotate_opposite_ways() {
        let player = Player {
            pos: Vec2::new(100.0, 500.0),
            size: Vec2::new(50.0, 100.0),
            speed: 7.0,
        };
        let obstacles = vec![
            Obstacle {
                pos: Vec2::new(0.0, -100.0),
                size: Vec2::new(50.0, 100.0),
            },
            Obstacle {
                pos: Vec2::new(200.0, 50.0),
                size: Vec2::new(50.0, 100.0),
            },
        ];

        let mut surface = RecordingSurface::new();
        surface.clear();
        draw_player(&mut surface, &player);
        draw_obstacles(&mut surface, &obstacles);

        let frame = surface.last_frame();
        assert_eq!(frame.len(), 4);
        assert_eq!(frame[0], DrawCall::Clear);
        match &frame[1] {
            DrawCall::Sprite { sprite, angle, .. } => {
                assert_eq!(*sprite, Sprite::PlayerCar);
                assert_eq!(*angle, -std::f32::consts::FRAC_PI_2);
            }
            other => panic!("unexpected call {:?}", other),
        }
        for call in &frame[2..] {
            match call {
                DrawCall::Sprite { sprite, angle, .. } => {
                    assert_eq!(*sprite, Sprite::ObstacleCar);
                    assert_eq!(*angle, std::f32::consts::FRAC_PI_2);
                }
                other => panic!("unexpected call {:?}", other),
            }
        }
    }

    #[test]
    fn test_last_frame_starts_at_latest_clear() {
        let mut surface = RecordingSurface::new();
        surface.clear();
        surface.draw_sprite(Sprite::PlayerCar, Rect::new(0.0, 0.0, 1.0, 1.0), 0.0);
        surface.clear();
        assert_eq!(surface.last_frame(), &[DrawCall::Clear]);
    }
}
