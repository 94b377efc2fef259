//! Headless host with a simulated clock
//!
//! Plays the role of the browser: fires requested frames at a fixed display
//! rate and runs the score timer, both on simulated time. Used by the native
//! binary and by tests that need whole-session behavior.

use crate::consts::FRAME_MS;
use crate::driver::{IntervalTimer, ManualScheduler};
use crate::game::{Game, GameEvent};
use crate::renderer::NullSurface;
use crate::sim::{GameConfig, GameState, TickInput};

pub struct HeadlessHost {
    pub game: Game<ManualScheduler>,
    /// Keys held for upcoming frames
    pub input: TickInput,
    now_ms: f64,
    frame_period_ms: f64,
    next_frame_ms: f64,
    score_timer: IntervalTimer,
    surface: NullSurface,
    events: Vec<GameEvent>,
}

impl HeadlessHost {
    /// Start a session at simulated time zero
    pub fn new(config: GameConfig, seed: u64, best_score: u64) -> Self {
        let score_timer = IntervalTimer::new(config.score_interval_ms, 0.0);
        let state = GameState::new(config, seed, best_score, 0.0);
        let mut game = Game::new(state, ManualScheduler::new());
        game.start();
        let events = game.drain_events();

        Self {
            game,
            input: TickInput::default(),
            now_ms: 0.0,
            frame_period_ms: FRAME_MS,
            next_frame_ms: FRAME_MS,
            score_timer,
            surface: NullSurface,
            events,
        }
    }

    /// Simulated time (ms)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Run every frame and timer firing due within the next `ms`
    pub fn advance(&mut self, ms: f64) {
        let target = self.now_ms + ms;

        loop {
            let frame_at = self.next_frame_ms;
            let score_at = self.score_timer.next_due();
            let t = frame_at.min(score_at);
            if t > target {
                break;
            }
            self.now_ms = t;

            if score_at <= frame_at {
                for _ in 0..self.score_timer.poll(t) {
                    self.game.score_tick();
                }
            } else {
                // The display keeps refreshing even when nobody asked for a frame
                self.next_frame_ms += self.frame_period_ms;
                if self.game.driver_mut().scheduler_mut().fire_next().is_some() {
                    self.game.frame(t, &self.input, &mut self.surface);
                }
            }

            self.events.extend(self.game.drain_events());
        }

        self.now_ms = target;
    }

    /// Events observed since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
