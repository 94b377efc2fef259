//! Loop controller
//!
//! `Game` owns the session state and the frame driver. Host callbacks (frame,
//! score timer, pause key) call into it; it never calls back out. Anything
//! the presentation layer cares about is queued as a `GameEvent` and drained
//! after each callback.

use crate::driver::{FrameDriver, FrameScheduler};
use crate::renderer::{self, Surface};
use crate::sim::{self, GameState, SessionPhase, TickInput};

/// Notifications for the presentation layer (audio, overlay, storage)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Session began
    Started,
    /// Frame chain halted by the player
    Paused,
    /// Frame chain restarted by the player
    Resumed,
    /// Player hit an obstacle with this score
    Crashed { score: u64 },
    /// Fresh round started after a crash
    Reset,
    /// Score beat the stored best
    NewBest { best: u64 },
}

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Paused; nothing ran and no frame was requested
    Skipped,
    /// Simulation advanced and the next frame was requested
    Advanced { spawned: bool },
    /// Collision; the round was reset
    Crashed { score: u64 },
}

pub struct Game<S: FrameScheduler> {
    pub state: GameState,
    driver: FrameDriver<S>,
    events: Vec<GameEvent>,
    autopilot: bool,
}

impl<S: FrameScheduler> Game<S> {
    pub fn new(state: GameState, scheduler: S) -> Self {
        Self {
            state,
            driver: FrameDriver::new(scheduler),
            events: Vec::new(),
            autopilot: false,
        }
    }

    /// Kick off the frame chain
    pub fn start(&mut self) {
        log::info!(
            "Starting session (seed {}, best {})",
            self.state.seed,
            self.state.best_score
        );
        self.events.push(GameEvent::Started);
        self.driver.start();
    }

    /// Run one frame. Called by the host when a requested frame fires.
    pub fn frame(
        &mut self,
        now_ms: f64,
        input: &TickInput,
        surface: &mut impl Surface,
    ) -> FrameOutcome {
        self.driver.begin_frame();
        if self.state.phase != SessionPhase::Running {
            return FrameOutcome::Skipped;
        }

        surface.clear();

        let input = if self.autopilot {
            sim::autopilot(&self.state)
        } else {
            *input
        };
        sim::move_player(&mut self.state, &input);

        renderer::draw_player(surface, &self.state.player);
        renderer::draw_obstacles(surface, &self.state.obstacles);

        sim::advance_obstacles(&mut self.state);

        if sim::find_collision(&self.state).is_some() {
            let score = self.state.score;
            self.crash();
            // Spawning still runs on the fresh board
            sim::maybe_spawn(&mut self.state, now_ms);
            return FrameOutcome::Crashed { score };
        }

        let spawned = sim::maybe_spawn(&mut self.state, now_ms);

        self.driver.start();
        FrameOutcome::Advanced { spawned }
    }

    /// One score period elapsed (independent of frames)
    pub fn score_tick(&mut self) {
        if let Some(best) = sim::score_tick(&mut self.state) {
            self.events.push(GameEvent::NewBest { best });
        }
    }

    /// Pause key or resume button
    pub fn toggle_pause(&mut self) -> SessionPhase {
        let phase = sim::toggle_pause(&mut self.state);
        match phase {
            SessionPhase::Paused => {
                self.driver.stop();
                self.events.push(GameEvent::Paused);
                log::info!("Paused at score {}", self.state.score);
            }
            SessionPhase::Running => {
                self.events.push(GameEvent::Resumed);
                self.driver.start();
                log::info!("Resumed");
            }
            SessionPhase::Ended => {}
        }
        phase
    }

    /// Clear the board and restart the frame chain
    pub fn reset(&mut self) {
        sim::reset(&mut self.state);
        self.events.push(GameEvent::Reset);
        self.driver.start();
        log::info!("Round reset");
    }

    fn crash(&mut self) {
        self.driver.stop();
        self.state.phase = SessionPhase::Ended;
        self.events.push(GameEvent::Crashed {
            score: self.state.score,
        });
        log::info!(
            "Crashed with score {} (best {})",
            self.state.score,
            self.state.best_score
        );
        self.reset();
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    pub fn driver(&self) -> &FrameDriver<S> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut FrameDriver<S> {
        &mut self.driver
    }
}
