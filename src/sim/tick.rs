//! Per-frame simulation steps
//!
//! The controller in `game` calls these in a fixed order each frame. Each
//! step is a plain function over `GameState` so it can be exercised alone.

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::state::{GameState, Obstacle, SessionPhase};

/// Input commands for a single frame (held keys)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Shift the player horizontally. Each direction is applied on its own and
/// only if the player stays within `[0, canvasWidth - playerWidth]`.
pub fn move_player(state: &mut GameState, input: &TickInput) {
    let max_x = state.config.player_max_x();
    let player = &mut state.player;
    let within = |x: f32| x >= 0.0 && x <= max_x;

    if input.left && within(player.pos.x - player.speed) {
        player.pos.x -= player.speed;
    }
    if input.right && within(player.pos.x + player.speed) {
        player.pos.x += player.speed;
    }
}

/// Move every obstacle down and drop the ones below the canvas.
/// Returns how many were removed.
pub fn advance_obstacles(state: &mut GameState) -> usize {
    let speed = state.config.obstacle_speed;
    let floor = state.config.canvas_height;

    for obstacle in &mut state.obstacles {
        obstacle.pos.y += speed;
    }

    let before = state.obstacles.len();
    state.obstacles.retain(|o| o.pos.y <= floor);
    before - state.obstacles.len()
}

/// Index of the first obstacle (spawn order) touching the player
pub fn find_collision(state: &GameState) -> Option<usize> {
    let player = state.player.rect();
    state
        .obstacles
        .iter()
        .position(|o| overlaps(&player, &o.rect()))
}

/// Spawn one obstacle if more than the spawn interval has passed.
/// Returns true if an obstacle was created.
pub fn maybe_spawn(state: &mut GameState, now_ms: f64) -> bool {
    if now_ms - state.last_spawn_ms <= state.config.spawn_interval_ms {
        return false;
    }

    let max_x = state.config.obstacle_max_x();
    let x = state.rng.random_range(0.0..=max_x);
    state.obstacles.push(Obstacle {
        pos: Vec2::new(x, state.config.obstacle_spawn_y),
        size: state.config.obstacle_size,
    });
    state.last_spawn_ms = now_ms;
    log::debug!("Spawned obstacle at x={:.1} ({} active)", x, state.obstacles.len());
    true
}

/// One score timer period elapsed. Returns the new best score when it was
/// beaten.
pub fn score_tick(state: &mut GameState) -> Option<u64> {
    if !state.is_running() {
        return None;
    }
    state.score += 1;
    if state.score > state.best_score {
        state.best_score = state.score;
        Some(state.best_score)
    } else {
        None
    }
}

/// Start a fresh round: no obstacles, player home, score zero
pub fn reset(state: &mut GameState) {
    state.obstacles.clear();
    state.player.pos = state.config.player_home();
    state.score = 0;
    state.phase = SessionPhase::Running;
}

/// Flip between Running and Paused. Ended is left alone.
pub fn toggle_pause(state: &mut GameState) -> SessionPhase {
    state.phase = match state.phase {
        SessionPhase::Running => SessionPhase::Paused,
        SessionPhase::Paused => SessionPhase::Running,
        SessionPhase::Ended => SessionPhase::Ended,
    };
    state.phase
}

/// Demo mode: steer away from the closest car coming down our lane
pub fn autopilot(state: &GameState) -> TickInput {
    let player = state.player.rect();
    let margin = player.size.x * 0.5;

    let threat = state
        .obstacles
        .iter()
        .map(|o| o.rect())
        .filter(|o| o.top() < player.bottom())
        .filter(|o| o.left() < player.right() + margin && o.right() > player.left() - margin)
        .max_by(|a, b| {
            a.bottom()
                .partial_cmp(&b.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(threat) = threat else {
        return TickInput::default();
    };

    let max_x = state.config.player_max_x();
    let x = player.left();
    let step = state.player.speed;
    // Player x that clears the threat's lane on either side
    let right_target = threat.right() + margin;
    let left_target = threat.left() - margin - player.size.x;
    let can_right = right_target <= max_x;
    let can_left = left_target >= 0.0;

    // Crossing under the threat only works if it is still high enough
    let frames_to_impact = (player.top() - threat.bottom()) / state.config.obstacle_speed;
    let crossable = |dist: f32| dist / step < frames_to_impact;

    let away_is_right = threat.center().x < player.center().x;
    let go_right = match (away_is_right, can_right, can_left) {
        (true, true, _) => true,
        (false, _, true) => false,
        (true, false, true) if crossable(x - left_target) => false,
        (false, true, false) if crossable(right_target - x) => true,
        _ => return TickInput::default(),
    };

    TickInput {
        left: !go_right,
        right: go_right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameConfig;

    fn state() -> GameState {
        GameState::new(GameConfig::for_canvas(800.0, 600.0), 12345, 0, 0.0)
    }

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(50.0, 100.0),
        }
    }

    #[test]
    fn test_move_player_left_and_right() {
        let mut state = state();
        let start = state.player.pos.x;

        move_player(&mut state, &TickInput { left: true, right: false });
        assert_eq!(state.player.pos.x, start - 7.0);

        move_player(&mut state, &TickInput { left: false, right: true });
        move_player(&mut state, &TickInput { left: false, right: true });
        assert_eq!(state.player.pos.x, start + 7.0);
    }

    #[test]
    fn test_move_player_no_vertical_motion() {
        let mut state = state();
        let y = state.player.pos.y;
        for _ in 0..50 {
            move_player(&mut state, &TickInput { left: true, right: false });
        }
        assert_eq!(state.player.pos.y, y);
    }

    #[test]
    fn test_held_left_stops_short_of_edge() {
        let mut state = state();
        for _ in 0..500 {
            move_player(&mut state, &TickInput { left: true, right: false });
        }
        // 375 - 53 * 7; one more step would go negative
        assert_eq!(state.player.pos.x, 4.0);
    }

    #[test]
    fn test_held_right_stops_short_of_edge() {
        let mut state = state();
        for _ in 0..500 {
            move_player(&mut state, &TickInput { left: false, right: true });
        }
        // 375 + 53 * 7; max x is 750
        assert_eq!(state.player.pos.x, 746.0);
    }

    #[test]
    fn test_move_refused_per_direction() {
        let mut state = state();
        let both = TickInput { left: true, right: true };

        state.player.pos.x = 3.0;
        move_player(&mut state, &TickInput { left: true, right: false });
        assert_eq!(state.player.pos.x, 3.0);
        // Left refused, right applied
        move_player(&mut state, &both);
        assert_eq!(state.player.pos.x, 10.0);

        state.player.pos.x = 747.0;
        move_player(&mut state, &TickInput { left: false, right: true });
        assert_eq!(state.player.pos.x, 747.0);
        // Left applied first, so right fits again
        move_player(&mut state, &both);
        assert_eq!(state.player.pos.x, 747.0);

        state.player.pos.x = 745.0;
        move_player(&mut state, &both);
        assert_eq!(state.player.pos.x, 745.0);
    }

    #[test]
    fn test_advance_obstacles_moves_down() {
        let mut state = state();
        state.obstacles.push(obstacle_at(10.0, -100.0));
        let removed = advance_obstacles(&mut state);
        assert_eq!(removed, 0);
        assert_eq!(state.obstacles[0].pos.y, -95.0);
    }

    #[test]
    fn test_advance_obstacles_removes_adjacent_offscreen() {
        let mut state = state();
        // Two consecutive off-screen cars; a forward splice would skip one
        state.obstacles.push(obstacle_at(10.0, 598.0));
        state.obstacles.push(obstacle_at(100.0, 599.0));
        state.obstacles.push(obstacle_at(200.0, 100.0));
        state.obstacles.push(obstacle_at(300.0, 597.0));

        let removed = advance_obstacles(&mut state);
        assert_eq!(removed, 3);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos, Vec2::new(200.0, 105.0));
    }

    #[test]
    fn test_obstacle_at_floor_is_kept() {
        let mut state = state();
        state.obstacles.push(obstacle_at(10.0, 595.0));
        advance_obstacles(&mut state);
        // y == canvas height is not yet past it
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_find_collision_first_in_spawn_order() {
        let mut state = state();
        state.player.pos = Vec2::new(100.0, 500.0);
        state.obstacles.push(obstacle_at(300.0, 550.0));
        state.obstacles.push(obstacle_at(120.0, 550.0));
        state.obstacles.push(obstacle_at(90.0, 520.0));
        assert_eq!(find_collision(&state), Some(1));

        state.obstacles.remove(1);
        state.obstacles.remove(1);
        assert_eq!(find_collision(&state), None);
    }

    #[test]
    fn test_spawn_requires_strictly_more_than_interval() {
        let mut state = state();
        assert!(!maybe_spawn(&mut state, 1000.0));
        assert!(!maybe_spawn(&mut state, 1500.0));
        assert!(state.obstacles.is_empty());

        assert!(maybe_spawn(&mut state, 1501.0));
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.last_spawn_ms, 1501.0);
        assert_eq!(state.obstacles[0].pos.y, -100.0);
    }

    #[test]
    fn test_spawn_once_after_long_stall() {
        let mut state = state();
        assert!(maybe_spawn(&mut state, 60_000.0));
        assert!(!maybe_spawn(&mut state, 60_000.0));
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_spawn_cadence_on_millisecond_clock() {
        let mut state = state();
        let mut spawn_times = Vec::new();
        for ms in 0..=15_000 {
            if maybe_spawn(&mut state, ms as f64) {
                spawn_times.push(ms);
            }
        }
        assert_eq!(spawn_times.len(), 9);
        for pair in spawn_times.windows(2) {
            assert_eq!(pair[1] - pair[0], 1501);
        }
    }

    #[test]
    fn test_spawn_x_within_bounds() {
        let mut state = state();
        for i in 1..=200 {
            maybe_spawn(&mut state, i as f64 * 2000.0);
        }
        assert_eq!(state.obstacles.len(), 200);
        assert!(
            state
                .obstacles
                .iter()
                .all(|o| o.pos.x >= 0.0 && o.pos.x <= 750.0)
        );
    }

    #[test]
    fn test_score_tick_only_while_running() {
        let mut state = state();
        for _ in 0..5 {
            score_tick(&mut state);
        }
        assert_eq!(state.score, 5);

        toggle_pause(&mut state);
        for _ in 0..5 {
            score_tick(&mut state);
        }
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_score_tick_reports_new_best() {
        let mut state = GameState::new(GameConfig::for_canvas(800.0, 600.0), 1, 2, 0.0);
        assert_eq!(score_tick(&mut state), None);
        assert_eq!(score_tick(&mut state), None);
        assert_eq!(score_tick(&mut state), Some(3));
        assert_eq!(state.best_score, 3);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = state();
        state.obstacles.push(obstacle_at(1.0, 2.0));
        state.player.pos.x = 3.0;
        state.score = 42;
        state.phase = SessionPhase::Ended;

        reset(&mut state);
        let home = state.config.player_home();
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, home);
        assert_eq!(state.phase, SessionPhase::Running);

        reset(&mut state);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, home);
    }

    #[test]
    fn test_first_start_and_reset_share_home() {
        let mut state = state();
        // 120 px above the bottom on a fresh session
        assert_eq!(state.player.pos, Vec2::new(375.0, 480.0));

        state.player.pos.x = 10.0;
        reset(&mut state);
        assert_eq!(state.player.pos, Vec2::new(375.0, 480.0));
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = state();
        assert_eq!(toggle_pause(&mut state), SessionPhase::Paused);
        assert_eq!(toggle_pause(&mut state), SessionPhase::Running);

        state.phase = SessionPhase::Ended;
        assert_eq!(toggle_pause(&mut state), SessionPhase::Ended);
    }

    #[test]
    fn test_autopilot_idles_without_threat() {
        let mut state = state();
        state.obstacles.push(obstacle_at(0.0, 0.0));
        assert_eq!(autopilot(&state), TickInput::default());
    }

    #[test]
    fn test_autopilot_dodges_away_from_threat() {
        let mut state = state();
        // Player at 375..425; threat slightly left of center
        state.obstacles.push(obstacle_at(360.0, 300.0));
        let input = autopilot(&state);
        assert!(input.right && !input.left);

        state.obstacles[0].pos.x = 390.0;
        let input = autopilot(&state);
        assert!(input.left && !input.right);
    }

    #[test]
    fn test_autopilot_escapes_wall() {
        let mut state = state();
        state.player.pos.x = 0.0;
        state.obstacles.push(obstacle_at(10.0, 300.0));
        let input = autopilot(&state);
        assert!(input.right);
    }

    #[test]
    fn test_autopilot_holds_at_wall_when_threat_is_close() {
        let mut state = state();
        state.player.pos.x = 750.0;
        // Threat to the left, too low to slip under
        state.obstacles.push(obstacle_at(710.0, 350.0));
        assert_eq!(autopilot(&state), TickInput::default());
    }

    #[test]
    fn test_autopilot_crosses_under_distant_threat_at_wall() {
        let mut state = state();
        state.player.pos.x = 750.0;
        state.obstacles.push(obstacle_at(710.0, -100.0));
        let input = autopilot(&state);
        assert!(input.left && !input.right);
    }
}
