//! Hunting reflex game mechanics.
//!
//!  ┌──────────────────────────────────────┐
//!  │                                      │
//!  │   ◄──── [deer] ────►                 │  ← target bounces between the edges
//!  │                                      │
//!  └──────────────────────────────────────┘
//!
//! Space with the cursor over the target scores a point and moves the
//! target to a random spot. The session ends 10 s after it started.
//!
//! All timestamps are offsets on one monotonic clock, passed in by the
//! caller, so the session runs the same with a real or a manual clock.

use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use crate::shared::*;

// ─── Tuning constants ─────────────────────────────────────────────────────────

pub const HUNT_DURATION: Duration = Duration::from_secs(10);
pub const TARGET_SIZE: f32 = 50.0;
/// Top edge of the target, fixed for the whole session.
pub const TARGET_Y: f32 = SCREEN_HEIGHT / 2.3;
/// Rightmost left-edge position that keeps the target on screen.
pub const TARGET_MAX_X: f32 = SCREEN_WIDTH - TARGET_SIZE;
/// Horizontal speed in pixels per second.
pub const TARGET_SPEED: f32 = 600.0;

#[derive(Resource, Debug, Clone)]
pub struct HuntingSession {
    started: Duration,
    last_update: Duration,
    target_x: f32,
    direction: f32,
    score: u32,
    reported: bool,
}

impl HuntingSession {
    pub fn new(now: Duration, rng: &mut impl Rng) -> Self {
        Self {
            started: now,
            last_update: now,
            target_x: rng.gen_range(0.0..=TARGET_MAX_X),
            direction: 1.0,
            score: 0,
            reported: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started)
    }

    pub fn is_over(&self, now: Duration) -> bool {
        self.elapsed(now) >= HUNT_DURATION
    }

    /// Whole seconds left, rounded down, for the on-screen countdown.
    pub fn time_left_secs(&self, now: Duration) -> u64 {
        HUNT_DURATION.saturating_sub(self.elapsed(now)).as_secs()
    }

    pub fn target_rect(&self) -> Rect {
        canvas_rect(self.target_x, TARGET_Y, TARGET_SIZE, TARGET_SIZE)
    }

    /// Moves the target up to `now`, never past the end of the session.
    pub fn advance(&mut self, now: Duration) {
        let end = now.min(self.started + HUNT_DURATION);
        if end <= self.last_update {
            return;
        }
        let dt = (end - self.last_update).as_secs_f32();
        self.last_update = end;

        // One lap is right across and back: [0, max] heading right,
        // (max, 2*max) heading left.
        let lap = 2.0 * TARGET_MAX_X;
        let start = if self.direction > 0.0 {
            self.target_x
        } else {
            lap - self.target_x
        };
        let phase = (start + TARGET_SPEED * dt).rem_euclid(lap);
        if phase <= TARGET_MAX_X {
            self.target_x = phase;
            self.direction = 1.0;
        } else {
            self.target_x = lap - phase;
            self.direction = -1.0;
        }
    }

    /// A Space press at `now`. Returns true if it scored.
    pub fn shoot(&mut self, now: Duration, cursor: Option<Vec2>, rng: &mut impl Rng) -> bool {
        if self.is_over(now) {
            return false;
        }
        self.advance(now);
        let Some(cursor) = cursor else {
            return false;
        };
        if !contains(self.target_rect(), cursor) {
            return false;
        }
        self.score += 1;
        self.target_x = rng.gen_range(0.0..=TARGET_MAX_X);
        true
    }

    /// The final score, handed out once after the session ends.
    pub fn take_result(&mut self, now: Duration) -> Option<u32> {
        if self.reported || !self.is_over(now) {
            return None;
        }
        self.reported = true;
        Some(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session_at(x: f32) -> HuntingSession {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = HuntingSession::new(Duration::ZERO, &mut rng);
        session.target_x = x;
        session
    }

    fn center_of(session: &HuntingSession) -> Vec2 {
        session.target_rect().center()
    }

    #[test]
    fn test_target_starts_on_screen() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let session = HuntingSession::new(Duration::ZERO, &mut rng);
            assert!((0.0..=TARGET_MAX_X).contains(&session.target_x()));
            assert_eq!(session.target_rect().min.y, TARGET_Y);
        }
    }

    #[test]
    fn test_target_bounces_off_right_edge() {
        let mut session = session_at(700.0);
        session.advance(Duration::from_millis(100));
        assert!((session.target_x() - 740.0).abs() < 0.01);
        assert_eq!(session.direction, -1.0);
    }

    #[test]
    fn test_target_bounces_off_left_edge() {
        let mut session = session_at(30.0);
        session.direction = -1.0;
        session.advance(Duration::from_millis(100));
        assert!((session.target_x() - 30.0).abs() < 0.01);
        assert_eq!(session.direction, 1.0);
    }

    #[test]
    fn test_target_never_leaves_screen() {
        let mut session = session_at(0.0);
        for ms in (0..10_000).step_by(37) {
            session.advance(Duration::from_millis(ms));
            assert!((0.0..=TARGET_MAX_X).contains(&session.target_x()));
        }
    }

    #[test]
    fn test_hit_scores_and_relocates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = session_at(300.0);
        let cursor = center_of(&session);
        assert!(session.shoot(Duration::ZERO, Some(cursor), &mut rng));
        assert_eq!(session.score(), 1);
        assert_ne!(session.target_x(), 300.0);
    }

    #[test]
    fn test_long_stall_folds_over_both_edges() {
        // 300 + 1800 px: right edge at 750, left edge at 0, then 600 heading right.
        let mut session = session_at(300.0);
        session.advance(Duration::from_secs(3));
        assert!((session.target_x() - 600.0).abs() < 0.01);
        assert_eq!(session.direction, 1.0);

        let mut session = session_at(100.0);
        session.direction = -1.0;
        session.advance(Duration::from_millis(500));
        // 100 left, bounce, 200 right.
        assert!((session.target_x() - 200.0).abs() < 0.01);
        assert_eq!(session.direction, 1.0);
    }

    #[test]
    fn test_scripted_shots_count_only_hits_in_time() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut session = session_at(0.0);
        let mut expected = 0;

        for ms in (0..12_000u64).step_by(250) {
            let now = Duration::from_millis(ms);
            session.advance(now);
            let on_target = center_of(&session);
            let script = [
                Some(on_target),
                Some(Vec2::new(on_target.x, on_target.y + TARGET_SIZE)),
                None,
            ];
            let cursor = script[(ms / 250) as usize % script.len()];
            let in_time = now < HUNT_DURATION;
            let inside = cursor.is_some_and(|c| contains(session.target_rect(), c));
            if in_time && inside {
                expected += 1;
            }
            assert_eq!(
                session.shoot(now, cursor, &mut rng),
                in_time && inside,
                "at {}ms",
                ms
            );
        }

        // Hits every third shot for the first ten seconds.
        assert_eq!(expected, 14);
        assert_eq!(session.score(), expected);
        assert_eq!(session.take_result(Duration::from_secs(12)), Some(expected));
    }

    #[test]
    fn test_miss_and_missing_cursor_do_not_score() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = session_at(300.0);
        assert!(!session.shoot(Duration::ZERO, Some(Vec2::new(10.0, 10.0)), &mut rng));
        assert!(!session.shoot(Duration::ZERO, None, &mut rng));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_no_score_after_time_is_up() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = session_at(300.0);
        let cursor = center_of(&session);
        assert!(!session.shoot(HUNT_DURATION, Some(cursor), &mut rng));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_result_is_reported_once() {
        let mut session = session_at(300.0);
        assert_eq!(session.take_result(Duration::from_millis(9_999)), None);
        assert_eq!(session.take_result(HUNT_DURATION), Some(0));
        assert_eq!(session.take_result(Duration::from_secs(11)), None);
    }

    #[test]
    fn test_countdown() {
        let session = session_at(0.0);
        assert_eq!(session.time_left_secs(Duration::ZERO), 10);
        assert_eq!(session.time_left_secs(Duration::from_millis(1_500)), 8);
        assert_eq!(session.time_left_secs(Duration::from_millis(9_500)), 0);
        assert_eq!(session.time_left_secs(Duration::from_secs(12)), 0);
    }
}
