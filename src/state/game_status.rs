//! Authoritative game-status state and its transition rules.
//!
//! The countdown is never driven by a ticking interval. Remaining time is
//! recomputed from absolute timestamps on demand, so every reader (server
//! handler, admin panel, player page) derives the same answer from the same
//! four timer fields.

use std::time::{SystemTime, UNIX_EPOCH};

/// Default countdown length: ten minutes.
pub const DEFAULT_TIMER_DURATION_MS: i64 = 10 * 60 * 1000;

/// Shared singleton describing whether play is open and the countdown state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStatus {
    /// Whether teams may play.
    pub is_started: bool,
    /// When the game was last started (ms since epoch); null when stopped.
    pub start_time: Option<i64>,
    /// Wall-clock instant the countdown began; null if never started or reset.
    pub timer_started_at: Option<i64>,
    /// Wall-clock instant of the last pause; null while running or after reset.
    pub timer_paused_at: Option<i64>,
    /// True only between a start/resume and the next pause.
    pub is_timer_running: bool,
    /// Total countdown length in milliseconds.
    pub timer_duration: i64,
}

/// Mutually exclusive intents accepted by the sync protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Open or close play; stamps or clears `start_time`.
    SetStarted(bool),
    /// Start the countdown, or resume it after a pause.
    StartTimer,
    /// Pause the countdown.
    PauseTimer,
    /// Clear all countdown progress without touching the duration.
    ResetTimer,
}

impl GameStatus {
    /// Initial state: stopped, timer never started, full duration available.
    pub fn new(timer_duration: i64) -> Self {
        Self {
            is_started: false,
            start_time: None,
            timer_started_at: None,
            timer_paused_at: None,
            is_timer_running: false,
            timer_duration,
        }
    }

    /// Apply one command at wall-clock instant `now_ms`.
    ///
    /// Resuming after a pause shifts `timer_started_at` forward by the pause
    /// duration, so elapsed *active* time rather than wall-clock time drives
    /// the countdown. Starting while already running is a no-op on the
    /// elapsed-time calculation.
    pub fn apply(&mut self, command: GameCommand, now_ms: i64) {
        match command {
            GameCommand::SetStarted(started) => {
                self.is_started = started;
                self.start_time = started.then_some(now_ms);
            }
            GameCommand::StartTimer => {
                if self.is_timer_running {
                    return;
                }
                match self.timer_paused_at.take() {
                    Some(paused_at) => {
                        let pause_ms = now_ms - paused_at;
                        self.timer_started_at =
                            Some(self.timer_started_at.map_or(now_ms, |started| started + pause_ms));
                    }
                    None => {
                        if self.timer_started_at.is_none() {
                            self.timer_started_at = Some(now_ms);
                        }
                    }
                }
                self.is_timer_running = true;
            }
            GameCommand::PauseTimer => {
                if self.timer_started_at.is_some() {
                    self.timer_paused_at = Some(now_ms);
                }
                self.is_timer_running = false;
            }
            GameCommand::ResetTimer => {
                self.timer_started_at = None;
                self.timer_paused_at = None;
                self.is_timer_running = false;
            }
        }
    }

    /// Remaining countdown time at wall-clock instant `now_ms`.
    ///
    /// `remaining = max(0, duration - (reference_now - timer_started_at))`
    /// where `reference_now` is the pause instant while paused, else `now_ms`.
    /// This formula is the single source of truth for remaining time.
    pub fn remaining_at(&self, now_ms: i64) -> i64 {
        let Some(started_at) = self.timer_started_at else {
            return self.timer_duration;
        };

        let reference_now = if self.is_timer_running {
            now_ms
        } else {
            self.timer_paused_at.unwrap_or(now_ms)
        };

        (self.timer_duration - (reference_now - started_at)).max(0)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: i64 = 600_000;

    fn status() -> GameStatus {
        GameStatus::new(DURATION)
    }

    #[test]
    fn initial_state_renders_full_duration() {
        let status = status();
        assert!(!status.is_started);
        assert_eq!(status.timer_started_at, None);
        assert_eq!(status.remaining_at(123_456), DURATION);
    }

    #[test]
    fn set_started_stamps_and_clears_start_time() {
        let mut status = status();
        status.apply(GameCommand::SetStarted(true), 1_000);
        assert!(status.is_started);
        assert_eq!(status.start_time, Some(1_000));

        status.apply(GameCommand::SetStarted(false), 2_000);
        assert!(!status.is_started);
        assert_eq!(status.start_time, None);
    }

    #[test]
    fn stopping_the_game_leaves_timer_fields_alone() {
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        status.apply(GameCommand::SetStarted(false), 5_000);
        assert_eq!(status.timer_started_at, Some(0));
        assert!(status.is_timer_running);
    }

    #[test]
    fn running_timer_counts_down_from_start() {
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        assert!(status.is_timer_running);
        assert_eq!(status.remaining_at(150_000), DURATION - 150_000);
    }

    #[test]
    fn pause_freezes_remaining_time() {
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        status.apply(GameCommand::PauseTimer, 120_000);

        assert!(!status.is_timer_running);
        assert_eq!(status.timer_paused_at, Some(120_000));
        // Remaining is anchored to the pause instant, however late we look.
        assert_eq!(status.remaining_at(500_000), DURATION - 120_000);
    }

    #[test]
    fn resume_shifts_start_by_the_pause_duration() {
        // startTimer at t=0, pause at t=120000, resume at t=180000: at
        // t=200000 the active elapsed time is 120000 + 20000 = 140000.
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        status.apply(GameCommand::PauseTimer, 120_000);
        status.apply(GameCommand::StartTimer, 180_000);

        assert_eq!(status.timer_started_at, Some(60_000));
        assert_eq!(status.timer_paused_at, None);
        assert!(status.is_timer_running);
        assert_eq!(status.remaining_at(200_000), DURATION - 140_000);
    }

    #[test]
    fn repeated_pauses_and_resumes_never_lose_active_time() {
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        status.apply(GameCommand::PauseTimer, 30_000); // 30s active
        status.apply(GameCommand::StartTimer, 100_000);
        status.apply(GameCommand::PauseTimer, 150_000); // +50s active
        status.apply(GameCommand::StartTimer, 400_000);

        // 80s of active time so far, regardless of the 320s wall clock spent.
        assert_eq!(status.remaining_at(400_000), DURATION - 80_000);
        assert_eq!(status.remaining_at(410_000), DURATION - 90_000);
    }

    #[test]
    fn double_start_is_idempotent_while_running() {
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        status.apply(GameCommand::StartTimer, 50_000);
        assert_eq!(status.timer_started_at, Some(0));
        assert_eq!(status.remaining_at(60_000), DURATION - 60_000);
    }

    #[test]
    fn double_pause_restamps_without_resuming() {
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        status.apply(GameCommand::PauseTimer, 100_000);
        status.apply(GameCommand::PauseTimer, 110_000);

        // The later stamp wins; still paused, no time lost on resume.
        assert_eq!(status.timer_paused_at, Some(110_000));
        status.apply(GameCommand::StartTimer, 200_000);
        assert_eq!(status.remaining_at(200_000), DURATION - 110_000);
    }

    #[test]
    fn pause_before_any_start_leaves_fields_null() {
        let mut status = status();
        status.apply(GameCommand::PauseTimer, 5_000);
        assert_eq!(status.timer_started_at, None);
        assert_eq!(status.timer_paused_at, None);
        assert!(!status.is_timer_running);
        assert_eq!(status.remaining_at(10_000), DURATION);
    }

    #[test]
    fn reset_clears_progress_and_restores_full_duration() {
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        status.apply(GameCommand::PauseTimer, 90_000);
        status.apply(GameCommand::ResetTimer, 95_000);

        assert_eq!(status.timer_started_at, None);
        assert_eq!(status.timer_paused_at, None);
        assert!(!status.is_timer_running);
        assert_eq!(status.remaining_at(95_000), DURATION);
        assert_eq!(status.timer_duration, DURATION);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let mut status = status();
        status.apply(GameCommand::StartTimer, 0);
        assert_eq!(status.remaining_at(DURATION + 1), 0);
        assert_eq!(status.remaining_at(DURATION * 3), 0);
    }

    #[test]
    fn elapsed_active_time_matches_sum_of_running_intervals() {
        // Arbitrary start/pause schedule; remaining must equal duration minus
        // the sum of intervals during which the timer ran.
        let schedule = [
            (GameCommand::StartTimer, 1_000),
            (GameCommand::PauseTimer, 4_000),
            (GameCommand::StartTimer, 10_000),
            (GameCommand::PauseTimer, 25_000),
            (GameCommand::StartTimer, 100_000),
            (GameCommand::PauseTimer, 100_500),
        ];

        let mut status = status();
        for (command, at) in schedule {
            status.apply(command, at);
        }

        let active = (4_000 - 1_000) + (25_000 - 10_000) + (100_500 - 100_000);
        assert_eq!(status.remaining_at(999_999), DURATION - active);
    }
}
