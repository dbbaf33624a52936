//! Countdown rendering math shared with polling clients.
//!
//! Clients re-derive the live countdown between polls with exactly the same
//! formula the server uses, so the local tick is only a smoothing mechanism
//! and clock drift self-corrects on the next poll.

use crate::state::game_status::GameStatus;

/// Remaining time at or below this enters the warning tier.
pub const WARNING_THRESHOLD_MS: i64 = 180_000;
/// Remaining time at or below this enters the danger tier.
pub const DANGER_THRESHOLD_MS: i64 = 60_000;

/// Visual urgency tier derived from the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTier {
    /// Plenty of time left.
    Normal,
    /// Three minutes or less remaining.
    Warning,
    /// One minute or less remaining.
    Danger,
}

impl TimerTier {
    /// Tier for a given remaining time in milliseconds.
    pub fn for_remaining(remaining_ms: i64) -> Self {
        if remaining_ms <= DANGER_THRESHOLD_MS {
            TimerTier::Danger
        } else if remaining_ms <= WARNING_THRESHOLD_MS {
            TimerTier::Warning
        } else {
            TimerTier::Normal
        }
    }
}

/// One rendered frame of the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownView {
    /// Remaining milliseconds, clamped at zero.
    pub remaining_ms: i64,
    /// Urgency tier for the display.
    pub tier: TimerTier,
    /// `mm:ss` clock string.
    pub clock: String,
}

/// Derive the countdown display from a polled snapshot at instant `now_ms`.
///
/// A null `timer_started_at` with an inactive timer renders the full
/// configured duration; a running timer that has hit zero stays at `00:00`.
pub fn render(status: &GameStatus, now_ms: i64) -> CountdownView {
    let remaining_ms = status.remaining_at(now_ms);
    CountdownView {
        remaining_ms,
        tier: TimerTier::for_remaining(remaining_ms),
        clock: format_clock(remaining_ms),
    }
}

/// Format milliseconds as an `mm:ss` clock string.
pub fn format_clock(remaining_ms: i64) -> String {
    let total_secs = remaining_ms.max(0) / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::game_status::GameCommand;

    const DURATION: i64 = 600_000;

    #[test]
    fn inactive_timer_renders_full_duration() {
        let status = GameStatus::new(DURATION);
        let view = render(&status, 42_000);
        assert_eq!(view.remaining_ms, DURATION);
        assert_eq!(view.clock, "10:00");
        assert_eq!(view.tier, TimerTier::Normal);
    }

    #[test]
    fn tiers_flip_at_the_thresholds() {
        assert_eq!(TimerTier::for_remaining(180_001), TimerTier::Normal);
        assert_eq!(TimerTier::for_remaining(180_000), TimerTier::Warning);
        assert_eq!(TimerTier::for_remaining(60_001), TimerTier::Warning);
        assert_eq!(TimerTier::for_remaining(60_000), TimerTier::Danger);
        assert_eq!(TimerTier::for_remaining(0), TimerTier::Danger);
    }

    #[test]
    fn display_stops_at_zero() {
        let mut status = GameStatus::new(DURATION);
        status.apply(GameCommand::StartTimer, 0);
        let view = render(&status, DURATION + 30_000);
        assert_eq!(view.remaining_ms, 0);
        assert_eq!(view.clock, "00:00");
    }

    #[test]
    fn reset_restores_the_full_clock() {
        let mut status = GameStatus::new(DURATION);
        status.apply(GameCommand::StartTimer, 0);
        status.apply(GameCommand::ResetTimer, 250_000);
        assert_eq!(render(&status, 250_000).clock, "10:00");
    }

    #[test]
    fn successive_ticks_recompute_from_absolute_timestamps() {
        let mut status = GameStatus::new(DURATION);
        status.apply(GameCommand::StartTimer, 0);

        // Irregular poll intervals still agree with the timestamp formula.
        assert_eq!(render(&status, 1_000).clock, "09:59");
        assert_eq!(render(&status, 61_000).clock, "08:59");
        assert_eq!(render(&status, 59_000).remaining_ms, DURATION - 59_000);
    }

    #[test]
    fn clock_formats_single_digit_components() {
        assert_eq!(format_clock(65_000), "01:05");
        assert_eq!(format_clock(599_999), "09:59");
        assert_eq!(format_clock(-5), "00:00");
    }
}
