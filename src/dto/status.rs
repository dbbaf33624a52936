//! Wire representations of the game-status sync protocol.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::format_ms_timestamp,
    state::game_status::{GameCommand, GameStatus},
};

/// Snapshot of the shared game status returned by both GET and POST.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameStatusSnapshot {
    /// Whether teams may play.
    pub is_started: bool,
    /// RFC3339 instant the game was last started, or null when stopped.
    pub start_time: Option<String>,
    /// Wall-clock instant (ms since epoch) the countdown began.
    pub timer_started_at: Option<i64>,
    /// Wall-clock instant (ms since epoch) of the last pause.
    pub timer_paused_at: Option<i64>,
    /// True only between a start/resume and the next pause.
    pub is_timer_running: bool,
    /// Total countdown length in milliseconds.
    pub timer_duration: i64,
    /// True while the backend serves from the in-memory fallback store.
    pub degraded: bool,
}

impl GameStatusSnapshot {
    /// Project the in-memory singleton onto the wire shape.
    pub fn from_status(status: GameStatus, degraded: bool) -> Self {
        Self {
            is_started: status.is_started,
            start_time: status.start_time.map(format_ms_timestamp),
            timer_started_at: status.timer_started_at,
            timer_paused_at: status.timer_paused_at,
            is_timer_running: status.is_timer_running,
            timer_duration: status.timer_duration,
            degraded,
        }
    }
}

/// Command body accepted by `POST /game-status`.
///
/// At most one recognized key is honored per request; everything else is a
/// no-op so polling clients are never blocked by a malformed payload.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameStatusCommandRequest {
    /// Open (`true`) or close (`false`) play.
    #[serde(default)]
    pub is_started: Option<bool>,
    /// Start or resume the countdown.
    #[serde(default)]
    pub start_timer: Option<bool>,
    /// Pause the countdown.
    #[serde(default)]
    pub pause_timer: Option<bool>,
    /// Clear countdown progress.
    #[serde(default)]
    pub reset_timer: Option<bool>,
}

impl GameStatusCommandRequest {
    /// Pick the single command this body carries, if any.
    pub fn into_command(self) -> Option<GameCommand> {
        if let Some(started) = self.is_started {
            Some(GameCommand::SetStarted(started))
        } else if self.start_timer == Some(true) {
            Some(GameCommand::StartTimer)
        } else if self.pause_timer == Some(true) {
            Some(GameCommand::PauseTimer)
        } else if self.reset_timer == Some(true) {
            Some(GameCommand::ResetTimer)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Option<GameCommand> {
        serde_json::from_str::<GameStatusCommandRequest>(body)
            .unwrap()
            .into_command()
    }

    #[test]
    fn recognizes_each_intent() {
        assert_eq!(
            parse(r#"{"isStarted": true}"#),
            Some(GameCommand::SetStarted(true))
        );
        assert_eq!(
            parse(r#"{"isStarted": false}"#),
            Some(GameCommand::SetStarted(false))
        );
        assert_eq!(parse(r#"{"startTimer": true}"#), Some(GameCommand::StartTimer));
        assert_eq!(parse(r#"{"pauseTimer": true}"#), Some(GameCommand::PauseTimer));
        assert_eq!(parse(r#"{"resetTimer": true}"#), Some(GameCommand::ResetTimer));
    }

    #[test]
    fn empty_and_unrecognized_bodies_are_noops() {
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"confetti": true}"#), None);
        assert_eq!(parse(r#"{"startTimer": false}"#), None);
    }

    #[test]
    fn at_most_one_intent_is_honored() {
        assert_eq!(
            parse(r#"{"isStarted": true, "startTimer": true, "resetTimer": true}"#),
            Some(GameCommand::SetStarted(true))
        );
        assert_eq!(
            parse(r#"{"startTimer": true, "pauseTimer": true}"#),
            Some(GameCommand::StartTimer)
        );
    }
}
