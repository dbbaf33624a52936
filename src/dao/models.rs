//! Persisted representations of teams and the singleton game-status record.
//!
//! Timestamps are stored as milliseconds since the Unix epoch so every backend
//! (and every reader) derives identical countdown math from them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::game_status::GameStatus;

/// A registered team and its progress through the hunt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntity {
    /// Primary key of the team.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Unique display name chosen at registration.
    pub name: String,
    /// Ordered member identifiers.
    pub members: Vec<String>,
    /// Completion flag per round name, in round order.
    pub completed_rounds: IndexMap<String, bool>,
    /// Per-round submission details, filled in as rounds complete.
    #[serde(default)]
    pub round_details: IndexMap<String, RoundResultEntity>,
    /// Accumulated score across round submissions.
    pub score: i64,
    /// Set by an admin to bar the team from playing.
    pub disqualified: bool,
    /// Admin-toggled winner flag.
    pub is_winner: bool,
    /// Admin-toggled loser flag.
    pub is_loser: bool,
    /// Creation timestamp (ms since epoch), immutable.
    pub created_at: i64,
    /// Refreshed on every mutating interaction (ms since epoch).
    pub last_active: i64,
}

impl TeamEntity {
    /// Build a freshly registered team: all flags false, score zero, and every
    /// configured round marked incomplete.
    pub fn new(name: String, members: Vec<String>, rounds: &[String], now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            members,
            completed_rounds: blank_rounds(rounds),
            round_details: IndexMap::new(),
            score: 0,
            disqualified: false,
            is_winner: false,
            is_loser: false,
            created_at: now_ms,
            last_active: now_ms,
        }
    }
}

/// Detail of one completed round submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResultEntity {
    /// Score awarded for the round.
    pub score: i64,
    /// Number of attempts the team needed.
    pub attempts: u32,
    /// Seconds the team spent on the round.
    pub time_spent_secs: u64,
    /// Completion timestamp (ms since epoch).
    pub completed_at: i64,
}

/// Singleton settings record mirroring the in-memory [`GameStatus`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatusEntity {
    /// Whether teams may play.
    pub is_started: bool,
    /// When the game was last started (ms since epoch); null when stopped.
    pub start_time: Option<i64>,
    /// Wall-clock instant the countdown began (ms since epoch).
    pub timer_started_at: Option<i64>,
    /// Wall-clock instant of the last pause (ms since epoch).
    pub timer_paused_at: Option<i64>,
    /// True only between a start/resume and the next pause.
    pub is_timer_running: bool,
    /// Total countdown length in milliseconds.
    pub timer_duration: i64,
}

impl From<GameStatus> for GameStatusEntity {
    fn from(status: GameStatus) -> Self {
        Self {
            is_started: status.is_started,
            start_time: status.start_time,
            timer_started_at: status.timer_started_at,
            timer_paused_at: status.timer_paused_at,
            is_timer_running: status.is_timer_running,
            timer_duration: status.timer_duration,
        }
    }
}

impl From<GameStatusEntity> for GameStatus {
    fn from(entity: GameStatusEntity) -> Self {
        Self {
            is_started: entity.is_started,
            start_time: entity.start_time,
            timer_started_at: entity.timer_started_at,
            timer_paused_at: entity.timer_paused_at,
            is_timer_running: entity.is_timer_running,
            timer_duration: entity.timer_duration,
        }
    }
}

/// Fresh completion map with every configured round set to false.
pub fn blank_rounds(rounds: &[String]) -> IndexMap<String, bool> {
    rounds.iter().map(|round| (round.clone(), false)).collect()
}
