use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod health;
pub mod status;
pub mod team;
pub mod validation;

/// Format a millisecond Unix timestamp as an RFC3339 string.
fn format_ms_timestamp(ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .ok()
        .and_then(|datetime| datetime.format(&Rfc3339).ok())
        .unwrap_or_else(|| "invalid-timestamp".into())
}
