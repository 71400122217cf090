//! Elapsed and duration strings for deploy records.
//!
//! Pure functions: the `*_at` variants take the current time explicitly, the
//! others read the system clock. Formatting never fails; unparseable input is
//! returned as-is.

use crate::provider::DeployRecord;

/// Record field holding the build start, unix seconds.
pub const BUILD_STARTED: &str = "build_started";

/// Record field holding the deploy finish, unix seconds.
pub const DEPLOY_FINISHED: &str = "deploy_finished";

/// Current unix time in seconds.
pub fn now_epoch() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Plain decimal `i64` only. Underscore separators and values outside the
/// `i64` range are not timestamps and get echoed back unchanged.
fn parse_epoch(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// `"{s}s"`, `"{m}m {s}s"` or `"{h}h {m}m"`; negative input is clamped to zero.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// Time from `start_epoch` to `now`.
pub fn elapsed_since_at(start_epoch: &str, now: i64) -> String {
    match parse_epoch(start_epoch) {
        Some(start) => format_duration(now.saturating_sub(start)),
        None => start_epoch.to_string(),
    }
}

/// Time from `start_epoch` to now.
pub fn elapsed_since(start_epoch: &str) -> String {
    elapsed_since_at(start_epoch, now_epoch())
}

/// The elapsed/duration column for `record`, evaluated at `now`.
///
/// Finished deploys show their build-to-finish duration; running ones show
/// time since the build started with an `" ago"` suffix.
pub fn format_elapsed_at(record: &DeployRecord, now: i64) -> String {
    let build_started = match record.get(BUILD_STARTED) {
        Some(value) if !value.is_empty() => value,
        _ => return String::new(),
    };
    let Some(start) = parse_epoch(&build_started) else {
        return build_started.into_owned();
    };

    let finished = record
        .get(DEPLOY_FINISHED)
        .filter(|value| !value.is_empty())
        .and_then(|value| parse_epoch(&value));
    match finished {
        Some(end) => format_duration(end.saturating_sub(start)),
        None => format!("{} ago", elapsed_since_at(&build_started, now)),
    }
}

/// The elapsed/duration column for `record`, evaluated now.
pub fn format_elapsed(record: &DeployRecord) -> String {
    format_elapsed_at(record, now_epoch())
}
