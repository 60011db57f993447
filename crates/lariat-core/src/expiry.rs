use crate::link::LinkEntry;
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp};

/// Non-permanent links expire this many calendar days after creation.
pub const EXPIRY_DAYS: i64 = 7;

/// Liveness of a link at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Non-permanent and within its 7-day window.
    Live,
    /// Non-permanent and past its 7-day window.
    Expired,
    /// Permanent, never expires.
    Eternal,
}

/// The instant a link created at `created_at` stops being resolvable.
///
/// Adds 7 calendar days in UTC and compares full timestamps, so a link
/// created at 09:30 expires strictly after 09:30 seven days later.
pub fn expires_at(created_at: Timestamp) -> Timestamp {
    created_at
        .to_zoned(TimeZone::UTC)
        .checked_add(Span::new().days(EXPIRY_DAYS))
        .map(|zoned| zoned.timestamp())
        .unwrap_or(Timestamp::MAX)
}

/// Classifies a link at instant `now`.
///
/// The boundary is exclusive: at exactly 7 days the link is still `Live`.
pub fn classify(entry: &LinkEntry, now: Timestamp) -> LinkStatus {
    if entry.permanent {
        LinkStatus::Eternal
    } else if now > expires_at(entry.created_at) {
        LinkStatus::Expired
    } else {
        LinkStatus::Live
    }
}

/// Human-readable expiration label for dashboard and view pages.
///
/// `"Never"` for permanent links, `"Expired"` once past the window,
/// otherwise the expiry date.
pub fn expiration_label(entry: &LinkEntry, now: Timestamp) -> String {
    match classify(entry, now) {
        LinkStatus::Eternal => "Never".to_string(),
        LinkStatus::Expired => "Expired".to_string(),
        LinkStatus::Live => expires_at(entry.created_at)
            .to_zoned(TimeZone::UTC)
            .strftime("%Y-%m-%d")
            .to_string(),
    }
}
