//! Booking lifecycle: persisted status, transitions, and the creation-time
//! window gate.
//!
//! A booking is created WAITING and moves to APPROVED or REJECTED by the
//! item owner. Approval is guarded: an APPROVED booking cannot be approved
//! again. Rejection is intentionally unguarded and stays available from any
//! status (the owner can still withdraw an approval).

use crate::error::CoreError;
use crate::types::Timestamp;

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

/// Persisted booking status. Discriminants match the `status_id` column.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Waiting = 1,
    Approved = 2,
    Rejected = 3,
}

impl BookingStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Resolve a database status ID back to a status.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Waiting),
            2 => Some(Self::Approved),
            3 => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Wire name of the status (matches the query-time WAITING/REJECTED tags).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl From<BookingStatus> for StatusId {
    fn from(value: BookingStatus) -> Self {
        value as StatusId
    }
}

/// Check whether an owner decision is allowed from the current status.
///
/// Approval is only valid when the booking is not already APPROVED.
/// Rejection is always valid (unguarded, matching the lifecycle above).
pub fn decision_allowed(current: BookingStatus, approve: bool) -> bool {
    !(approve && current == BookingStatus::Approved)
}

/// Validate the requested booking window against "now".
///
/// All violations collapse into a single `InvalidTimeRange` gate:
/// end in the past, start after end, start equal to end, start in the past.
/// Callers map absent start/end to the same error before reaching here.
pub fn validate_time_range(
    start: Timestamp,
    end: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    if end < now || start > end || start == end || start < now {
        return Err(CoreError::InvalidTimeRange(
            "Incorrect start or end dates".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    // -----------------------------------------------------------------------
    // Status id round-trips
    // -----------------------------------------------------------------------

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(BookingStatus::Waiting.id(), 1);
        assert_eq!(BookingStatus::Approved.id(), 2);
        assert_eq!(BookingStatus::Rejected.id(), 3);
    }

    #[test]
    fn from_id_resolves_known_ids() {
        assert_eq!(BookingStatus::from_id(1), Some(BookingStatus::Waiting));
        assert_eq!(BookingStatus::from_id(2), Some(BookingStatus::Approved));
        assert_eq!(BookingStatus::from_id(3), Some(BookingStatus::Rejected));
    }

    #[test]
    fn from_id_rejects_unknown_ids() {
        assert_eq!(BookingStatus::from_id(0), None);
        assert_eq!(BookingStatus::from_id(4), None);
    }

    // -----------------------------------------------------------------------
    // Decision guard
    // -----------------------------------------------------------------------

    #[test]
    fn approving_waiting_is_allowed() {
        assert!(decision_allowed(BookingStatus::Waiting, true));
    }

    #[test]
    fn approving_approved_is_not_allowed() {
        assert!(!decision_allowed(BookingStatus::Approved, true));
    }

    #[test]
    fn approving_rejected_is_allowed() {
        // The only approval guard is against re-approval.
        assert!(decision_allowed(BookingStatus::Rejected, true));
    }

    #[test]
    fn rejecting_is_always_allowed() {
        assert!(decision_allowed(BookingStatus::Waiting, false));
        assert!(decision_allowed(BookingStatus::Approved, false));
        assert!(decision_allowed(BookingStatus::Rejected, false));
    }

    // -----------------------------------------------------------------------
    // Time window gate
    // -----------------------------------------------------------------------

    #[test]
    fn future_window_is_valid() {
        let now = Utc::now();
        let start = now + Duration::days(1);
        let end = now + Duration::days(2);
        assert!(validate_time_range(start, end, now).is_ok());
    }

    #[test]
    fn end_in_the_past_is_invalid() {
        let now = Utc::now();
        let start = now - Duration::days(2);
        let end = now - Duration::days(1);
        assert!(validate_time_range(start, end, now).is_err());
    }

    #[test]
    fn start_after_end_is_invalid() {
        let now = Utc::now();
        let start = now + Duration::days(2);
        let end = now + Duration::days(1);
        assert!(validate_time_range(start, end, now).is_err());
    }

    #[test]
    fn start_equal_to_end_is_invalid() {
        let now = Utc::now();
        let start = now + Duration::days(1);
        assert!(validate_time_range(start, start, now).is_err());
    }

    #[test]
    fn start_in_the_past_is_invalid() {
        let now = Utc::now();
        let start = now - Duration::hours(1);
        let end = now + Duration::days(1);
        assert!(validate_time_range(start, end, now).is_err());
    }
}
