//! Query-time temporal classification of bookings.
//!
//! The state tag (ALL/CURRENT/PAST/FUTURE/WAITING/REJECTED) is not stored:
//! CURRENT/PAST/FUTURE are computed against "now" at query time, while
//! WAITING/REJECTED reuse the persisted status. Classification results must
//! never be cached -- the same booking drifts between buckets as the clock
//! advances.
//!
//! Dispatch is a pure mapping from `(state, viewpoint)` to a
//! [`QueryShape`], replacing the chain-of-responsibility object graph this
//! logic once used. Registering or removing a state cannot change the
//! behavior of the others, and there is no sentinel "empty list" default.

use std::str::FromStr;

use crate::booking::BookingStatus;
use crate::error::CoreError;

/// Query-time state tag, parsed from a caller-supplied token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl FromStr for BookingState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(CoreError::UnknownState(other.to_string())),
        }
    }
}

/// Whose bookings a classifier query is about: the ones a user made, or the
/// ones placed against items the user owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewpoint {
    Booker,
    Owner,
}

/// Temporal/status predicate over the booking store, relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalFilter {
    /// No additional predicate beyond the viewpoint.
    All,
    /// `start <= now AND end >= now`.
    Current,
    /// `end < now`.
    Past,
    /// `start > now`.
    Future,
    /// Persisted status equality.
    Status(BookingStatus),
}

/// Result ordering for a classifier query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOrder {
    StartDesc,
    EndDesc,
}

/// One cell of the classifier table: predicate plus ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryShape {
    pub filter: TemporalFilter,
    pub order: BookingOrder,
}

impl BookingState {
    /// Select the `(predicate, ordering)` pair for this state under the
    /// given viewpoint.
    ///
    /// The CURRENT ordering is asymmetric on purpose: the booker view
    /// orders by end descending while the owner view orders by start
    /// descending. This preserves the observable ordering of the system
    /// this one replaces; do not "fix" it without a product decision.
    pub fn shape(self, viewpoint: Viewpoint) -> QueryShape {
        let order = match (self, viewpoint) {
            (Self::Current, Viewpoint::Booker) => BookingOrder::EndDesc,
            _ => BookingOrder::StartDesc,
        };
        let filter = match self {
            Self::All => TemporalFilter::All,
            Self::Current => TemporalFilter::Current,
            Self::Past => TemporalFilter::Past,
            Self::Future => TemporalFilter::Future,
            Self::Waiting => TemporalFilter::Status(BookingStatus::Waiting),
            Self::Rejected => TemporalFilter::Status(BookingStatus::Rejected),
        };
        QueryShape { filter, order }
    }
}
