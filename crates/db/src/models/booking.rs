//! Booking models.

use lendit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bookings` table.
///
/// `status_id` values: 1 = WAITING, 2 = APPROVED, 3 = REJECTED
/// (see `lendit_core::booking::BookingStatus`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub item_id: DbId,
    pub booker_id: DbId,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub status_id: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a booking. The booker comes from the request
/// identity, not the body.
///
/// `start_at`/`end_at` stay optional here so an absent field fails the same
/// time-window gate as an illegal one, instead of being rejected at
/// deserialization with a different error shape.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub item_id: DbId,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
}

/// The nearest past or future non-rejected booking of an item, shown to its
/// owner. Derived per request; never persisted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LastNextBooking {
    pub id: DbId,
    pub booker_id: DbId,
}
