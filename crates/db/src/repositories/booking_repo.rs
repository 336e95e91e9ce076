//! Repository for the `bookings` table.
//!
//! Covers the twelve classifier query shapes (two viewpoints x six states),
//! point lookup, insert, and the status transition writes. The approve path
//! uses a compare-and-swap UPDATE conditioned on the previously-read status
//! so a booking leaves WAITING at most once under concurrent approvals.

use lendit_core::booking::{BookingStatus, StatusId};
use lendit_core::classify::{BookingOrder, QueryShape, TemporalFilter, Viewpoint};
use lendit_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::booking::{Booking, LastNextBooking};

/// Column list for bookings queries.
const BOOKING_COLUMNS: &str =
    "id, item_id, booker_id, start_at, end_at, status_id, created_at, updated_at";

/// Column list qualified for queries that join `items`.
const BOOKING_COLUMNS_QUALIFIED: &str = "b.id, b.item_id, b.booker_id, b.start_at, b.end_at, \
    b.status_id, b.created_at, b.updated_at";

/// Provides persistence for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new WAITING booking, returning the created row.
    pub async fn create(
        pool: &PgPool,
        booker_id: DbId,
        item_id: DbId,
        start_at: Timestamp,
        end_at: Timestamp,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (item_id, booker_id, start_at, end_at, status_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(item_id)
            .bind(booker_id)
            .bind(start_at)
            .bind(end_at)
            .bind(BookingStatus::Waiting.id())
            .fetch_one(pool)
            .await
    }

    /// Find a booking by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Compare-and-swap status write: moves the booking to `to` only if its
    /// status still equals `from`. Returns the updated row, or `None` when a
    /// concurrent transition won the race.
    pub async fn update_status_from(
        pool: &PgPool,
        id: DbId,
        from: StatusId,
        to: StatusId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings
             SET status_id = $3, updated_at = NOW()
             WHERE id = $1 AND status_id = $2
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Unconditional status write. Returns the updated row if the booking
    /// exists. Used by the unguarded reject path.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        to: StatusId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings
             SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Run one classifier query shape for a user under the given viewpoint.
    ///
    /// `offset` is a record offset, applied directly via OFFSET -- it is
    /// never converted to a page index.
    pub async fn list_classified(
        pool: &PgPool,
        viewpoint: Viewpoint,
        user_id: DbId,
        shape: QueryShape,
        now: Timestamp,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let (from_clause, scope) = match viewpoint {
            Viewpoint::Booker => ("FROM bookings b", "b.booker_id = $1"),
            Viewpoint::Owner => (
                "FROM bookings b JOIN items i ON i.id = b.item_id",
                "i.owner_id = $1",
            ),
        };
        let order = match shape.order {
            BookingOrder::StartDesc => "b.start_at DESC",
            BookingOrder::EndDesc => "b.end_at DESC",
        };

        match shape.filter {
            TemporalFilter::All => {
                let query = format!(
                    "SELECT {BOOKING_COLUMNS_QUALIFIED} {from_clause}
                     WHERE {scope}
                     ORDER BY {order} LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Booking>(&query)
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            TemporalFilter::Current | TemporalFilter::Past | TemporalFilter::Future => {
                let predicate = match shape.filter {
                    TemporalFilter::Current => "b.start_at <= $2 AND b.end_at >= $2",
                    TemporalFilter::Past => "b.end_at < $2",
                    _ => "b.start_at > $2",
                };
                let query = format!(
                    "SELECT {BOOKING_COLUMNS_QUALIFIED} {from_clause}
                     WHERE {scope} AND {predicate}
                     ORDER BY {order} LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, Booking>(&query)
                    .bind(user_id)
                    .bind(now)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            TemporalFilter::Status(status) => {
                let query = format!(
                    "SELECT {BOOKING_COLUMNS_QUALIFIED} {from_clause}
                     WHERE {scope} AND b.status_id = $2
                     ORDER BY {order} LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, Booking>(&query)
                    .bind(user_id)
                    .bind(status.id())
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// The item's nearest past non-rejected booking: `start < now`, ordered
    /// by end descending, first row.
    pub async fn last_for_item(
        pool: &PgPool,
        item_id: DbId,
        now: Timestamp,
    ) -> Result<Option<LastNextBooking>, sqlx::Error> {
        sqlx::query_as::<_, LastNextBooking>(
            "SELECT id, booker_id FROM bookings
             WHERE item_id = $1 AND status_id <> $2 AND start_at < $3
             ORDER BY end_at DESC
             LIMIT 1",
        )
        .bind(item_id)
        .bind(BookingStatus::Rejected.id())
        .bind(now)
        .fetch_optional(pool)
        .await
    }

    /// The item's nearest future non-rejected booking: `start > now`,
    /// ordered by end ascending, first row.
    pub async fn next_for_item(
        pool: &PgPool,
        item_id: DbId,
        now: Timestamp,
    ) -> Result<Option<LastNextBooking>, sqlx::Error> {
        sqlx::query_as::<_, LastNextBooking>(
            "SELECT id, booker_id FROM bookings
             WHERE item_id = $1 AND status_id <> $2 AND start_at > $3
             ORDER BY end_at ASC
             LIMIT 1",
        )
        .bind(item_id)
        .bind(BookingStatus::Rejected.id())
        .bind(now)
        .fetch_optional(pool)
        .await
    }
}
