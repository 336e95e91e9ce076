//! Integration tests for booking status writes: the compare-and-swap
//! approve path and the unconditional reject path.

use chrono::{Duration, Utc};
use lendit_core::booking::BookingStatus;
use sqlx::PgPool;

use lendit_db::models::booking::Booking;
use lendit_db::models::item::CreateItem;
use lendit_db::models::user::CreateUser;
use lendit_db::repositories::{BookingRepo, ItemRepo, UserRepo};

async fn seed_waiting_booking(pool: &PgPool) -> Booking {
    let owner = UserRepo::create(
        pool,
        &CreateUser {
            name: "owner".into(),
            email: "owner@example.com".into(),
        },
    )
    .await
    .unwrap();
    let booker = UserRepo::create(
        pool,
        &CreateUser {
            name: "booker".into(),
            email: "booker@example.com".into(),
        },
    )
    .await
    .unwrap();
    let item = ItemRepo::create(
        pool,
        owner.id,
        &CreateItem {
            name: "drill".into(),
            description: "cordless drill".into(),
            available: true,
        },
    )
    .await
    .unwrap();

    let now = Utc::now();
    BookingRepo::create(
        pool,
        booker.id,
        item.id,
        now + Duration::days(1),
        now + Duration::days(2),
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bookings_are_created_waiting(pool: PgPool) {
    let booking = seed_waiting_booking(&pool).await;
    assert_eq!(booking.status_id, BookingStatus::Waiting.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cas_approve_succeeds_once(pool: PgPool) {
    let booking = seed_waiting_booking(&pool).await;

    let approved = BookingRepo::update_status_from(
        &pool,
        booking.id,
        BookingStatus::Waiting.id(),
        BookingStatus::Approved.id(),
    )
    .await
    .unwrap();
    assert_eq!(approved.unwrap().status_id, BookingStatus::Approved.id());

    // A second writer that read WAITING loses the race: zero rows match.
    let lost = BookingRepo::update_status_from(
        &pool,
        booking.id,
        BookingStatus::Waiting.id(),
        BookingStatus::Approved.id(),
    )
    .await
    .unwrap();
    assert!(lost.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_is_unconditional(pool: PgPool) {
    let booking = seed_waiting_booking(&pool).await;

    BookingRepo::update_status_from(
        &pool,
        booking.id,
        BookingStatus::Waiting.id(),
        BookingStatus::Approved.id(),
    )
    .await
    .unwrap();

    // Rejecting an already-approved booking is allowed.
    let rejected = BookingRepo::set_status(&pool, booking.id, BookingStatus::Rejected.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rejected.status_id, BookingStatus::Rejected.id());

    // Rejecting again is also allowed (idempotent write, no guard).
    let again = BookingRepo::set_status(&pool, booking.id, BookingStatus::Rejected.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.status_id, BookingStatus::Rejected.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cas_on_missing_booking_returns_none(pool: PgPool) {
    let updated = BookingRepo::update_status_from(
        &pool,
        999_999,
        BookingStatus::Waiting.id(),
        BookingStatus::Approved.id(),
    )
    .await
    .unwrap();
    assert!(updated.is_none());
}
