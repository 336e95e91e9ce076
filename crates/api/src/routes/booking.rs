//! Route definitions for the booking lifecycle and classifier endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Booking routes, nested under `/bookings`.
///
/// ```text
/// POST   /                 create_booking
/// GET    /                 list_bookings_by_user (?state=&from=&size=)
/// GET    /owner            list_bookings_by_owner (?state=&from=&size=)
/// GET    /{booking_id}     get_booking
/// PATCH  /{booking_id}     update_booking (?approved=bool)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(booking::create_booking).get(booking::list_bookings_by_user),
        )
        .route("/owner", get(booking::list_bookings_by_owner))
        .route(
            "/{booking_id}",
            get(booking::get_booking).patch(booking::update_booking),
        )
}
