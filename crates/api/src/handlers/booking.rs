//! Handlers for the `/bookings` resource: the booking lifecycle and the
//! temporal classifier endpoints.
//!
//! All endpoints identify the caller via [`SharerId`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use lendit_core::booking::{decision_allowed, validate_time_range, BookingStatus};
use lendit_core::classify::{BookingState, Viewpoint};
use lendit_core::error::CoreError;
use lendit_core::page::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use lendit_core::types::DbId;
use lendit_db::models::booking::{Booking, CreateBooking};
use lendit_db::models::item::Item;
use lendit_db::repositories::{BookingRepo, ItemRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::identity::SharerId;
use crate::query::{BookingListParams, DecisionParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a booking and its item, or fail with `NotFound`.
async fn find_booking_with_item(
    pool: &sqlx::PgPool,
    booking_id: DbId,
) -> AppResult<(Booking, Item)> {
    let booking = BookingRepo::find_by_id(pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))?;
    let item = ItemRepo::find_by_id(pool, booking.item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: booking.item_id,
        }))?;
    Ok((booking, item))
}

/// Resolve the persisted status id, treating an out-of-range value as a
/// data corruption error.
fn status_of(booking: &Booking) -> AppResult<BookingStatus> {
    BookingStatus::from_id(booking.status_id).ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "booking {} has invalid status id {}",
            booking.id, booking.status_id
        )))
    })
}

/// The single empty-result policy point for the classifier endpoints:
/// a query that matches zero bookings is an error, not an empty page.
/// Flip the contract here if that ever changes.
fn require_non_empty(bookings: Vec<Booking>) -> AppResult<Vec<Booking>> {
    if bookings.is_empty() {
        return Err(AppError::Core(CoreError::NoBookingsFound));
    }
    Ok(bookings)
}

/// Parse the state token. An absent parameter means ALL; a present but
/// unrecognized token is an error.
fn parse_state(token: Option<&str>) -> AppResult<BookingState> {
    match token {
        None => Ok(BookingState::All),
        Some(t) => Ok(t.parse::<BookingState>().map_err(AppError::Core)?),
    }
}

/// Run one classifier query for the given viewpoint.
async fn list_classified(
    state: &AppState,
    viewpoint: Viewpoint,
    user_id: DbId,
    params: &BookingListParams,
) -> AppResult<Vec<Booking>> {
    let tag = parse_state(params.state.as_deref())?;
    let limit = clamp_limit(params.size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.from);

    // "Now" is sampled per request; the same booking may land in a
    // different bucket on the next call.
    let now = Utc::now();
    let bookings = BookingRepo::list_classified(
        &state.pool,
        viewpoint,
        user_id,
        tag.shape(viewpoint),
        now,
        limit,
        offset,
    )
    .await?;
    require_non_empty(bookings)
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings
///
/// Create a booking for an item. The booking starts in WAITING status and
/// awaits the item owner's decision. Returns 201 with the created booking.
pub async fn create_booking(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, input.item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: input.item_id,
        }))?;

    if !item.available {
        return Err(AppError::Core(CoreError::ItemUnavailable(item.id)));
    }

    // One gate for every window violation, absent fields included.
    let now = Utc::now();
    let (Some(start_at), Some(end_at)) = (input.start_at, input.end_at) else {
        return Err(AppError::Core(CoreError::InvalidTimeRange(
            "Incorrect start or end dates".into(),
        )));
    };
    validate_time_range(start_at, end_at, now).map_err(AppError::Core)?;

    let booker = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    if item.owner_id == booker.id {
        return Err(AppError::Core(CoreError::SelfBooking));
    }

    let booking =
        BookingRepo::create(&state.pool, booker.id, item.id, start_at, end_at).await?;

    tracing::info!(
        booking_id = booking.id,
        item_id = item.id,
        booker_id = booker.id,
        "Booking created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

// ---------------------------------------------------------------------------
// Approve / reject
// ---------------------------------------------------------------------------

/// PATCH /api/v1/bookings/{id}?approved=bool
///
/// Owner decision on a WAITING booking. Approval is guarded: re-approving
/// an APPROVED booking is a 409, and two concurrent approvals resolve so
/// that exactly one succeeds. Rejection is unguarded and always available.
pub async fn update_booking(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Path(booking_id): Path<DbId>,
    Query(params): Query<DecisionParams>,
) -> AppResult<impl IntoResponse> {
    let (booking, item) = find_booking_with_item(&state.pool, booking_id).await?;

    if item.owner_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "User is not the owner of the booked item".into(),
        )));
    }

    let current = status_of(&booking)?;
    if !decision_allowed(current, params.approved) {
        return Err(AppError::Core(CoreError::AlreadyApproved(booking.id)));
    }

    let updated = if params.approved {
        approve_serialized(&state.pool, booking_id, current).await?
    } else {
        BookingRepo::set_status(&state.pool, booking_id, BookingStatus::Rejected.id())
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Booking",
                id: booking_id,
            }))?
    };

    tracing::info!(
        booking_id,
        owner_id = user_id,
        approved = params.approved,
        "Booking decision recorded",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// Approve with a compare-and-swap conditioned on the previously-read
/// status, so a booking leaves WAITING at most once. On a lost race the
/// guard is re-applied against the fresh status: if the winner approved,
/// the loser observes `AlreadyApproved`.
async fn approve_serialized(
    pool: &sqlx::PgPool,
    booking_id: DbId,
    read_status: BookingStatus,
) -> AppResult<Booking> {
    let cas = BookingRepo::update_status_from(
        pool,
        booking_id,
        read_status.id(),
        BookingStatus::Approved.id(),
    )
    .await?;
    if let Some(booking) = cas {
        return Ok(booking);
    }

    let fresh = BookingRepo::find_by_id(pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))?;
    let fresh_status = status_of(&fresh)?;
    if !decision_allowed(fresh_status, true) {
        return Err(AppError::Core(CoreError::AlreadyApproved(booking_id)));
    }

    // The status moved under us to something still approvable (a concurrent
    // reject). One more conditioned attempt; give up rather than spin.
    BookingRepo::update_status_from(
        pool,
        booking_id,
        fresh_status.id(),
        BookingStatus::Approved.id(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "booking {booking_id} status changed twice during approval"
        )))
    })
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/v1/bookings/{id}
///
/// Fetch a single booking. Only the booker and the item owner may see it.
pub async fn get_booking(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Path(booking_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (booking, item) = find_booking_with_item(&state.pool, booking_id).await?;

    if booking.booker_id != user_id && item.owner_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "No bookings for this user".into(),
        )));
    }

    Ok(Json(DataResponse { data: booking }))
}

// ---------------------------------------------------------------------------
// Classifier endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/bookings?state=&from=&size=
///
/// List the caller's own bookings bucketed by the requested state tag.
pub async fn list_bookings_by_user(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Query(params): Query<BookingListParams>,
) -> AppResult<impl IntoResponse> {
    let bookings = list_classified(&state, Viewpoint::Booker, user_id, &params).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/bookings/owner?state=&from=&size=
///
/// List bookings placed against items the caller owns, bucketed by the
/// requested state tag.
pub async fn list_bookings_by_owner(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Query(params): Query<BookingListParams>,
) -> AppResult<impl IntoResponse> {
    let bookings = list_classified(&state, Viewpoint::Owner, user_id, &params).await?;
    Ok(Json(DataResponse { data: bookings }))
}
