//! Handlers for the `/items` resource.
//!
//! Item detail views carry the nearest-past/nearest-future booking summary,
//! but only when the viewer owns the item.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use lendit_core::error::CoreError;
use lendit_core::types::DbId;
use lendit_db::models::item::{CreateItem, Item, ItemDetail, UpdateItem};
use lendit_db::repositories::{BookingRepo, ItemRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::identity::SharerId;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Attach the owner-only booking summary to an item.
async fn with_summary(
    pool: &sqlx::PgPool,
    item: Item,
    viewer_id: DbId,
) -> AppResult<ItemDetail> {
    let (last_booking, next_booking) = if item.owner_id == viewer_id {
        let now = Utc::now();
        let last = BookingRepo::last_for_item(pool, item.id, now).await?;
        let next = BookingRepo::next_for_item(pool, item.id, now).await?;
        (last, next)
    } else {
        (None, None)
    };
    Ok(ItemDetail {
        item,
        last_booking,
        next_booking,
    })
}

/// POST /api/v1/items
///
/// Create an item owned by the caller. Returns 201 with the created item.
pub async fn create_item(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // The owner must exist; a dangling header id is a 404, not a FK error.
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let item = ItemRepo::create(&state.pool, user_id, &input).await?;
    tracing::info!(item_id = item.id, owner_id = user_id, "Item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/items/{id}
///
/// Fetch one item. The booking summary appears only for the owner.
pub async fn get_item(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;
    let detail = with_summary(&state.pool, item, user_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/items
///
/// List the caller's own items, each with its booking summary.
pub async fn list_own_items(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = ItemRepo::list_by_owner(&state.pool, user_id).await?;
    let mut details = Vec::with_capacity(items.len());
    for item in items {
        details.push(with_summary(&state.pool, item, user_id).await?);
    }
    Ok(Json(DataResponse { data: details }))
}

/// PATCH /api/v1/items/{id}
///
/// Partial update, owner only.
pub async fn update_item(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    if item.owner_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can edit an item".into(),
        )));
    }

    let updated = ItemRepo::update(&state.pool, item_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/items/search?text=
///
/// Case-insensitive search over available items. Blank text short-circuits
/// to an empty list without touching the database.
pub async fn search_items(
    SharerId(_user_id): SharerId,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let text = params.text.trim();
    let items = if text.is_empty() {
        Vec::new()
    } else {
        ItemRepo::search_available(&state.pool, text).await?
    };
    Ok(Json(DataResponse { data: items }))
}
