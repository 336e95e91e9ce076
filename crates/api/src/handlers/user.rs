//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lendit_core::error::CoreError;
use lendit_core::types::DbId;
use lendit_db::models::user::{CreateUser, UpdateUser};
use lendit_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users
///
/// Create a user. A duplicate email hits `uq_users_email` and maps to 409.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// PATCH /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let user = UserRepo::update(&state.pool, user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/users/{id}
///
/// Returns 204. Owned items and their bookings cascade away with the user.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = UserRepo::delete(&state.pool, user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
