//! Caller identity extractor.
//!
//! Every non-health endpoint identifies the acting user from the
//! `X-Sharer-User-Id` header. Authentication itself lives in the gateway in
//! front of this service; the header value is trusted here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lendit_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the acting user's id.
pub const SHARER_HEADER: &str = "x-sharer-user-id";

/// The acting user, extracted from the `X-Sharer-User-Id` header.
///
/// Use this as an extractor parameter in any handler that needs to know who
/// is calling:
///
/// ```ignore
/// async fn my_handler(SharerId(user_id): SharerId) -> AppResult<Json<()>> {
///     tracing::info!(user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SharerId(pub DbId);

impl FromRequestParts<AppState> for SharerId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("Missing X-Sharer-User-Id header".into()))?;

        let user_id: DbId = raw
            .parse()
            .map_err(|_| AppError::BadRequest("X-Sharer-User-Id must be a numeric id".into()))?;

        Ok(SharerId(user_id))
    }
}
