//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the booking classifier endpoints
/// (`?state=&from=&size=`).
///
/// `state` defaults to `ALL` when absent; a present-but-unknown token is an
/// error. `from` is a record offset and `size` a limit, clamped via
/// `lendit_core::page`.
#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Query parameters for item search (`?text=`).
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub text: String,
}

/// Query parameters for the booking decision endpoint (`?approved=`).
#[derive(Debug, Deserialize)]
pub struct DecisionParams {
    pub approved: bool,
}
