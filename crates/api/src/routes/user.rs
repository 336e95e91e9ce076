//! Route definitions for users.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// User routes, nested under `/users`.
///
/// ```text
/// POST   /                 create_user
/// GET    /                 list_users
/// GET    /{user_id}        get_user
/// PATCH  /{user_id}        update_user
/// DELETE /{user_id}        delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users).post(user::create_user))
        .route(
            "/{user_id}",
            get(user::get_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
}
