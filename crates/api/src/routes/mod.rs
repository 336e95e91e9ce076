pub mod booking;
pub mod health;
pub mod item;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                         list, create
/// /users/{id}                    get, update, delete
///
/// /items                         list own, create
/// /items/search                  search available items
/// /items/{id}                    get (owner sees booking summary), update
///
/// /bookings                      list own bookings by state, create
/// /bookings/owner                list bookings on owned items by state
/// /bookings/{id}                 get, approve/reject (PATCH ?approved=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user::router())
        .nest("/items", item::router())
        .nest("/bookings", booking::router())
}
