//! Route definitions for items.

use axum::routing::get;
use axum::Router;

use crate::handlers::item;
use crate::state::AppState;

/// Item routes, nested under `/items`.
///
/// ```text
/// POST   /                 create_item
/// GET    /                 list_own_items (with booking summaries)
/// GET    /search           search_items (?text=)
/// GET    /{item_id}        get_item
/// PATCH  /{item_id}        update_item (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(item::list_own_items).post(item::create_item))
        .route("/search", get(item::search_items))
        .route("/{item_id}", get(item::get_item).patch(item::update_item))
}
