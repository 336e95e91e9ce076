//! Item models, including the owner-only booking summary attached to item
//! detail views.

use lendit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::booking::LastNextBooking;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item. The owner comes from the request identity,
/// not the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub available: bool,
}

/// DTO for partially updating an item.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Item detail with the nearest-past/nearest-future booking summary.
///
/// The summary fields are populated only when the viewer owns the item;
/// for everyone else they are omitted from the serialized response.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<LastNextBooking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_booking: Option<LastNextBooking>,
}
