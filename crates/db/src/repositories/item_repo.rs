//! Repository for the `items` table.

use lendit_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{CreateItem, Item, UpdateItem};

/// Column list for items queries.
const ITEM_COLUMNS: &str = "id, owner_id, name, description, available, created_at, updated_at";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (owner_id, name, description, available)
             VALUES ($1, $2, $3, $4)
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.available)
            .fetch_one(pool)
            .await
    }

    /// Find an item by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all items owned by a user, ordered by id ascending.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Item>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row if the item exists.
    ///
    /// Ownership is checked by the caller; this method only writes.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 available = COALESCE($4, available),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.available)
            .fetch_optional(pool)
            .await
    }

    /// Search available items whose name or description contains `text`,
    /// case-insensitively. Blank text is handled by the caller (empty list,
    /// no query).
    pub async fn search_available(pool: &PgPool, text: &str) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items
             WHERE available
               AND (name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(text)
            .fetch_all(pool)
            .await
    }
}
