use crate::db::dblists::{self, ListsDb};
use crate::models::Item;
use sqlx::sqlite::SqliteConnection;
use thiserror::Error;
use tracing::{error, info};

/// Where a submitted item goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemTarget {
    /// Start a new list whose first item is the submitted one
    CreateNewList,
    /// Append to the list with this id
    AppendToList(i64),
}

/// Rejections shown back to the user next to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("You can't have an empty list item")]
    EmptyItem,
    #[error("You've already got this in your list")]
    DuplicateItem,
}

#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("List {0} not found")]
    ListNotFound(i64),

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Trim the submitted text and reject it if nothing is left
pub fn normalize_text(raw: &str) -> Result<&str, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyItem);
    }
    Ok(text)
}

/// Validate and persist one item.
///
/// All writes go through a single transaction that is only committed once the
/// item row is in, so a rejected new-list submission leaves no list behind.
/// The UNIQUE constraint on `(list_id, text)` is authoritative: a violation
/// raised by the insert maps to the same `DuplicateItem` as the lookup.
pub async fn save_item(db: &ListsDb, target: ItemTarget, raw_text: &str) -> Result<Item, ItemError> {
    let text = normalize_text(raw_text).map_err(|e| {
        info!("Rejected item for {:?}: {}", target, e);
        e
    })?;

    let mut tx = db.begin().await?;

    let list_id = match target {
        ItemTarget::CreateNewList => dblists::insert_list(&mut tx).await?.id,
        ItemTarget::AppendToList(list_id) => {
            if !dblists::list_exists(&mut tx, list_id).await? {
                return Err(ItemError::ListNotFound(list_id));
            }
            if dblists::item_exists(&mut tx, list_id, text).await? {
                info!("Rejected duplicate item for list {}", list_id);
                return Err(ValidationError::DuplicateItem.into());
            }
            list_id
        }
    };

    let item = insert_into_list(&mut tx, list_id, text).await?;

    tx.commit().await?;

    info!("Saved item {} to list {}", item.id, item.list_id);
    Ok(item)
}

/// Insert an item, reporting a violated `(list_id, text)` constraint as `DuplicateItem`
pub async fn insert_into_list(conn: &mut SqliteConnection, list_id: i64, text: &str) -> Result<Item, ItemError> {
    match dblists::insert_item(conn, list_id, text).await {
        Ok(item) => Ok(item),
        Err(e) if dblists::is_unique_violation(&e) => {
            info!("Unique constraint rejected duplicate item for list {}", list_id);
            Err(ValidationError::DuplicateItem.into())
        }
        Err(e) => {
            error!("Failed to insert item into list {}: {}", list_id, e);
            Err(e.into())
        }
    }
}
