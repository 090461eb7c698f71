use crate::models::{Item, List};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
};
use sqlx::{Error as SqlxError, Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

const CREATE_LIST_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS list (
        id INTEGER PRIMARY KEY AUTOINCREMENT
    )
"#;

const CREATE_ITEM_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL CHECK (length(trim(text)) > 0),
        list_id INTEGER NOT NULL REFERENCES list(id),
        UNIQUE (list_id, text)
    )
"#;

/// Database connection pool holding the `list` and `item` tables
pub struct ListsDb {
    pool: SqlitePool,
}

impl ListsDb {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `database_url` - SQLite connection string, the file is created if missing
    /// * `max_connections` - Upper bound on pooled connections
    ///
    /// # Returns
    /// * `Result<Self, SqlxError>` - Database connection pool or error
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, SqlxError> {
        info!("Connecting to database...");

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5)); // Writers queue on the lock this long

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600)) // Close idle connections after 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // Recycle connections after 30 minutes
            .connect_with(options)
            .await?;

        info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Open a private in-memory database with the schema applied.
    ///
    /// Every connection to `sqlite::memory:` is a distinct database, so the pool
    /// is pinned to a single connection that is never recycled.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, SqlxError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    /// Create the tables if they do not exist yet
    pub async fn init_schema(&self) -> Result<(), SqlxError> {
        sqlx::query(CREATE_LIST_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_ITEM_TABLE).execute(&self.pool).await?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Get a reference to the connection pool
    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a write transaction. Dropping it without `commit` rolls everything back.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, so concurrent writers wait
    /// out the busy timeout instead of failing to upgrade a read lock mid-transaction.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, SqlxError> {
        let pool_idle = self.pool.num_idle() as u32;
        let pool_size = self.pool.size();
        debug!(
            "Beginning transaction. Pool connections: {} idle, {} in use",
            pool_idle,
            pool_size.saturating_sub(pool_idle)
        );

        match self.pool.begin_with("BEGIN IMMEDIATE").await {
            Ok(tx) => Ok(tx),
            Err(e) => {
                error!(
                    "Failed to acquire connection from pool: {}. Pool state: {} idle, {} total",
                    e,
                    self.pool.num_idle(),
                    self.pool.size()
                );
                Err(e)
            }
        }
    }

    /// Run a trivial query to check the database answers
    pub async fn ping(&self) -> Result<(), SqlxError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Get a list by its id
    ///
    /// # Returns
    /// * `Result<Option<List>, SqlxError>` - The list, or None if no such list exists
    pub async fn get_list(&self, list_id: i64) -> Result<Option<List>, SqlxError> {
        sqlx::query_as::<_, List>("SELECT id FROM list WHERE id = ?")
            .bind(list_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Items of a list in insertion order
    pub async fn list_items(&self, list_id: i64) -> Result<Vec<Item>, SqlxError> {
        sqlx::query_as::<_, Item>("SELECT id, text, list_id FROM item WHERE list_id = ? ORDER BY id ASC")
            .bind(list_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Number of stored lists
    pub async fn count_lists(&self) -> Result<i64, SqlxError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM list")
            .fetch_one(&self.pool)
            .await
    }

    /// Number of stored items across all lists
    pub async fn count_items(&self) -> Result<i64, SqlxError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM item")
            .fetch_one(&self.pool)
            .await
    }
}

// Statements below run on a caller-supplied connection so that they can be
// composed inside one transaction.

/// Insert an empty list and return it
pub async fn insert_list(conn: &mut SqliteConnection) -> Result<List, SqlxError> {
    let result = sqlx::query("INSERT INTO list DEFAULT VALUES")
        .execute(&mut *conn)
        .await?;
    let list = List { id: result.last_insert_rowid() };
    debug!("Inserted list {}", list.id);
    Ok(list)
}

/// Insert an item. A duplicate `(list_id, text)` pair fails with a unique violation.
pub async fn insert_item(conn: &mut SqliteConnection, list_id: i64, text: &str) -> Result<Item, SqlxError> {
    let result = sqlx::query("INSERT INTO item (text, list_id) VALUES (?, ?)")
        .bind(text)
        .bind(list_id)
        .execute(&mut *conn)
        .await?;
    let item = Item {
        id: result.last_insert_rowid(),
        text: text.to_string(),
        list_id,
    };
    debug!("Inserted item {} into list {}", item.id, list_id);
    Ok(item)
}

pub async fn list_exists(conn: &mut SqliteConnection, list_id: i64) -> Result<bool, SqlxError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM list WHERE id = ?)")
        .bind(list_id)
        .fetch_one(&mut *conn)
        .await
}

pub async fn item_exists(conn: &mut SqliteConnection, list_id: i64, text: &str) -> Result<bool, SqlxError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM item WHERE list_id = ? AND text = ?)")
        .bind(list_id)
        .bind(text)
        .fetch_one(&mut *conn)
        .await
}

/// True when the error is a violated UNIQUE constraint
pub fn is_unique_violation(e: &SqlxError) -> bool {
    match e {
        SqlxError::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saving_and_retrieving_items() {
        let db = ListsDb::in_memory().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let list = insert_list(&mut tx).await.unwrap();
        insert_item(&mut tx, list.id, "The first (ever) list item").await.unwrap();
        insert_item(&mut tx, list.id, "Item the second").await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(db.count_lists().await.unwrap(), 1);
        assert_eq!(db.get_list(list.id).await.unwrap(), Some(list.clone()));

        let items = db.list_items(list.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "The first (ever) list item");
        assert_eq!(items[0].list_id, list.id);
        assert_eq!(items[1].text, "Item the second");
        assert_eq!(items[1].list_id, list.id);
    }

    #[tokio::test]
    async fn items_come_back_in_insertion_order() {
        let db = ListsDb::in_memory().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let list = insert_list(&mut tx).await.unwrap();
        let first = insert_item(&mut tx, list.id, "item 1").await.unwrap();
        let second = insert_item(&mut tx, list.id, "item 2").await.unwrap();
        let third = insert_item(&mut tx, list.id, "item 3").await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(db.list_items(list.id).await.unwrap(), vec![first, second, third]);
    }

    #[tokio::test]
    async fn storage_rejects_duplicate_items_in_one_list() {
        let db = ListsDb::in_memory().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let list = insert_list(&mut tx).await.unwrap();
        insert_item(&mut tx, list.id, "blah").await.unwrap();

        let err = insert_item(&mut tx, list.id, "blah").await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn same_text_is_allowed_in_different_lists() {
        let db = ListsDb::in_memory().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let first = insert_list(&mut tx).await.unwrap();
        let second = insert_list(&mut tx).await.unwrap();
        insert_item(&mut tx, first.id, "blah").await.unwrap();
        insert_item(&mut tx, second.id, "blah").await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(db.count_items().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn storage_rejects_blank_text_and_unknown_lists() {
        let db = ListsDb::in_memory().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let list = insert_list(&mut tx).await.unwrap();

        assert!(insert_item(&mut tx, list.id, "   ").await.is_err());
        assert!(insert_item(&mut tx, list.id + 100, "orphan").await.is_err());
    }

    #[tokio::test]
    async fn dropped_transaction_leaves_nothing_behind() {
        let db = ListsDb::in_memory().await.unwrap();
        {
            let mut tx = db.begin().await.unwrap();
            let list = insert_list(&mut tx).await.unwrap();
            insert_item(&mut tx, list.id, "never committed").await.unwrap();
        }

        assert_eq!(db.count_lists().await.unwrap(), 0);
        assert_eq!(db.count_items().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn existence_checks() {
        let db = ListsDb::in_memory().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let list = insert_list(&mut tx).await.unwrap();
        insert_item(&mut tx, list.id, "present").await.unwrap();

        assert!(list_exists(&mut tx, list.id).await.unwrap());
        assert!(!list_exists(&mut tx, list.id + 1).await.unwrap());
        assert!(item_exists(&mut tx, list.id, "present").await.unwrap());
        assert!(!item_exists(&mut tx, list.id, "absent").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_list_is_none() {
        let db = ListsDb::in_memory().await.unwrap();
        assert_eq!(db.get_list(7).await.unwrap(), None);
        assert!(db.list_items(7).await.unwrap().is_empty());
        db.ping().await.unwrap();
    }
}
