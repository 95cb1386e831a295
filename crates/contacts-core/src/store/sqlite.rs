// # SQLite Contact Store
//
// Durable implementation of ContactStore on a single SQLite file.
//
// ## Schema
//
// The table is created on open if it does not exist. Uniqueness and length
// limits are declared in the schema, so SQLite itself rejects bad writes and
// its error messages are what API clients see.
//
// ## Timestamps
//
// `created_at` defaults to an RFC 3339 string with millisecond precision.
// Listing orders by it, newest first, and falls back to the id for rows
// created within the same millisecond.
//
// ## Search
//
// Filters are matched in Rust with Unicode lower-casing, the same rule the
// memory store applies. SQLite's own `LIKE` only folds ASCII letters.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::Error;
use crate::model::{Contact, ContactDraft, ContactId, normalize_filter};
use crate::traits::contact_store::ContactStore;

/// Connections kept by a file-backed pool
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    contact_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50),
    phone VARCHAR(20) NOT NULL UNIQUE,
    email VARCHAR(100) UNIQUE,
    address VARCHAR(255),
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    CONSTRAINT first_name_length CHECK (length(first_name) <= 50),
    CONSTRAINT last_name_length CHECK (last_name IS NULL OR length(last_name) <= 50),
    CONSTRAINT phone_length CHECK (length(phone) <= 20),
    CONSTRAINT email_length CHECK (email IS NULL OR length(email) <= 100),
    CONSTRAINT address_length CHECK (address IS NULL OR length(address) <= 255)
)
"#;

const COLUMNS: &str = "contact_id, first_name, last_name, phone, email, address, created_at";

/// SQLite-backed contact store
///
/// # Example
///
/// ```rust,no_run
/// use contacts_core::{ContactDraft, ContactStore, SqliteContactStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SqliteContactStore::open("./contacts.db").await?;
///     let ada = store.insert(ContactDraft::new("Ada", "555-0100")).await?;
///     assert!(ada.id > 0);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    /// Open (or create) a store file and make sure the schema exists
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::config(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::info!("Opened contact store at {}", path.display());
        Self::with_pool(pool).await
    }

    /// Open a private in-memory database
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the
    /// pool is pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if needed
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, Error> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Close the underlying pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn list(&self, filter: Option<&str>) -> Result<Vec<Contact>, Error> {
        let rows = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, contact_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let contacts: Vec<Contact> = match normalize_filter(filter).map(str::to_lowercase) {
            None => rows,
            Some(needle) => rows.into_iter().filter(|c| c.matches(&needle)).collect(),
        };

        tracing::debug!("Listed {} contact(s) (filter={:?})", contacts.len(), filter);
        Ok(contacts)
    }

    async fn get(&self, id: ContactId) -> Result<Option<Contact>, Error> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {COLUMNS} FROM contacts WHERE contact_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contact)
    }

    async fn insert(&self, draft: ContactDraft) -> Result<Contact, Error> {
        let draft = draft.normalized();

        let contact = sqlx::query_as::<_, Contact>(&format!(
            "INSERT INTO contacts (first_name, last_name, phone, email, address) \
             VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.phone)
        .bind(&draft.email)
        .bind(&draft.address)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Inserted contact {}", contact.id);
        Ok(contact)
    }

    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<(), Error> {
        let draft = draft.normalized();

        let result = sqlx::query(
            "UPDATE contacts SET first_name = ?, last_name = ?, phone = ?, email = ?, address = ? \
             WHERE contact_id = ?",
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.phone)
        .bind(&draft.email)
        .bind(&draft.address)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("Update of missing contact {} is a no-op", id);
        }
        Ok(())
    }

    async fn delete(&self, id: ContactId) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE contact_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted {} row(s) for contact {}", result.rows_affected(), id);
        Ok(())
    }

    async fn count(&self) -> Result<usize, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
