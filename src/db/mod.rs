// src/db/mod.rs
use uuid::Uuid;
use crate::models::AdminAccount;
use thiserror::Error;

pub mod postgres;
pub mod sqlite;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(String),

    #[error("Account not found")]
    NotFound,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

// Convert database-specific errors to our DbError
impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        DbError::SqlxError(error.to_string())
    }
}

// Credential store backend - implemented by each database type
pub trait DatabaseBackend: Send + Sync {
    // Initialize the database connection and create the accounts table
    async fn init(&mut self, connection_string: &str) -> Result<(), DbError>;

    // Insert a new account, or replace the hash of an existing one.
    // Returns (id, was_created).
    async fn upsert_password_hash(
        &self,
        email: &str,
        role: &str,
        password_hash: &str,
    ) -> Result<(Uuid, bool), DbError>;

    async fn get_account(&self, email: &str) -> Result<Option<AdminAccount>, DbError>;

    async fn list_accounts(&self) -> Result<Vec<AdminAccount>, DbError>;

    async fn delete_account(&self, email: &str) -> Result<(), DbError>;
}

// Enum to hold specific backend implementations
#[derive(Debug, Clone)]
pub enum DatabaseType {
    Postgres(postgres::PostgresBackend),
    Sqlite(sqlite::SqliteBackend),
}

// The main database struct that uses the enum pattern instead of trait objects
#[derive(Debug, Clone)]
pub struct Database {
    pub backend: DatabaseType,
}

impl Database {
    // Connect to the store named by the URL. A failed connection is an error,
    // never a silent switch to another store.
    pub async fn new(connection_string: &str) -> Result<Self, DbError> {
        if connection_string.starts_with("sqlite:") {
            let mut backend = sqlite::SqliteBackend::new();
            backend.init(connection_string).await?;
            Ok(Self {
                backend: DatabaseType::Sqlite(backend),
            })
        } else {
            let mut backend = postgres::PostgresBackend::new();
            backend.init(connection_string).await?;
            Ok(Self {
                backend: DatabaseType::Postgres(backend),
            })
        }
    }

    // Delegate methods to the appropriate backend type
    pub async fn upsert_password_hash(
        &self,
        email: &str,
        role: &str,
        password_hash: &str,
    ) -> Result<(Uuid, bool), DbError> {
        match &self.backend {
            DatabaseType::Postgres(backend) => backend.upsert_password_hash(email, role, password_hash).await,
            DatabaseType::Sqlite(backend) => backend.upsert_password_hash(email, role, password_hash).await,
        }
    }

    pub async fn get_account(&self, email: &str) -> Result<Option<AdminAccount>, DbError> {
        match &self.backend {
            DatabaseType::Postgres(backend) => backend.get_account(email).await,
            DatabaseType::Sqlite(backend) => backend.get_account(email).await,
        }
    }

    pub async fn list_accounts(&self) -> Result<Vec<AdminAccount>, DbError> {
        match &self.backend {
            DatabaseType::Postgres(backend) => backend.list_accounts().await,
            DatabaseType::Sqlite(backend) => backend.list_accounts().await,
        }
    }

    pub async fn delete_account(&self, email: &str) -> Result<(), DbError> {
        match &self.backend {
            DatabaseType::Postgres(backend) => backend.delete_account(email).await,
            DatabaseType::Sqlite(backend) => backend.delete_account(email).await,
        }
    }
}

// Initialize database from a connection string
pub async fn init_db(connection_string: &str) -> Result<Database, DbError> {
    Database::new(connection_string).await
}
