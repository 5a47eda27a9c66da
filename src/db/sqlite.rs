// src/db/sqlite.rs
use sqlx::{sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow}, Row};
use uuid::Uuid;
use std::path::Path;
use chrono::{DateTime, Utc};

use crate::models::AdminAccount;
use super::{DatabaseBackend, DbError};

#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: Option<SqlitePool>,
}

impl SqliteBackend {
    pub fn new() -> Self {
        Self { pool: None }
    }

    // Helper to get the pool or return an error
    fn get_pool(&self) -> Result<&SqlitePool, DbError> {
        self.pool.as_ref().ok_or(DbError::InitError("Database not initialized".into()))
    }
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, DbError> {
    let raw: String = row.get(column);
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::SqlxError(format!("Invalid datetime in {}: {}", column, e)))
}

fn account_from_row(row: &SqliteRow) -> Result<AdminAccount, DbError> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::SqlxError(format!("Invalid UUID: {}", e)))?;

    Ok(AdminAccount {
        id,
        email: row.get("email"),
        role: row.get("role"),
        password_hash: row.get("password_hash"),
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
        password_rotated_at: parse_timestamp(row, "password_rotated_at")?,
    })
}

impl DatabaseBackend for SqliteBackend {
    async fn init(&mut self, connection_string: &str) -> Result<(), DbError> {
        let db_path = connection_string
            .strip_prefix("sqlite:")
            .ok_or_else(|| DbError::ConfigError("Invalid SQLite connection string".into()))?;

        // Create the database directory if it doesn't exist
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e|
                    DbError::InitError(format!("Failed to create database directory: {}", e))
                )?;
            }
        }

        log::info!("Initializing SQLite database at: {}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admin_accounts (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                role TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                password_rotated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await?;

        self.pool = Some(pool);
        Ok(())
    }

    async fn upsert_password_hash(
        &self,
        email: &str,
        role: &str,
        password_hash: &str,
    ) -> Result<(Uuid, bool), DbError> {
        let pool = self.get_pool()?;
        let now_str = Utc::now().to_rfc3339();

        let mut tx = pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM admin_accounts WHERE email = ?")
            .bind(email)
            .fetch_optional(&mut *tx)
            .await?;

        let result = match existing {
            Some(row) => {
                let id_str: String = row.get("id");
                let id = Uuid::parse_str(&id_str)
                    .map_err(|e| DbError::SqlxError(format!("Invalid UUID: {}", e)))?;

                sqlx::query(
                    r#"
                    UPDATE admin_accounts
                    SET role = ?, password_hash = ?, updated_at = ?, password_rotated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(role)
                .bind(password_hash)
                .bind(&now_str)
                .bind(&now_str)
                .bind(&id_str)
                .execute(&mut *tx)
                .await?;

                (id, false)
            }
            None => {
                let id = Uuid::new_v4();

                sqlx::query(
                    r#"
                    INSERT INTO admin_accounts
                        (id, email, role, password_hash, created_at, updated_at, password_rotated_at)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(id.to_string())
                .bind(email)
                .bind(role)
                .bind(password_hash)
                .bind(&now_str)
                .bind(&now_str)
                .bind(&now_str)
                .execute(&mut *tx)
                .await?;

                (id, true)
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn get_account(&self, email: &str) -> Result<Option<AdminAccount>, DbError> {
        let pool = self.get_pool()?;

        let row = sqlx::query("SELECT * FROM admin_accounts WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn list_accounts(&self) -> Result<Vec<AdminAccount>, DbError> {
        let pool = self.get_pool()?;

        let rows = sqlx::query("SELECT * FROM admin_accounts ORDER BY email")
            .fetch_all(pool)
            .await?;

        rows.iter().map(account_from_row).collect()
    }

    async fn delete_account(&self, email: &str) -> Result<(), DbError> {
        let pool = self.get_pool()?;

        let result = sqlx::query("DELETE FROM admin_accounts WHERE email = ?")
            .bind(email)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
