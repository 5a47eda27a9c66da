// src/db/postgres.rs
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgRow}, PgPool, Row, types::Uuid};

use crate::models::AdminAccount;
use super::{DatabaseBackend, DbError};

#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: Option<PgPool>,
}

impl PostgresBackend {
    pub fn new() -> Self {
        Self {
            pool: None,
        }
    }

    // Helper to get the pool or return an error
    fn get_pool(&self) -> Result<&PgPool, DbError> {
        self.pool.as_ref().ok_or(DbError::InitError("Database not initialized".into()))
    }
}

fn account_from_row(row: &PgRow) -> AdminAccount {
    AdminAccount {
        id: row.get("id"),
        email: row.get("email"),
        role: row.get("role"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        password_rotated_at: row.get("password_rotated_at"),
    }
}

impl DatabaseBackend for PostgresBackend {
    async fn init(&mut self, connection_string: &str) -> Result<(), DbError> {
        log::info!("Initializing PostgreSQL database...");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(connection_string)
            .await?;

        log::info!("Connected to PostgreSQL");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admin_accounts (
                id UUID PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                role TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
                password_rotated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
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

        // xmax is zero only for a freshly inserted tuple
        let row = sqlx::query(
            r#"
            INSERT INTO admin_accounts (id, email, role, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET role = EXCLUDED.role,
                password_hash = EXCLUDED.password_hash,
                updated_at = NOW(),
                password_rotated_at = NOW()
            RETURNING id, (xmax = 0) AS created
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(role)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok((row.get("id"), row.get("created")))
    }

    async fn get_account(&self, email: &str) -> Result<Option<AdminAccount>, DbError> {
        let pool = self.get_pool()?;

        let row = sqlx::query("SELECT * FROM admin_accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(row.as_ref().map(account_from_row))
    }

    async fn list_accounts(&self) -> Result<Vec<AdminAccount>, DbError> {
        let pool = self.get_pool()?;

        let rows = sqlx::query("SELECT * FROM admin_accounts ORDER BY email")
            .fetch_all(pool)
            .await?;

        Ok(rows.iter().map(account_from_row).collect())
    }

    async fn delete_account(&self, email: &str) -> Result<(), DbError> {
        let pool = self.get_pool()?;

        let result = sqlx::query("DELETE FROM admin_accounts WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
