// src/models.rs
use uuid::Uuid;
use chrono::{DateTime, Utc};
use serde::Serialize;

// A back-office account. Only the Argon2 PHC string is ever stored.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAccount {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub password_rotated_at: DateTime<Utc>,
}

// Returned once to the operator after provisioning
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedCredential {
    pub account_id: Uuid,
    pub email: String,
    pub role: String,
    pub created: bool,
    pub password: String,
    pub strength: u8,
}
