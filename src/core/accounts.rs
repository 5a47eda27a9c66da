// src/core/accounts.rs
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use crate::core::config::Config;
use crate::crypto::{self, CryptoError};
use crate::db::{Database, DbError};
use crate::generators::{GeneratorError, PasswordGenerator};
use crate::models::{AdminAccount, ProvisionedCredential};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

pub type Result<T> = std::result::Result<T, AccountError>;

// Lower-cased and trimmed; must look like local@domain
pub fn normalize_email(email: &str) -> Result<String> {
    let normalized = email.trim().to_lowercase();
    match normalized.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(normalized)
        }
        _ => Err(AccountError::InvalidEmail(email.to_string())),
    }
}

/// Issues and rotates admin credentials.
///
/// Generated passwords are hashed before they reach the store and are handed
/// back to the caller exactly once.
pub struct AccountService<R = OsRng> {
    db: Database,
    config: Config,
    generator: PasswordGenerator<R>,
}

impl AccountService<OsRng> {
    pub fn new(db: Database, config: Config) -> Self {
        Self::with_generator(db, config, PasswordGenerator::new())
    }
}

impl<R: RngCore + CryptoRng> AccountService<R> {
    pub fn with_generator(db: Database, config: Config, generator: PasswordGenerator<R>) -> Self {
        Self { db, config, generator }
    }

    /// Create an account, or rotate the password of an existing one.
    ///
    /// Input is validated before a password is generated or the store is
    /// touched, so a rejected call changes nothing.
    pub async fn provision(
        &mut self,
        email: &str,
        role: Option<&str>,
        length: Option<usize>,
    ) -> Result<ProvisionedCredential> {
        let email = normalize_email(email)?;
        let role = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(self.config.default_admin_role.as_str())
            .to_string();
        let length = length.unwrap_or(self.config.default_password_length);

        let password = self.generator.generate(length)?;
        let password_hash = crypto::hash_password(&password, &self.config.kdf)?;

        let (account_id, created) = self
            .db
            .upsert_password_hash(&email, &role, &password_hash)
            .await?;

        if created {
            log::info!("Provisioned {} account {} ({})", role, email, account_id);
        } else {
            log::info!("Rotated password for {} ({})", email, account_id);
        }

        Ok(ProvisionedCredential {
            account_id,
            email,
            role,
            created,
            strength: crypto::analyze_password_strength(&password),
            password,
        })
    }

    pub async fn verify(&self, email: &str, candidate: &str) -> Result<bool> {
        let account = self.get(email).await?;
        let matches = crypto::verify_password(candidate, &account.password_hash)?;
        if !matches {
            log::warn!("Password check failed for {}", account.email);
        }
        Ok(matches)
    }

    pub async fn get(&self, email: &str) -> Result<AdminAccount> {
        let email = normalize_email(email)?;
        self.db
            .get_account(&email)
            .await?
            .ok_or(AccountError::UnknownAccount(email))
    }

    pub async fn list(&self) -> Result<Vec<AdminAccount>> {
        Ok(self.db.list_accounts().await?)
    }

    pub async fn remove(&self, email: &str) -> Result<()> {
        let email = normalize_email(email)?;
        match self.db.delete_account(&email).await {
            Ok(()) => {
                log::info!("Removed account {}", email);
                Ok(())
            }
            Err(DbError::NotFound) => Err(AccountError::UnknownAccount(email)),
            Err(e) => Err(e.into()),
        }
    }
}
