// src/cli/handlers.rs
use anyhow::{bail, Context, Result};
use inquire::{Confirm, Password};
use rand::{CryptoRng, RngCore};
use serde_json::json;

use crate::core::accounts::AccountService;
use crate::core::config::Config;
use crate::crypto;
use crate::generators::PasswordGenerator;

// Handlers for CLI commands

// Every password is generated before anything is printed
fn generate_passwords<R: RngCore + CryptoRng>(
    generator: &mut PasswordGenerator<R>,
    length: usize,
    count: u32,
) -> Result<Vec<String>> {
    let passwords = (0..count)
        .map(|_| generator.generate(length))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(passwords)
}

pub fn handle_generate(config: &Config, length: Option<usize>, count: u32, as_json: bool) -> Result<()> {
    let length = length.unwrap_or(config.default_password_length);
    let passwords = generate_passwords(&mut PasswordGenerator::new(), length, count)?;

    if as_json {
        println!("{}", json!({ "length": length, "passwords": passwords }));
    } else {
        for password in passwords {
            println!("{}", password);
        }
    }
    Ok(())
}

pub fn handle_strength(password: &str, as_json: bool) -> Result<()> {
    let score = crypto::analyze_password_strength(password);
    if as_json {
        println!("{}", json!({ "strength": score }));
    } else {
        println!("Strength: {}/100", score);
    }
    Ok(())
}

fn confirm(prompt: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Confirm::new(prompt)
        .with_default(false)
        .prompt()
        .context("Confirmation prompt failed")
}

pub async fn handle_provision(
    accounts: &mut AccountService,
    email: &str,
    role: Option<&str>,
    length: Option<usize>,
    yes: bool,
    as_json: bool,
) -> Result<()> {
    let prompt = format!("Generate a new password for '{}'? Any existing password stops working.", email.trim());
    if !confirm(&prompt, yes)? {
        println!("Aborted, nothing was changed.");
        return Ok(());
    }

    let issued = accounts.provision(email, role, length).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&issued)?);
    } else {
        let action = if issued.created { "Created" } else { "Rotated" };
        println!("✅ {} {} account {}", action, issued.role, issued.email);
        println!("   Password: {}", issued.password);
        println!("   Strength: {}/100", issued.strength);
        println!("   This password is shown once and is not stored in plain text.");
    }
    Ok(())
}

pub async fn handle_verify(accounts: &AccountService, email: &str, as_json: bool) -> Result<()> {
    let candidate = Password::new("Password:")
        .with_display_mode(inquire::PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt()
        .context("Password prompt failed")?;

    let matches = accounts.verify(email, &candidate).await?;

    if as_json {
        println!("{}", json!({ "email": email.trim().to_lowercase(), "matches": matches }));
    } else if matches {
        println!("✅ Password matches");
    } else {
        bail!("password does not match");
    }
    Ok(())
}

pub async fn handle_list(accounts: &AccountService, as_json: bool) -> Result<()> {
    let list = accounts.list().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.is_empty() {
        println!("No admin accounts.");
        return Ok(());
    }

    for account in list {
        println!(
            "{:<40} {:<10} rotated {}",
            account.email,
            account.role,
            account.password_rotated_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
    Ok(())
}

pub async fn handle_remove(accounts: &AccountService, email: &str, yes: bool, as_json: bool) -> Result<()> {
    let prompt = format!("Remove account '{}'?", email.trim());
    if !confirm(&prompt, yes)? {
        println!("Aborted, nothing was changed.");
        return Ok(());
    }

    accounts.remove(email).await?;

    if as_json {
        println!("{}", json!({ "removed": email.trim().to_lowercase() }));
    } else {
        println!("🗑️  Removed {}", email.trim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::charset::covers_all_classes;
    use crate::generators::GeneratorError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn seeded() -> PasswordGenerator<ChaCha20Rng> {
        PasswordGenerator::with_rng(ChaCha20Rng::seed_from_u64(21))
    }

    #[test]
    fn test_generate_respects_count_and_length() {
        let passwords = generate_passwords(&mut seeded(), 16, 5).unwrap();
        assert_eq!(passwords.len(), 5);
        for password in &passwords {
            assert_eq!(password.len(), 16);
            assert!(covers_all_classes(password));
        }
    }

    #[test]
    fn test_generate_rejects_bad_lengths() {
        for (length, expected) in [
            (3, GeneratorError::InvalidLength { length: 3, min: 4 }),
            (usize::MAX, GeneratorError::TooLong { length: usize::MAX, max: 128 }),
        ] {
            let err = generate_passwords(&mut seeded(), length, 2).unwrap_err();
            assert_eq!(err.downcast_ref::<GeneratorError>(), Some(&expected));
        }
    }

    #[test]
    fn test_handle_generate_uses_configured_default() {
        let config = Config::default();
        assert!(handle_generate(&config, None, 3, true).is_ok());
        assert!(handle_generate(&config, Some(2), 1, false).is_err());
    }

    #[test]
    fn test_handle_strength() {
        assert!(handle_strength("Tz7#kq9Pw@3m", true).is_ok());
    }
}
