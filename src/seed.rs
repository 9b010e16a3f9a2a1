//! First-run data for modboard.
//!
//! Creates the default boards and, when configured, the admin account.
//! Safe to run on every start: existing rows are left alone.

use tracing::{info, warn};

use crate::auth::{register_with_role, RegistrationError, RegistrationRequest};
use crate::board::{BoardRepository, NewBoard};
use crate::config::SeedConfig;
use crate::db::{Database, Role, UserRepository};
use crate::{ModboardError, Result};

/// Default boards as (name, description), in display order.
pub const DEFAULT_BOARDS: &[(&str, &str)] = &[
    ("Notices", "Site-wide announcements"),
    ("Free Board", "Write about anything"),
    ("Q&A", "Ask and answer questions"),
    ("Information", "Share useful information"),
    ("Reviews", "Reviews and impressions"),
    ("Hobbies", "Hobbies and interests"),
    ("Marketplace", "Buy and sell second-hand goods"),
    ("Meetups", "Meetups and recruiting"),
    ("Photos & Videos", "Share photos and videos"),
    ("Misc", "Everything else"),
];

/// What a seeding run created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of boards inserted.
    pub boards_created: usize,
    /// Whether the admin account was created.
    pub admin_created: bool,
}

/// Seed the default boards and the admin account.
pub async fn seed_defaults(db: &Database, config: &SeedConfig) -> Result<SeedReport> {
    let boards_created = seed_boards(db).await?;
    let admin_created = seed_admin(db, config).await?;

    if boards_created > 0 || admin_created {
        info!(boards_created, admin_created, "Seeded default data");
    }

    Ok(SeedReport {
        boards_created,
        admin_created,
    })
}

async fn seed_boards(db: &Database) -> Result<usize> {
    let repo = BoardRepository::new(db.pool());
    if repo.count().await? > 0 {
        return Ok(0);
    }

    for (order, (name, description)) in DEFAULT_BOARDS.iter().enumerate() {
        repo.create(
            &NewBoard::new(*name)
                .with_description(*description)
                .with_sort_order(order as i64),
        )
        .await?;
    }

    Ok(DEFAULT_BOARDS.len())
}

async fn seed_admin(db: &Database, config: &SeedConfig) -> Result<bool> {
    if config.admin_password.is_empty() {
        return Ok(false);
    }

    if UserRepository::new(db.pool())
        .username_exists(&config.admin_username)
        .await?
    {
        return Ok(false);
    }

    let mut request = RegistrationRequest::new(&config.admin_username, &config.admin_password);
    if let Some(email) = &config.admin_email {
        request = request.with_email(email);
    }

    match register_with_role(db, request, Role::Admin).await {
        Ok(user) => {
            info!(username = %user.username, "Created admin account");
            Ok(true)
        }
        Err(RegistrationError::Validation(e)) => {
            warn!("Admin account not created: {}", e);
            Err(ModboardError::Config(format!("seed admin account: {e}")))
        }
        Err(RegistrationError::UsernameExists) => Ok(false),
        Err(e) => Err(ModboardError::Database(e.to_string())),
    }
}
