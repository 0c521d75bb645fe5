//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `RefurbBuddy` application,
//! including all slash commands, autocomplete handlers, staff checks and the bot
//! context.

/// Discord command implementations (catalog, listing, order, cart, customer)
pub mod commands;
/// Discord interaction handlers (autocomplete, staff checks)
pub mod handlers;

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the staff roster.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Discord user IDs allowed to run staff commands
    pub staff_ids: HashSet<String>,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and staff IDs.
    #[must_use]
    pub const fn new(database: DatabaseConnection, staff_ids: HashSet<String>) -> Self {
        Self {
            database,
            staff_ids,
        }
    }

    /// Whether the given Discord user ID belongs to a staff member.
    #[must_use]
    pub fn is_staff(&self, user_id: &str) -> bool {
        self.staff_ids.contains(user_id)
    }
}

/// Message shown to the user for a failed command.
///
/// Domain errors are explained; infrastructure errors get a generic reply so
/// database details never reach the channel.
#[must_use]
pub fn user_facing_message(error: &Error) -> String {
    match error {
        Error::Database(_) | Error::Framework(_) | Error::EnvVar(_) | Error::Config { .. } => {
            "❌ Something went wrong on our side. Please try again later.".to_string()
        }
        other => format!("❌ {other}"),
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say(user_facing_message(&error)).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Registers all commands and runs the Discord client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands globally", framework.options().commands.len());
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Starting Discord client...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;
    client.start().await?;
    Ok(())
}
