// This is the entry point of the CYSCOM leaderboard bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (Firebase, HTTP APIs, files)
// - `discord/` = Discord-specific adapters (commands, events)
// - `config/` = Settings read from the environment at startup
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "config/bot_config.rs"]
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::config::BotConfig;
use crate::core::leaderboard::{LeaderboardService, RecordStore};
use crate::core::moderation::{ModerationConfig, ModerationService};
use crate::discord::commands::presence;
use crate::discord::{Data, Error};
use crate::infra::firebase::ServiceAccountAuth;
use crate::infra::images::ShibeClient;
use crate::infra::leaderboard::{FirebaseRecordStore, InMemoryRecordStore};
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        // Commands in the same message are parsed by the framework on its own.
        discord::moderation::handle_message(ctx, new_message, &data.moderation).await;
    }

    Ok(())
}

/// Log every command failure and tell the caller something went wrong.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(
                command = %ctx.command().qualified_name,
                "Command failed: {}",
                error
            );
            if let Err(e) = ctx
                .say(format!(
                    "Something went wrong while running `{}`.",
                    ctx.command().name
                ))
                .await
            {
                tracing::warn!("Failed to report command error: {}", e);
            }
        }
        poise::FrameworkError::CommandCheckFailed {
            error: None, ctx, ..
        } => {
            if let Err(e) = ctx
                .say("You don't have the role needed for this command.")
                .await
            {
                tracing::warn!("Failed to report missing role: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Pick the record store: Firebase normally, memory when asked for a dry run.
async fn build_record_store(config: &BotConfig) -> anyhow::Result<Box<dyn RecordStore>> {
    if config.use_memory_store {
        tracing::warn!("LEADERBOARD_STORE=memory: leaderboard data will not be persisted");
        return Ok(Box::new(InMemoryRecordStore::new()));
    }

    let auth = ServiceAccountAuth::from_file(&config.credentials_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load Firebase credentials from {}",
                config.credentials_path
            )
        })?;
    tracing::info!(
        service_account = auth.client_email(),
        database = %config.database_url,
        storage_bucket = %config.storage_bucket,
        path = %config.leaderboard_path(),
        "Connecting to Firebase"
    );

    let store = FirebaseRecordStore::new(&config.database_url, &config.leaderboard_path(), auth)
        .context("Failed to create Firebase client")?;
    Ok(Box::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = Arc::new(BotConfig::from_env().context("Invalid bot configuration")?);
    tracing::info!(debug = config.debug, act = %config.current_act, "Configuration loaded");

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let store = build_record_store(&config).await?;
    let leaderboard_service = Arc::new(LeaderboardService::new(store));

    let moderation_service = Arc::new(ModerationService::new(ModerationConfig {
        bait_channel_id: config.spam_bait_channel_id,
        log_channel_id: config.spam_log_channel_id,
    }));
    if config.spam_bait_channel_id.is_none() {
        tracing::warn!("SPAM_BAIT_CHANNEL_ID not set, bait channel bans are disabled");
    }

    let data = Data {
        leaderboard: Arc::clone(&leaderboard_service),
        moderation: Arc::clone(&moderation_service),
        shibe: Arc::new(ShibeClient::new()),
        config: Arc::clone(&config),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required for prefix commands
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_VOICE_STATES; // For attendance

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                discord::commands::general::ping(),
                discord::commands::general::doge(),
                discord::commands::general::sum(),
                discord::commands::leaderboard::add_data(),
                discord::commands::leaderboard::add_recruits(),
                discord::commands::leaderboard::update_data(),
                discord::commands::leaderboard::fetch_data(),
                discord::commands::leaderboard::delete_data(),
                discord::commands::leaderboard::contribution(),
                discord::commands::attendance::attendance(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.command_prefix().into()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            pre_command: |ctx| {
                Box::pin(async move {
                    tracing::info!(
                        command = %ctx.command().qualified_name,
                        user_id = ctx.author().id.get(),
                        "Executing command"
                    );
                })
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, _framework| {
            Box::pin(async move {
                presence::on_ready(ctx);
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.bot_token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
