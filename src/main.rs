mod commands;
mod constants;
mod database;
mod handlers;
mod models;
mod schedule;
mod utils;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::{
    commands::{add, cancel, help, list, register_current_chat, remove, start},
    constants::{
        COMMAND_PREFIX, DEFAULT_DATABASE_URL, DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE,
        LOG_DIRECTIVE,
    },
    database::Database,
    handlers::handle_message,
    models::{Data, Error},
    schedule::{ReminderTime, start_schedule_manager},
    utils::messages::build_command_failed_message,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    initialize_logging();

    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let db = match Database::new(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let data = Data::new(db, config.reminder_time);

    if let Err(e) = start_bot(config.discord_token, data).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}

/// Configuration loaded from environment variables
struct Config {
    discord_token: String,
    database_url: String,
    reminder_time: ReminderTime,
}

/// Initialize the logging system
fn initialize_logging() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = LOG_DIRECTIVE.parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load configuration from environment variables
fn load_configuration() -> Result<Config, Error> {
    let discord_token = std::env::var("DISCORD_TOKEN")
        .map_err(|_| "DISCORD_TOKEN environment variable not set. Set it with: export DISCORD_TOKEN=your_bot_token")?;

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let hour = read_number("REMINDER_HOUR", DEFAULT_REMINDER_HOUR)?;
    let minute = read_number("REMINDER_MINUTE", DEFAULT_REMINDER_MINUTE)?;
    let reminder_time = ReminderTime::new(hour, minute)?;

    info!(
        "Using database {} with daily reminders at {}",
        database_url, reminder_time
    );

    Ok(Config {
        discord_token,
        database_url,
        reminder_time,
    })
}

/// Read an optional numeric variable, falling back to `default` when unset
fn read_number(name: &str, default: u32) -> Result<u32, Error> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| {
                Error::from(format!(
                    "{} must be a non-negative integer, got '{}'",
                    name, value
                ))
            }),
        Err(_) => Ok(default),
    }
}

/// Create and start the Discord bot
async fn start_bot(token: String, data: Data) -> Result<(), Error> {
    let data_for_framework = data.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![start(), add(), list(), remove(), help(), cancel()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(COMMAND_PREFIX.into()),
                ..Default::default()
            },
            pre_command: |ctx| Box::pin(register_current_chat(ctx)),
            on_error: |err| Box::pin(on_error(err)),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    if let serenity::FullEvent::Message { new_message } = event {
                        handle_message(ctx, new_message, data).await;
                    }
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            // Start the daily reminder scheduler
            start_schedule_manager(ctx.http.clone(), data.clone());
            info!("Schedule manager task started");

            Box::pin(async move {
                info!("Registering commands globally (may take up to 1 hour)");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered globally");

                info!("Bot is ready!");
                Ok(data_for_framework)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot...");
    client.start().await?;

    Ok(())
}

/// Log command failures and tell the user something went wrong
async fn on_error(err: poise::FrameworkError<'_, Data, Error>) {
    match err {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                "Command /{} failed in channel {}: {}",
                ctx.command().name,
                ctx.channel_id(),
                error
            );
            if let Err(e) = ctx.say(build_command_failed_message()).await {
                error!("Failed to report command error: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling framework error: {}", e);
            }
        }
    }
}
