use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use futures::future;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    app::App,
    config::{ChatId, Settings},
    scheduler::IntervalTicks,
    telegram::TelegramError,
};

mod app;
mod commands;
mod config;
mod content;
mod dispatch;
mod image;
mod scheduler;
mod shutdown;
mod telegram;
#[cfg(test)]
mod test_server;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Telegram bot token.
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    token: String,

    /// Channel to post to: numeric id or @username.
    #[arg(long, env = "CHANNEL_ID")]
    channel: ChatId,

    /// Telegram user id allowed to use /post_now.
    #[arg(long, env = "ADMIN_ID")]
    admin: u64,

    /// Path to YAML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // a missing .env is fine, the variables may come from the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Args {
        token,
        channel,
        admin,
        config,
    } = Args::parse();

    let settings = match Settings::load(config.as_deref()) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Failed to load settings");
            return ExitCode::FAILURE;
        }
    };

    let app = match App::new(token, channel, admin, settings) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let bot_name = match app.telegram.get_me().await {
        Ok(me) => me.username,
        Err(e @ TelegramError::Server { .. }) => {
            error!(error = %e, "Telegram rejected the bot token");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch bot info");
            None
        }
    };

    info!(
        channel = %app.channel,
        window = %app.settings.window,
        bot = bot_name.as_deref().unwrap_or("?"),
        "Starting"
    );

    if app.settings.announce_startup {
        app.announce_startup().await;
    }

    let (trigger, shutdown) = shutdown::channel();
    let scheduler = app.scheduler();
    let poller = app.command_poller(bot_name);
    let signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            future::pending::<()>().await;
        }
        info!("Shutting down");
        trigger.trigger();
    };

    future::join3(
        scheduler.run(
            IntervalTicks::new(app.settings.interval()),
            &app.pipeline,
            shutdown.clone(),
        ),
        poller.run(shutdown),
        signal,
    )
    .await;

    ExitCode::SUCCESS
}
