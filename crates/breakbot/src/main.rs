//! breakbot daemon entry point.
//!
//! Wires the core scheduler to its collaborators: a webhook notifier for
//! announcements and a line-based command source on stdin using the chat
//! command syntax (`!breaks`, `!addbreak HH:mm HH:mm`, `!removebreak HH:mm`).

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use breakbot_core::BreakScheduler;

mod commands;
mod config;
mod notify;

use config::Config;
use notify::{AlwaysPresent, WebhookNotifier};

#[derive(Parser)]
#[command(name = "breakbot", version, about = "Announces scheduled breaks to a community chat")]
struct Cli {
    /// Path to the config file (defaults to ~/.config/breakbot/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduler daemon
    Run,
    /// Load the configuration, print a summary, and exit
    CheckConfig,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => Config::load(path),
        None => Ok(Config::load_or_default()),
    };
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run => run_daemon(cfg).await,
        Commands::CheckConfig => check_config(&cfg),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn check_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match cfg.webhook_url() {
        Some(_) => println!("webhook: configured"),
        None => println!(
            "webhook: missing (set discord.webhook_url or {})",
            config::WEBHOOK_ENV
        ),
    }
    println!("command prefix: {}", cfg.commands.prefix);
    Ok(())
}

async fn run_daemon(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let webhook_url = cfg.webhook_url().ok_or_else(|| {
        format!(
            "no webhook URL configured (set discord.webhook_url or {})",
            config::WEBHOOK_ENV
        )
    })?;

    let scheduler = Arc::new(BreakScheduler::new());
    scheduler.set_handler(Arc::new(WebhookNotifier::new(
        webhook_url,
        Arc::new(AlwaysPresent),
    )));

    let runner = scheduler.clone();
    tokio::spawn(async move { runner.run().await });
    info!(prefix = %cfg.commands.prefix, "scheduler started, reading commands from stdin");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        // Malformed input is dropped without a reply.
                        let Some(command) = commands::parse(&cfg.commands.prefix, &line) else {
                            continue;
                        };
                        if let Some(reply) = commands::apply(&scheduler, command).await {
                            println!("{reply}");
                        }
                    }
                    None => {
                        info!("input closed, exiting");
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
