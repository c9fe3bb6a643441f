use anyhow::Result;
use clap::{Parser, Subcommand};
use core_logic::setup_logger;
use dotenv::dotenv;
use layeredge_bot::config::BotConfig;
use layeredge_bot::{register, scheduler};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the perpetual node cycle over all stored wallets (default)
    Run,
    /// Verify the invite code, mint and register fresh wallets
    Register {
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = setup_logger();
    // Keep guard alive for file logging
    std::mem::forget(_log_guard);
    dotenv().ok();

    let args = Args::parse();
    info!("Loading config from: {}", args.config);

    let config = match BotConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return Ok(());
        }
    };

    match args.command.unwrap_or(Command::Run) {
        Command::Run => scheduler::run(config).await,
        Command::Register { count } => register::run(config, count).await,
    }
}
