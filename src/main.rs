use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "zikir")]
#[command(about = "Zikir counter gamification - points, levels, badges and milestones")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.zikir/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the player API server
    Serve {
        /// Port to listen on (overrides settings.server.http_port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a config file with the default reward tables
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Award a counted batch to a player on a running server
    Award {
        #[arg(long)]
        player: String,

        /// Number of zikir counted
        #[arg(long, allow_negative_numbers = true)]
        count: i64,

        /// Counting room the batch belongs to
        #[arg(long)]
        room: Option<i64>,
    },

    /// Show a player's gamification profile
    Status {
        #[arg(long)]
        player: String,

        /// Print the raw JSON profile
        #[arg(long)]
        json: bool,
    },

    /// Show the global or a room leaderboard
    Leaderboard {
        #[arg(long)]
        room: Option<i64>,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::Serve { port }) => {
            cli::serve::serve_command(config, port).await?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(config, force).await?;
        }
        Some(Commands::Award {
            player,
            count,
            room,
        }) => {
            cli::award::award_command(config, &player, count, room).await?;
        }
        Some(Commands::Status { player, json }) => {
            cli::status::status_command(config, &player, json).await?;
        }
        Some(Commands::Leaderboard { room, limit }) => {
            cli::leaderboard::leaderboard_command(config, room, limit).await?;
        }
        None => {
            // Default: run the server
            cli::serve::serve_command(config, None).await?;
        }
    }

    Ok(())
}
