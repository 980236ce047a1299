//! # Pinwall CLI (`pinwall`)
//!
//! The `pinwall` binary starts the HTTP server and offers a few
//! inspection helpers.
//!
//! ## Usage
//!
//! ```bash
//! pinwall --config ./config/pinwall.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pinwall serve` | Start the HTTP server |
//! | `pinwall routes` | Print the endpoint table |

use clap::{Parser, Subcommand};
use pinwall::{config, server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pinwall — a small in-memory JSON message board served over HTTP.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file falls back to built-in defaults.
#[derive(Parser)]
#[command(
    name = "pinwall",
    about = "Pinwall — a small in-memory JSON message board served over HTTP",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/pinwall.toml`. Bind address, the admin API
    /// key, and validation minimums are read from this file.
    #[arg(long, global = true, default_value = "./config/pinwall.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Binds to `[server].bind` and serves until Ctrl-C or SIGTERM.
    /// The message board starts empty; nothing is persisted.
    Serve,

    /// Print the endpoint table.
    ///
    /// Offline counterpart of `GET /api/info`.
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Routes => {
            println!("Pinwall endpoints (bind: {})", cfg.server.bind);
            println!();
            println!("  GET    /                       homepage");
            println!("  GET    /health                 health check");
            println!("  GET    /api/info               API information");
            println!("  POST   /data                   echo a JSON payload");
            println!("  GET    /api/messages           list messages with statistics");
            println!("  POST   /api/messages           create a message");
            println!("  GET    /api/messages/search    substring search (?q=)");
            println!("  GET    /api/messages/{{id}}      fetch one message");
            println!("  PUT    /api/messages/{{id}}      update one message");
            println!("  DELETE /api/messages/{{id}}      delete one message");
            println!("  GET    /api/admin/stats        statistics (API-key gated)");
        }
    }

    Ok(())
}
