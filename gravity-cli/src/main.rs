mod logging_observer;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use gravity_client::{ClientConfig, LocalMedia, RtcTransportFactory, connect};
use gravity_core::{IceServerConfig, RoomId};
use gravity_server::{RelayConfig, serve};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::logging_observer::LoggingObserver;

#[derive(Parser)]
#[command(name = "gravity", version, about = "Peer-to-peer video call relay and client")]
struct Cli {
    /// Log filter such as `debug` or `gravity_server=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay and serve the browser client.
    Relay {
        #[arg(short, long, env = "PORT", default_value_t = RelayConfig::DEFAULT_PORT)]
        port: u16,

        /// Directory served for every path other than /ws.
        #[arg(long, env = "GRAVITY_STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Join a room as a receive-only participant and log what happens.
    Join {
        #[arg(long, default_value = "ws://localhost:3000/ws")]
        relay: String,

        /// Context the room is derived from, usually the page URL.
        #[arg(long, required_unless_present = "room", conflicts_with = "room")]
        context: Option<String>,

        /// Exact room id to join.
        #[arg(long)]
        room: Option<String>,

        /// STUN/TURN server URLs. Defaults to Google's public STUN server.
        #[arg(long = "ice-server")]
        ice_servers: Vec<String>,
    },

    /// Print the room id derived from a context string.
    RoomId { context: String },
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Relay { port, static_dir } => {
            let config = RelayConfig {
                static_dir,
                ..RelayConfig::with_port(port)
            };
            println!("{}", "Starting Gravity relay...".green().bold());
            serve(config).await?;
        }

        Commands::Join {
            relay,
            context,
            room,
            ice_servers,
        } => {
            let room = match (room, context) {
                (Some(room), _) => RoomId::new(room).context("Invalid room id")?,
                (None, Some(context)) => RoomId::derive(&context),
                (None, None) => anyhow::bail!("either --context or --room is required"),
            };

            let mut config = ClientConfig::new(relay, room);
            if !ice_servers.is_empty() {
                config.transport.ice_servers =
                    ice_servers.into_iter().map(IceServerConfig::stun).collect();
            }
            println!("{} {}", "Joining room".cyan(), config.room);

            let client = connect(
                config,
                Arc::new(RtcTransportFactory),
                LocalMedia::default(),
                Arc::new(LoggingObserver),
            )
            .await
            .context("Failed to join")?;

            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for ctrl-c")?;
            info!("Leaving room");
            client.hangup().await?;
            println!("{}", "Left the call.".green());
        }

        Commands::RoomId { context } => {
            println!("{}", RoomId::derive(&context));
        }
    }

    Ok(())
}
