use std::time::Duration;

use clap::Parser;
use dungeon_mst::prelude::*;
use tracing_subscriber::EnvFilter;

/// Multiplayer dungeon arena: a new MST dungeon every round.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Address to listen on
    #[clap(short, long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Fixed RNG seed for reproducible dungeons
    #[clap(short, long)]
    seed: Option<u64>,

    /// Round length in seconds
    #[clap(short, long, default_value = "5")]
    match_secs: u64,

    /// Room placement attempts per dungeon
    #[clap(short, long, default_value = "100000")]
    attempts: u32,
}

impl Args {
    fn hub_config(&self) -> HubConfig {
        HubConfig {
            layout: LayoutConfig {
                attempts: self.attempts,
                ..LayoutConfig::default()
            },
            match_duration: Duration::from_secs(self.match_secs),
            seed: self.seed,
            ..HubConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!(bind = %args.bind, seed = ?args.seed, match_secs = args.match_secs, "starting arena server");

    let server = DungeonServerBuilder::new()
        .bind(&args.bind)
        .hub_config(args.hub_config())
        .build()
        .await?;
    let hub = server.hub();

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
            let _ = hub.shutdown().await;
        }
    }
    Ok(())
}
