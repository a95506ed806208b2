//! Glyph server binary
//!
//! Accepts framed JSON tool calls from an external agent and executes
//! them against the scene document on a dedicated host thread.
//!
//! ## Usage
//!
//! TCP (default transport):
//! ```bash
//! glyph-server --port 9877
//! ```
//!
//! Stdio, for process-spawning agent harnesses:
//! ```bash
//! glyph-server --stdio
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use glyph_bridge::{Bridge, BridgeConfig};
use glyph_scene::Document;
use glyph_server::{HostLoop, RelayClient, serve_stdio, serve_tcp};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::info;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "glyph-server", version, about = "Command dispatch bridge server")]
struct Args {
    /// Bind address for the TCP listener
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port for the TCP listener
    #[arg(long, default_value_t = 9877)]
    port: u16,

    /// Serve a single client on stdin/stdout instead of TCP
    #[arg(long)]
    stdio: bool,

    /// Maximum queued calls before submissions are rejected
    #[arg(long, default_value_t = 256)]
    queue_capacity: usize,

    /// Maximum calls executed per host tick
    #[arg(long, default_value_t = 10)]
    batch_size: usize,

    /// Host loop tick interval in milliseconds
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Default caller wait budget in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Upstream endpoint for operations not served locally
    #[arg(long)]
    relay: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Log to stderr only; stdout belongs to the protocol in stdio mode
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_ansi(false);
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
        .init();

    let config = BridgeConfig {
        queue_capacity: args.queue_capacity,
        batch_size: args.batch_size,
        default_timeout: Duration::from_secs(args.timeout_secs),
    };
    let bridge = Arc::new(Bridge::new(glyph_ops::registry(), config));
    info!(
        operations = bridge.registry().len(),
        "operation registry built"
    );

    let host_loop = HostLoop::start(
        bridge.dispatcher(),
        Document::new(),
        Duration::from_millis(args.tick_ms),
    )?;

    let relay = args
        .relay
        .map(|endpoint| RelayClient::new(endpoint, Duration::from_secs(args.timeout_secs)))
        .transpose()?;
    if let Some(relay) = &relay {
        info!(endpoint = relay.endpoint(), "relay enabled");
    }

    if args.stdio {
        serve_stdio(Arc::clone(&bridge), relay).await?;
    } else {
        let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
        let shutdown = Arc::new(Notify::new());

        let signal_shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received");
                signal_shutdown.notify_one();
            }
        });

        serve_tcp(listener, Arc::clone(&bridge), relay, shutdown).await?;
    }

    // Fail everything still pending, then let the host thread finish
    bridge.shutdown();
    let _ = host_loop.stop();
    info!("shutdown complete");
    Ok(())
}
