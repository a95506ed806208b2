//! Transport listener
//!
//! One JSON envelope per line, in both directions. Responses are written
//! as calls complete, so a slow operation never blocks the next request
//! on the same connection; callers correlate by their request id.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use glyph_bridge::{Bridge, BridgeError, RequestEnvelope, ResponseEnvelope};
use glyph_scene::Document;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify};
use tracing::{debug, info, warn};

use crate::relay::RelayClient;

/// Accept connections until `shutdown` fires
pub async fn serve_tcp(
    listener: TcpListener,
    bridge: Arc<Bridge<Document>>,
    relay: Option<RelayClient>,
    shutdown: Arc<Notify>,
) -> Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                info!(%peer, "client connected");
                let bridge = Arc::clone(&bridge);
                let relay = relay.clone();
                tokio::spawn(async move {
                    let (reader, writer) = stream.into_split();
                    if let Err(err) = serve_connection(bridge, relay, reader, writer).await {
                        debug!(%peer, error = %err, "connection closed with error");
                    }
                    info!(%peer, "client disconnected");
                });
            }
            () = shutdown.notified() => {
                info!("listener shutting down");
                return Ok(());
            }
        }
    }
}

/// Serve a single client over stdin/stdout
pub async fn serve_stdio(
    bridge: Arc<Bridge<Document>>,
    relay: Option<RelayClient>,
) -> Result<()> {
    info!("serving on stdio");
    serve_connection(bridge, relay, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Read request lines until EOF, answering each on the shared writer
async fn serve_connection<R, W>(
    bridge: Arc<Bridge<Document>>,
    relay: Option<RelayClient>,
    reader: R,
    writer: W,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let writer = Arc::new(Mutex::new(writer));
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let request: RequestEnvelope = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(err) => {
                // Malformed input answers with a null id; the connection
                // itself stays usable.
                warn!(error = %err, "malformed request line");
                let response =
                    ResponseEnvelope::error(None, &BridgeError::Protocol(err.to_string()));
                write_response(&writer, &response).await;
                continue;
            }
        };

        let bridge = Arc::clone(&bridge);
        let relay = relay.clone();
        let writer = Arc::clone(&writer);
        tokio::spawn(async move {
            let response = handle_request(&bridge, relay.as_ref(), request).await;
            write_response(&writer, &response).await;
        });
    }

    Ok(())
}

async fn handle_request(
    bridge: &Bridge<Document>,
    relay: Option<&RelayClient>,
    request: RequestEnvelope,
) -> ResponseEnvelope {
    // Unknown operations go upstream when a relay is configured
    if !bridge.registry().contains(&request.operation) {
        if let Some(relay) = relay {
            return relay.forward(&request).await;
        }
    }

    let id = request.id.clone();
    let timeout = request.timeout_ms.map(Duration::from_millis);
    match bridge.submit_with_timeout(&request.operation, request.params, timeout) {
        Ok(pending) => ResponseEnvelope::from_result(id, &pending.wait().await),
        Err(err) => ResponseEnvelope::error(id, &err),
    }
}

async fn write_response<W>(writer: &Mutex<W>, response: &ResponseEnvelope)
where
    W: AsyncWrite + Unpin,
{
    let mut line = match serde_json::to_vec(response) {
        Ok(line) => line,
        Err(err) => {
            warn!(error = %err, "failed to serialize response");
            return;
        }
    };
    line.push(b'\n');

    let mut writer = writer.lock().await;
    if let Err(err) = writer.write_all(&line).await {
        debug!(error = %err, "failed to write response");
        return;
    }
    let _ = writer.flush().await;
}
