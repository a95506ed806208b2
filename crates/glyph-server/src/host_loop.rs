//! Host document loop
//!
//! The document is single-threaded by contract: only this thread ever
//! holds `&mut Document`. Each tick drains at most one dispatcher batch,
//! mirroring a host application's timer callback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use glyph_bridge::Dispatcher;
use glyph_scene::Document;
use tracing::{debug, error, info};

pub struct HostLoop {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<Document>>,
}

impl HostLoop {
    /// Spawn the host thread, ticking the dispatcher at `interval`
    pub fn start(
        dispatcher: Dispatcher<Document>,
        document: Document,
        interval: Duration,
    ) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("glyph-host".into())
            .spawn(move || {
                info!("host loop started");
                let mut doc = document;
                while !flag.load(Ordering::Acquire) {
                    let executed = dispatcher.tick(&mut doc);
                    if executed > 0 {
                        debug!(executed, "host tick");
                    }
                    thread::sleep(interval);
                }
                // Calls already claimed must still resolve before teardown
                dispatcher.tick(&mut doc);
                info!("host loop stopped");
                doc
            })
            .context("failed to spawn host thread")?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Signal the loop to stop and hand back the final document
    pub fn stop(mut self) -> Document {
        self.stop.store(true, Ordering::Release);
        match self.handle.take().map(thread::JoinHandle::join) {
            Some(Ok(doc)) => doc,
            Some(Err(_)) => {
                error!("host thread panicked; final document state lost");
                Document::default()
            }
            None => Document::default(),
        }
    }
}

impl Drop for HostLoop {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_bridge::{Bridge, BridgeConfig};

    #[tokio::test]
    async fn test_host_loop_executes_submitted_calls() {
        let bridge = Bridge::new(glyph_ops::registry(), BridgeConfig::default());
        let host = HostLoop::start(
            bridge.dispatcher(),
            Document::new(),
            Duration::from_millis(5),
        )
        .expect("spawn host loop");

        let result = bridge
            .call("create_cube", serde_json::Map::new())
            .await
            .expect("submit");
        assert!(result.is_ok());

        let doc = host.stop();
        assert!(doc.object("Cube").is_ok());
    }
}
