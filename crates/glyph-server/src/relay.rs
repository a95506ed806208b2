//! Optional upstream relay
//!
//! Operations the local registry does not know can be forwarded to a
//! companion HTTP service. The relay is best effort: any transport or
//! decoding failure comes back as a relay_unavailable error envelope
//! rather than tearing down the connection.

use std::time::Duration;

use glyph_bridge::{BridgeError, RequestEnvelope, ResponseEnvelope};
use tracing::warn;

#[derive(Clone)]
pub struct RelayClient {
    endpoint: String,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Forward a request envelope upstream and return its response envelope
    pub async fn forward(&self, request: &RequestEnvelope) -> ResponseEnvelope {
        let id = request.id.clone();
        let outcome = async {
            let response = self
                .client
                .post(&self.endpoint)
                .json(request)
                .send()
                .await?;
            response.error_for_status_ref()?;
            response.json::<ResponseEnvelope>().await
        }
        .await;

        match outcome {
            Ok(mut envelope) => {
                envelope.id = id;
                envelope
            }
            Err(err) => {
                warn!(operation = %request.operation, error = %err, "relay forward failed");
                ResponseEnvelope::error(id, &BridgeError::RelayUnavailable(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[tokio::test]
    async fn test_unreachable_endpoint_maps_to_relay_unavailable() {
        let relay =
            RelayClient::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        let request = RequestEnvelope {
            id: Some("r1".into()),
            operation: "render_scene".into(),
            params: Map::new(),
            timeout_ms: None,
        };

        let response = relay.forward(&request).await;
        assert_eq!(response.id.as_deref(), Some("r1"));
        assert_eq!(response.error.unwrap().kind, "relay_unavailable");
    }
}
