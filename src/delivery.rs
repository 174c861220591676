use crate::types::DeliveryResult;
use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};
use url::Url;

/// Fan-out seam. Delivery never fails the run; every endpoint's outcome is
/// reported in order.
#[async_trait]
pub trait Deliver: Send + Sync {
    async fn deliver(&self, message: &str, entry_title: &str) -> Vec<DeliveryResult>;
}

/// Posts messages to Discord-style webhooks as a JSON `{"content": ...}`
/// body, one POST per configured endpoint.
pub struct WebhookDeliverer {
    client: reqwest::Client,
    endpoints: Vec<Url>,
}

impl WebhookDeliverer {
    pub fn new(client: reqwest::Client, endpoints: Vec<Url>) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl Deliver for WebhookDeliverer {
    async fn deliver(&self, message: &str, entry_title: &str) -> Vec<DeliveryResult> {
        let mut results = Vec::with_capacity(self.endpoints.len());

        for endpoint in &self.endpoints {
            let outcome = self
                .client
                .post(endpoint.clone())
                .json(&json!({ "content": message }))
                .send()
                .await;

            let result = match outcome {
                Ok(response) => {
                    let status = response.status().as_u16();
                    // Discord answers 204 on plain webhooks, 200 with ?wait=true.
                    let success = status == 200 || status == 204;
                    if success {
                        info!("Successfully posted: {}", entry_title);
                    } else {
                        warn!("Failed to post: {} ({})", entry_title, status);
                    }
                    DeliveryResult {
                        endpoint: endpoint.to_string(),
                        http_status: Some(status),
                        success,
                    }
                }
                Err(e) => {
                    warn!("Failed to post: {} ({})", entry_title, e);
                    DeliveryResult {
                        endpoint: endpoint.to_string(),
                        http_status: None,
                        success: false,
                    }
                }
            };
            results.push(result);
        }

        results
    }
}
