use std::time::Duration;

use log::warn;

use crate::config::Config;
use crate::logging::RequestLog;
use crate::models::{FacilityId, Sku};

use super::oracle::{AssetAvailability, InventoryOracle};

/// Calls the real warehouse-inventory service over HTTP (§6). Any non-200
/// response, timeout, or network error is treated as empty inventory for
/// that warehouse — the lookup never fails the enclosing request (§4.2).
#[derive(Debug, Clone)]
pub struct HttpInventoryOracle {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpInventoryOracle {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::ClientBuilder::new()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            base_url: config.api_server_url.clone(),
            bearer_token: config.agent_api_token.clone(),
        }
    }
}

impl InventoryOracle for HttpInventoryOracle {
    async fn lookup(
        &self,
        log: &RequestLog,
        facility: &FacilityId,
        sku: &Sku,
    ) -> Vec<AssetAvailability> {
        let url = format!(
            "{}/api/v1/facilities/{}/inventory",
            self.base_url, facility
        );
        let mut request = self.client.get(&url).query(&[("sku", sku.as_str())]);
        if let Some(token) = &self.bearer_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "{log} warehouse lookup failed for facility {facility} sku {sku}: {err}"
                );
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(
                "{log} warehouse lookup returned {} for facility {facility} sku {sku}",
                response.status()
            );
            return Vec::new();
        }

        match response.json::<Vec<AssetAvailability>>().await {
            Ok(assets) => assets,
            Err(err) => {
                warn!(
                    "{log} warehouse lookup returned unparseable body for facility {facility} sku {sku}: {err}"
                );
                Vec::new()
            }
        }
    }
}
