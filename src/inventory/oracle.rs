use serde::Deserialize;

use crate::logging::RequestLog;
use crate::models::{AssetId, FacilityId, Quantity, Sku};

/// One asset available at a warehouse for a given sku, as returned by the
/// external inventory service (§4.2, §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAvailability {
    #[serde(rename = "assetID")]
    pub asset_id: AssetId,
    pub current_quantity: Quantity,
}

/// Abstracts the external warehouse-inventory lookup behind a single method
/// so the task synthesizer can run against an in-memory fake in tests
/// (§9 design note).
pub trait InventoryOracle: Send + Sync {
    fn lookup(
        &self,
        log: &RequestLog,
        facility: &FacilityId,
        sku: &Sku,
    ) -> impl std::future::Future<Output = Vec<AssetAvailability>> + Send;
}
