use serde::{Deserialize, Serialize};

use super::ids::{FacilityId, RequestId};
use super::item::Item;

/// Mirrors the source system's open status string; only PENDING is ever
/// matched against here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestStatus(pub String);

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        self.0 == "PENDING"
    }
}

/// Originates at a FARM or PROCESSOR; items are physical lots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    #[serde(rename = "requestID")]
    pub request_id: RequestId,
    #[serde(rename = "fromFacilityID")]
    pub from_facility_id: FacilityId,
    pub status: RequestStatus,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Raised by a RETAILER; items are sku-keyed demand lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplenishmentRequest {
    #[serde(rename = "requestID")]
    pub request_id: RequestId,
    #[serde(rename = "requestingFacilityID")]
    pub requesting_facility_id: FacilityId,
    pub status: RequestStatus,
    #[serde(default)]
    pub items: Vec<Item>,
}
