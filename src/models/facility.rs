use serde::{Deserialize, Serialize};

use super::ids::FacilityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FacilityType {
    Farm,
    Processor,
    Warehouse,
    Retailer,
}

/// Facility status is an open string set in the source system (ACTIVE,
/// INACTIVE, and others we don't need to enumerate); only ACTIVE is ever
/// tested against here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityStatus(pub String);

impl FacilityStatus {
    pub fn is_active(&self) -> bool {
        self.0 == "ACTIVE"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[serde(rename = "facilityID")]
    pub facility_id: FacilityId,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub status: FacilityStatus,
    pub address: Address,
}
