use serde::{Deserialize, Serialize};

use super::ids::{DriverId, FacilityId, RequestId, VehicleId};
use super::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StopAction {
    Pickup,
    Delivery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(rename = "facilityID")]
    pub facility_id: FacilityId,
    pub action: StopAction,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingAssignment {
    #[serde(rename = "driverID")]
    pub driver_id: DriverId,
    #[serde(rename = "vehicleID")]
    pub vehicle_id: VehicleId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    #[serde(rename = "originalRequestIDs")]
    pub original_request_ids: Vec<RequestId>,
    pub bidding_assignments: Vec<BiddingAssignment>,
    pub shipment_type: String,
    pub stops: Vec<Stop>,
}
