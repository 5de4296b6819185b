use serde::{Deserialize, Serialize};

use super::ids::{DriverId, VehicleId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSpecs {
    pub payload_tonnes: f64,
    pub refrigerated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(rename = "vehicleID")]
    pub vehicle_id: VehicleId,
    #[serde(rename = "ownerDriverID")]
    pub owner_driver_id: DriverId,
    pub specs: VehicleSpecs,
}

impl Vehicle {
    /// Capacity expressed in integer kilograms, as consumed by the VRP
    /// capacity dimension (§4.4).
    pub fn capacity_kg(&self) -> i64 {
        (self.specs.payload_tonnes * 1000.0).floor() as i64
    }
}
