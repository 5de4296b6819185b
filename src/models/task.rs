use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::{FacilityId, RequestId};
use super::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleClass {
    ColdChain,
    RawMaterialTruck,
}

impl VehicleClass {
    pub fn shipment_type(&self) -> &'static str {
        match self {
            VehicleClass::ColdChain => "VRP_OPTIMIZED_COLD_CHAIN",
            VehicleClass::RawMaterialTruck => "VRP_OPTIMIZED_RAW_MATERIAL_TRUCK",
        }
    }

    pub fn wants_refrigerated(&self) -> bool {
        matches!(self, VehicleClass::ColdChain)
    }
}

/// A single origin -> single destination transport task, the homogeneous
/// unit produced by task synthesis and consumed by the VRP layer.
#[derive(Debug, Clone)]
pub struct TransportTask {
    pub from: FacilityId,
    pub to: FacilityId,
    pub demand_kg: i64,
    pub items: Vec<Item>,
    pub vehicle_type: VehicleClass,
    pub original_request_ids: BTreeSet<RequestId>,
}
