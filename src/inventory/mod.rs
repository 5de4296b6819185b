//! Inventory View (§4.2): the virtual processor inventory built from
//! pending dispatch requests, plus the external warehouse inventory oracle.

mod http_oracle;
mod oracle;

pub use http_oracle::HttpInventoryOracle;
pub use oracle::{AssetAvailability, InventoryOracle};

use crate::models::{DispatchRequest, FacilityType, Item, RequestId};

/// A claim on a processor's dispatched-but-unrouted lot, mutated during
/// Phase 1 of task synthesis and drained during Phase 2.
#[derive(Debug, Clone)]
pub struct InventorySource {
    pub from_facility: crate::models::FacilityId,
    pub remaining_value: f64,
    pub unit: String,
    pub original_item: Item,
    pub original_request_id: RequestId,
}

/// Virtual processor inventory, keyed by sku (or assetID when sku is
/// absent, per §4.2). Built once per request and scoped entirely to task
/// synthesis — never exposed to later pipeline stages (§9).
///
/// Backed by a flat Vec of (key, sources) groups rather than a hash map so
/// that Phase 2's surplus scan preserves the sku-group insertion order the
/// rest of the pipeline's determinism guarantee (§5) depends on.
#[derive(Debug, Default)]
pub struct VirtualInventory {
    groups: Vec<(String, Vec<InventorySource>)>,
}

impl VirtualInventory {
    pub fn build(
        dispatch_requests: &[DispatchRequest],
        facilities: &std::collections::HashMap<crate::models::FacilityId, crate::models::Facility>,
    ) -> Self {
        let mut inventory = Self::default();
        for request in dispatch_requests {
            if !request.status.is_pending() {
                continue;
            }
            let Some(facility) = facilities.get(&request.from_facility_id) else {
                continue;
            };
            if facility.facility_type != FacilityType::Processor {
                continue;
            }
            for item in &request.items {
                let Some(key) = item.inventory_key() else {
                    continue;
                };
                inventory.group_mut(&key).push(InventorySource {
                    from_facility: request.from_facility_id.clone(),
                    remaining_value: item.quantity().value,
                    unit: item.quantity().unit.clone(),
                    original_item: item.clone(),
                    original_request_id: request.request_id.clone(),
                });
            }
        }
        inventory
    }

    fn group_mut(&mut self, key: &str) -> &mut Vec<InventorySource> {
        if let Some(pos) = self.groups.iter().position(|(k, _)| k == key) {
            &mut self.groups[pos].1
        } else {
            self.groups.push((key.to_string(), Vec::new()));
            &mut self.groups.last_mut().unwrap().1
        }
    }

    pub fn sources_for(&mut self, sku: &str) -> &mut [InventorySource] {
        self.group_mut(sku)
    }

    /// All sources across all skus, for Phase 2's surplus pass. Iteration
    /// order follows sku-group insertion order, then within-group order —
    /// matching the source's dict-of-lists iteration.
    pub fn all_sources_mut(&mut self) -> impl Iterator<Item = &mut InventorySource> {
        self.groups.iter_mut().flat_map(|(_, v)| v.iter_mut())
    }
}
