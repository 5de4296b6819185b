//! Task Synthesizer (§4.3): turns dispatch/replenishment requests into a
//! flat list of TransportTasks, in two ordered phases. All mutation of the
//! virtual processor inventory is confined to this module.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::geo::normalize_to_kg;
use crate::inventory::{InventoryOracle, VirtualInventory};
use crate::logging::RequestLog;
use crate::models::{
    DispatchRequest, Facility, FacilityId, FacilityType, ProductCatalog, ReplenishmentRequest,
    TransportTask, VehicleClass,
};

/// The first ACTIVE facility of the required type in input order (§4.3
/// "Determinism"), resolved once up front and threaded through Phase 2
/// explicitly rather than recomputed (§9 design note).
pub struct Defaults {
    pub default_warehouse: Option<FacilityId>,
    pub default_processor: Option<FacilityId>,
}

pub fn resolve_defaults(all_facilities: &[Facility]) -> Defaults {
    let default_warehouse = all_facilities
        .iter()
        .find(|f| f.facility_type == FacilityType::Warehouse && f.status.is_active())
        .map(|f| f.facility_id.clone());
    let default_processor = all_facilities
        .iter()
        .find(|f| f.facility_type == FacilityType::Processor && f.status.is_active())
        .map(|f| f.facility_id.clone());
    Defaults {
        default_warehouse,
        default_processor,
    }
}

pub async fn synthesize_tasks(
    log: &RequestLog,
    dispatch_requests: &[DispatchRequest],
    replenishment_requests: &[ReplenishmentRequest],
    all_facilities: &[Facility],
    facilities_by_id: &HashMap<FacilityId, Facility>,
    catalog: &ProductCatalog,
    oracle: &impl InventoryOracle,
) -> Vec<TransportTask> {
    let mut inventory = VirtualInventory::build(dispatch_requests, facilities_by_id);
    let mut tasks = Vec::new();

    let active_warehouses: Vec<FacilityId> = all_facilities
        .iter()
        .filter(|f| f.facility_type == FacilityType::Warehouse && f.status.is_active())
        .map(|f| f.facility_id.clone())
        .collect();

    phase1_retailer_demand(
        log,
        replenishment_requests,
        &mut inventory,
        catalog,
        oracle,
        &active_warehouses,
        &mut tasks,
    )
    .await;

    let defaults = resolve_defaults(all_facilities);
    phase2_surplus_and_raw_materials(
        log,
        dispatch_requests,
        facilities_by_id,
        catalog,
        &defaults,
        &mut inventory,
        &mut tasks,
    );

    tasks
}

#[allow(clippy::too_many_arguments)]
async fn phase1_retailer_demand(
    log: &RequestLog,
    replenishment_requests: &[ReplenishmentRequest],
    inventory: &mut VirtualInventory,
    catalog: &ProductCatalog,
    oracle: &impl InventoryOracle,
    active_warehouses: &[FacilityId],
    tasks: &mut Vec<TransportTask>,
) {
    for request in replenishment_requests {
        if !request.status.is_pending() {
            continue;
        }
        for item in &request.items {
            let Some(sku) = item.sku().cloned() else {
                debug!("{log} replenishment item has no sku, skipping");
                continue;
            };
            let mut needed_value = item.quantity().value;
            let needed_unit = item.quantity().unit.clone();

            // Processor pass: consume matching processor sources in
            // insertion order until the need is met or sources run out.
            for source in inventory.sources_for(sku.as_str()) {
                if needed_value <= 0.0 {
                    break;
                }
                if source.remaining_value <= 0.0 || source.unit != needed_unit {
                    continue;
                }
                let take = needed_value.min(source.remaining_value);
                let task_item = source.original_item.with_quantity_value(take);
                let demand_kg = normalize_to_kg(&task_item, catalog).round() as i64;
                tasks.push(TransportTask {
                    from: source.from_facility.clone(),
                    to: request.requesting_facility_id.clone(),
                    demand_kg,
                    items: vec![task_item],
                    vehicle_type: VehicleClass::ColdChain,
                    original_request_ids: BTreeSet::from([source.original_request_id.clone()]),
                });
                needed_value -= take;
                source.remaining_value -= take;
            }

            // Warehouse pass: only entered if the processor pass fell short.
            if needed_value > 0.0 {
                for warehouse in active_warehouses {
                    if needed_value <= 0.0 {
                        break;
                    }
                    let assets = oracle.lookup(log, warehouse, &sku).await;
                    for asset in assets {
                        if needed_value <= 0.0 {
                            break;
                        }
                        let available = asset.current_quantity.value;
                        if available <= 0.0 {
                            continue;
                        }
                        let take = needed_value.min(available);
                        let task_item = crate::models::Item::AssetLot {
                            asset_id: asset.asset_id.clone(),
                            sku: Some(sku.clone()),
                            quantity: crate::models::Quantity::new(take, needed_unit.clone()),
                        };
                        let demand_kg = normalize_to_kg(&task_item, catalog).round() as i64;
                        tasks.push(TransportTask {
                            from: warehouse.clone(),
                            to: request.requesting_facility_id.clone(),
                            demand_kg,
                            items: vec![task_item],
                            vehicle_type: VehicleClass::ColdChain,
                            // Phase 1's warehouse-sourced tasks carry no
                            // originalRequestIDs — see open question 2.
                            original_request_ids: BTreeSet::new(),
                        });
                        needed_value -= take;
                    }
                }
            }
        }
    }
}

fn phase2_surplus_and_raw_materials(
    _log: &RequestLog,
    dispatch_requests: &[DispatchRequest],
    facilities_by_id: &HashMap<FacilityId, Facility>,
    catalog: &ProductCatalog,
    defaults: &Defaults,
    inventory: &mut VirtualInventory,
    tasks: &mut Vec<TransportTask>,
) {
    // Surplus: processor sources with remaining quantity move to the
    // default warehouse.
    if let Some(default_warehouse) = &defaults.default_warehouse {
        for source in inventory.all_sources_mut() {
            if source.remaining_value <= 0.0 {
                continue;
            }
            let task_item = source.original_item.with_quantity_value(source.remaining_value);
            let demand_kg = normalize_to_kg(&task_item, catalog).round() as i64;
            tasks.push(TransportTask {
                from: source.from_facility.clone(),
                to: default_warehouse.clone(),
                demand_kg,
                items: vec![task_item],
                vehicle_type: VehicleClass::ColdChain,
                original_request_ids: BTreeSet::from([source.original_request_id.clone()]),
            });
        }
    }

    // Raw materials: pending farm dispatches move to the default processor.
    if let Some(default_processor) = &defaults.default_processor {
        for request in dispatch_requests {
            if !request.status.is_pending() {
                continue;
            }
            let Some(facility) = facilities_by_id.get(&request.from_facility_id) else {
                continue;
            };
            if facility.facility_type != FacilityType::Farm {
                continue;
            }
            let demand_kg: i64 = request
                .items
                .iter()
                .map(|item| normalize_to_kg(item, catalog))
                .sum::<f64>()
                .round() as i64;
            tasks.push(TransportTask {
                from: request.from_facility_id.clone(),
                to: default_processor.clone(),
                demand_kg,
                items: request.items.clone(),
                vehicle_type: VehicleClass::RawMaterialTruck,
                original_request_ids: BTreeSet::from([request.request_id.clone()]),
            });
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::{
        Address, DispatchRequest, FacilityStatus, Item, Product, Quantity, ReplenishmentRequest,
        RequestId, RequestStatus, Sku,
    };
    use std::collections::HashMap as Map;

    struct EmptyOracle;
    impl InventoryOracle for EmptyOracle {
        async fn lookup(
            &self,
            _log: &RequestLog,
            _facility: &FacilityId,
            _sku: &Sku,
        ) -> Vec<crate::inventory::AssetAvailability> {
            Vec::new()
        }
    }

    struct FakeOracle {
        assets: Vec<(FacilityId, Sku, Vec<crate::inventory::AssetAvailability>)>,
    }
    impl InventoryOracle for FakeOracle {
        async fn lookup(
            &self,
            _log: &RequestLog,
            facility: &FacilityId,
            sku: &Sku,
        ) -> Vec<crate::inventory::AssetAvailability> {
            self.assets
                .iter()
                .find(|(f, s, _)| f == facility && s == sku)
                .map(|(_, _, a)| a.clone())
                .unwrap_or_default()
        }
    }

    fn facility(id: &str, ty: FacilityType) -> Facility {
        Facility {
            facility_id: FacilityId::new(id),
            facility_type: ty,
            status: FacilityStatus("ACTIVE".to_string()),
            address: Address {
                latitude: 0.0,
                longitude: 0.0,
            },
        }
    }

    fn catalog_with(sku: &str, avg_weight_kg: f64) -> ProductCatalog {
        crate::models::index_catalog(vec![Product {
            sku: Sku::new(sku),
            average_weight: Quantity::new(avg_weight_kg, "kg"),
        }])
    }

    #[tokio::test]
    async fn scenario_single_match_exact() {
        let facilities = vec![
            facility("P1", FacilityType::Processor),
            facility("R1", FacilityType::Retailer),
        ];
        let by_id: Map<_, _> = facilities
            .iter()
            .cloned()
            .map(|f| (f.facility_id.clone(), f))
            .collect();
        let dispatch = vec![DispatchRequest {
            request_id: RequestId::new("DREQ1"),
            from_facility_id: FacilityId::new("P1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("A"),
                quantity: Quantity::new(10.0, "kg"),
            }],
        }];
        let replenishment = vec![ReplenishmentRequest {
            request_id: RequestId::new("RREQ1"),
            requesting_facility_id: FacilityId::new("R1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("A"),
                quantity: Quantity::new(10.0, "kg"),
            }],
        }];
        let catalog = catalog_with("A", 1.0);
        let log = RequestLog::new();
        let tasks = synthesize_tasks(
            &log,
            &dispatch,
            &replenishment,
            &facilities,
            &by_id,
            &catalog,
            &EmptyOracle,
        )
        .await;
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.from.as_str(), "P1");
        assert_eq!(task.to.as_str(), "R1");
        assert_eq!(task.demand_kg, 10);
        assert_eq!(
            task.original_request_ids,
            BTreeSet::from([RequestId::new("DREQ1")])
        );
    }

    #[tokio::test]
    async fn scenario_partial_plus_surplus() {
        let facilities = vec![
            facility("P1", FacilityType::Processor),
            facility("R1", FacilityType::Retailer),
            facility("W1", FacilityType::Warehouse),
        ];
        let by_id: Map<_, _> = facilities
            .iter()
            .cloned()
            .map(|f| (f.facility_id.clone(), f))
            .collect();
        let dispatch = vec![DispatchRequest {
            request_id: RequestId::new("DREQ1"),
            from_facility_id: FacilityId::new("P1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("A"),
                quantity: Quantity::new(10.0, "kg"),
            }],
        }];
        let replenishment = vec![ReplenishmentRequest {
            request_id: RequestId::new("RREQ1"),
            requesting_facility_id: FacilityId::new("R1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("A"),
                quantity: Quantity::new(4.0, "kg"),
            }],
        }];
        let catalog = catalog_with("A", 1.0);
        let log = RequestLog::new();
        let tasks = synthesize_tasks(
            &log,
            &dispatch,
            &replenishment,
            &facilities,
            &by_id,
            &catalog,
            &EmptyOracle,
        )
        .await;
        assert_eq!(tasks.len(), 2);
        let to_retailer = tasks.iter().find(|t| t.to.as_str() == "R1").unwrap();
        assert_eq!(to_retailer.demand_kg, 4);
        let to_warehouse = tasks.iter().find(|t| t.to.as_str() == "W1").unwrap();
        assert_eq!(to_warehouse.demand_kg, 6);
    }

    #[tokio::test]
    async fn scenario_warehouse_fallback() {
        let facilities = vec![
            facility("P1", FacilityType::Processor),
            facility("R1", FacilityType::Retailer),
            facility("W1", FacilityType::Warehouse),
        ];
        let by_id: Map<_, _> = facilities
            .iter()
            .cloned()
            .map(|f| (f.facility_id.clone(), f))
            .collect();
        let dispatch = vec![DispatchRequest {
            request_id: RequestId::new("DREQ1"),
            from_facility_id: FacilityId::new("P1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("A"),
                quantity: Quantity::new(3.0, "kg"),
            }],
        }];
        let replenishment = vec![ReplenishmentRequest {
            request_id: RequestId::new("RREQ1"),
            requesting_facility_id: FacilityId::new("R1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("A"),
                quantity: Quantity::new(7.0, "kg"),
            }],
        }];
        let catalog = catalog_with("A", 1.0);
        let oracle = FakeOracle {
            assets: vec![(
                FacilityId::new("W1"),
                Sku::new("A"),
                vec![crate::inventory::AssetAvailability {
                    asset_id: crate::models::AssetId::new("X"),
                    current_quantity: Quantity::new(5.0, "kg"),
                }],
            )],
        };
        let log = RequestLog::new();
        let tasks = synthesize_tasks(
            &log,
            &dispatch,
            &replenishment,
            &facilities,
            &by_id,
            &catalog,
            &oracle,
        )
        .await;
        let to_retailer: Vec<_> = tasks.iter().filter(|t| t.to.as_str() == "R1").collect();
        assert_eq!(to_retailer.len(), 2);
        let from_p1 = to_retailer.iter().find(|t| t.from.as_str() == "P1").unwrap();
        assert_eq!(from_p1.demand_kg, 3);
        let from_w1 = to_retailer.iter().find(|t| t.from.as_str() == "W1").unwrap();
        assert_eq!(from_w1.demand_kg, 4);
        assert!(from_w1.original_request_ids.is_empty());
    }

    #[tokio::test]
    async fn scenario_raw_material_only() {
        let facilities = vec![
            facility("F1", FacilityType::Farm),
            facility("P1", FacilityType::Processor),
        ];
        let by_id: Map<_, _> = facilities
            .iter()
            .cloned()
            .map(|f| (f.facility_id.clone(), f))
            .collect();
        let dispatch = vec![DispatchRequest {
            request_id: RequestId::new("DREQ1"),
            from_facility_id: FacilityId::new("F1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("B"),
                quantity: Quantity::new(100.0, "kg"),
            }],
        }];
        let catalog = catalog_with("B", 1.0);
        let log = RequestLog::new();
        let tasks = synthesize_tasks(
            &log,
            &dispatch,
            &[],
            &facilities,
            &by_id,
            &catalog,
            &EmptyOracle,
        )
        .await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].vehicle_type, VehicleClass::RawMaterialTruck);
        assert_eq!(tasks[0].from.as_str(), "F1");
        assert_eq!(tasks[0].to.as_str(), "P1");
    }

    #[tokio::test]
    async fn unit_mismatch_skips_source() {
        let facilities = vec![
            facility("P1", FacilityType::Processor),
            facility("R1", FacilityType::Retailer),
        ];
        let by_id: Map<_, _> = facilities
            .iter()
            .cloned()
            .map(|f| (f.facility_id.clone(), f))
            .collect();
        let dispatch = vec![DispatchRequest {
            request_id: RequestId::new("DREQ1"),
            from_facility_id: FacilityId::new("P1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("A"),
                quantity: Quantity::new(10.0, "lb"),
            }],
        }];
        let replenishment = vec![ReplenishmentRequest {
            request_id: RequestId::new("RREQ1"),
            requesting_facility_id: FacilityId::new("R1"),
            status: RequestStatus("PENDING".to_string()),
            items: vec![Item::SkuRequest {
                sku: Sku::new("A"),
                quantity: Quantity::new(10.0, "kg"),
            }],
        }];
        let catalog = catalog_with("A", 1.0);
        let log = RequestLog::new();
        let tasks = synthesize_tasks(
            &log,
            &dispatch,
            &replenishment,
            &facilities,
            &by_id,
            &catalog,
            &EmptyOracle,
        )
        .await;
        // No warehouse exists, so the mismatched source yields no task at all.
        assert!(tasks.is_empty());
    }
}
