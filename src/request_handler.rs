//! Request Handler (§4.7): the pipeline's single entrypoint. Drops null
//! request entries, runs task synthesis, partitions by vehicle class, and
//! routes each non-empty class independently.

use std::collections::HashMap;

use log::info;

use crate::inventory::InventoryOracle;
use crate::logging::RequestLog;
use crate::models::{
    index_catalog, Bid, DispatchRequest, Facility, FacilityId, OptimizeRequest,
    ReplenishmentRequest, TransportTask, Vehicle, VehicleClass,
};
use crate::stop_aggregator::aggregate;
use crate::task_synthesizer::synthesize_tasks;
use crate::vrp::{solve, RoutingModel};

pub async fn handle_optimize(
    log: &RequestLog,
    request: OptimizeRequest,
    oracle: &impl InventoryOracle,
    solver_budget: chrono::Duration,
) -> Vec<Bid> {
    let dispatch_requests: Vec<DispatchRequest> =
        request.dispatch_requests.into_iter().flatten().collect();
    let replenishment_requests: Vec<ReplenishmentRequest> = request
        .replenishment_requests
        .into_iter()
        .flatten()
        .collect();
    let catalog = index_catalog(request.product_catalog);
    let facilities_by_id: HashMap<FacilityId, Facility> = request
        .all_facilities
        .iter()
        .cloned()
        .map(|f| (f.facility_id.clone(), f))
        .collect();

    let tasks = synthesize_tasks(
        log,
        &dispatch_requests,
        &replenishment_requests,
        &request.all_facilities,
        &facilities_by_id,
        &catalog,
        oracle,
    )
    .await;

    let (cold_chain_tasks, raw_material_tasks): (Vec<TransportTask>, Vec<TransportTask>) = tasks
        .into_iter()
        .partition(|t| t.vehicle_type == VehicleClass::ColdChain);
    let (refrigerated_vehicles, other_vehicles): (Vec<Vehicle>, Vec<Vehicle>) = request
        .available_vehicles
        .into_iter()
        .partition(|v| v.specs.refrigerated);

    let mut bids = Vec::new();
    if !cold_chain_tasks.is_empty() && !refrigerated_vehicles.is_empty() {
        bids.extend(
            route_class(
                log,
                &cold_chain_tasks,
                &refrigerated_vehicles,
                &facilities_by_id,
                VehicleClass::ColdChain,
                solver_budget,
            )
            .await,
        );
    }
    if !raw_material_tasks.is_empty() && !other_vehicles.is_empty() {
        bids.extend(
            route_class(
                log,
                &raw_material_tasks,
                &other_vehicles,
                &facilities_by_id,
                VehicleClass::RawMaterialTruck,
                solver_budget,
            )
            .await,
        );
    }

    info!("{log} produced {} bids", bids.len());
    bids
}

async fn route_class(
    log: &RequestLog,
    tasks: &[TransportTask],
    vehicles: &[Vehicle],
    facilities_by_id: &HashMap<FacilityId, Facility>,
    vehicle_class: VehicleClass,
    solver_budget: chrono::Duration,
) -> Vec<Bid> {
    let model = RoutingModel::build(tasks, facilities_by_id);

    let log_owned = log.clone();
    let tasks_owned = tasks.to_vec();
    let vehicles_owned = vehicles.to_vec();
    // The solve call is CPU-bound, not network-bound: offload it so it
    // doesn't stall the async executor (§5).
    let routes = tokio::task::spawn_blocking(move || {
        solve(&log_owned, &tasks_owned, &vehicles_owned, &model, solver_budget)
    })
    .await
    .unwrap_or_default();

    aggregate(&routes, tasks, vehicle_class)
}
