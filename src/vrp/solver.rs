//! VRP Solver Adapter (§4.5): drives a capacitated pickup-and-delivery
//! solver over a single vehicle class and extracts per-vehicle routes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::{debug, warn};
use vrp_core::models::common::*;
use vrp_core::models::problem::{
    Job, JobIdDimension, VehicleDetailBuilder, VehicleIdDimension, Vehicle as VrpVehicle,
};
use vrp_core::prelude::*;
use vrp_core::rosomaxa::prelude::TelemetryMode;

use crate::logging::RequestLog;
use crate::models::{FacilityId, TransportTask, Vehicle};

use super::model_builder::{RoutingModel, DEPOT_INDEX};

/// One vehicle's assigned stops: the sequence of non-depot facilities
/// visited (may repeat a facility for pass-through pickups/deliveries), and
/// the task indices bound to this route in task-creation order (not solver
/// visit order — §4.6 step 2 fixes a facility's action by the first task
/// to touch it in that order).
pub struct VehicleRoute {
    pub vehicle: Vehicle,
    pub route_facilities: Vec<FacilityId>,
    pub task_indices: Vec<usize>,
}

/// No task ever waits: the time window only exists to satisfy the
/// builder's API, so it spans the whole planning horizon.
fn unbounded_window() -> TimeWindow {
    TimeWindow::new(0.0, f64::MAX / 2.0)
}

pub fn solve(
    log: &RequestLog,
    tasks: &[TransportTask],
    vehicles: &[Vehicle],
    model: &RoutingModel,
    solver_budget: chrono::Duration,
) -> Vec<VehicleRoute> {
    if tasks.is_empty() || vehicles.is_empty() {
        return Vec::new();
    }

    let mut job_to_task: BTreeMap<String, usize> = BTreeMap::new();
    let jobs: Vec<Job> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let pickup_id = format!("pickup-{i}");
            let delivery_id = format!("delivery-{i}");
            let (from_node, to_node) = model.pickups_deliveries[i];
            let job = MultiBuilder::default()
                .id(&format!("task-{i}"))
                .add_job(
                    SingleBuilder::default()
                        .id(&pickup_id)
                        .demand(Demand::pudo_pickup(task.demand_kg as i32))
                        .location(from_node)
                        .unwrap()
                        .times(vec![unbounded_window()])
                        .unwrap()
                        .build()
                        .unwrap(),
                )
                .add_job(
                    SingleBuilder::default()
                        .id(&delivery_id)
                        .demand(Demand::pudo_delivery(task.demand_kg as i32))
                        .location(to_node)
                        .unwrap()
                        .times(vec![unbounded_window()])
                        .unwrap()
                        .build()
                        .unwrap(),
                )
                .build_as_job()
                .unwrap();
            job_to_task.insert(pickup_id, i);
            job_to_task.insert(delivery_id, i);
            job
        })
        .collect();

    let flat_matrix: Vec<f64> = model
        .distance_matrix
        .iter()
        .flatten()
        .map(|&d| d as f64)
        .collect();
    let routing_matrix =
        Arc::new(SimpleTransportCost::new(flat_matrix.clone(), flat_matrix).unwrap());

    let vrp_vehicles: Vec<VrpVehicle> = vehicles
        .iter()
        .map(|vehicle| {
            VehicleBuilder::default()
                .id(vehicle.vehicle_id.as_str())
                .add_detail(
                    VehicleDetailBuilder::default()
                        .set_start_location(DEPOT_INDEX)
                        .set_start_time(0.0)
                        .build()
                        .unwrap(),
                )
                .capacity(SingleDimLoad::new(vehicle.capacity_kg() as i32))
                .build()
                .unwrap()
        })
        .collect();

    let capacity_feature = CapacityFeatureBuilder::<SingleDimLoad>::new("capacity")
        .build()
        .unwrap();
    let transport_feature = TransportFeatureBuilder::new("min-distance")
        .set_transport_cost(routing_matrix.clone())
        .set_time_constrained(false)
        .build_minimize_duration()
        .unwrap();
    let minimize_unassigned = MinimizeUnassignedBuilder::new("min-unassigned")
        .build()
        .unwrap();
    let goal = GoalContextBuilder::with_features(&[
        minimize_unassigned,
        transport_feature,
        capacity_feature,
    ])
    .unwrap()
    .build()
    .unwrap();

    let problem = match ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(vrp_vehicles.into_iter())
        .with_goal(goal)
        .with_transport_cost(routing_matrix.clone())
        .build()
    {
        Ok(problem) => Arc::new(problem),
        Err(err) => {
            warn!("{log} failed to build routing problem: {err}");
            return Vec::new();
        }
    };

    // First-solution strategy only (§4.5): one construction-heuristic pass,
    // bounded by the configured wall-clock budget, no generational search.
    let config = match VrpConfigBuilder::new(problem.clone())
        .set_telemetry_mode(TelemetryMode::None)
        .prebuild()
        .and_then(|builder| {
            builder
                .with_max_time(Some(solver_budget.num_seconds().max(1) as usize))
                .with_max_generations(Some(1))
                .build()
        }) {
        Ok(config) => config,
        Err(err) => {
            warn!("{log} failed to build solver config: {err}");
            return Vec::new();
        }
    };

    let solution = match Solver::new(problem, config).solve() {
        Ok(solution) => solution,
        Err(err) => {
            warn!("{log} solver produced no solution: {err}");
            return Vec::new();
        }
    };

    vehicles
        .iter()
        .map(|vehicle| {
            let route = solution.routes.iter().find(|route| {
                route.actor.vehicle.dimens.get_vehicle_id().unwrap() == vehicle.vehicle_id.as_str()
            });
            let Some(route) = route else {
                return VehicleRoute {
                    vehicle: vehicle.clone(),
                    route_facilities: Vec::new(),
                    task_indices: Vec::new(),
                };
            };
            let mut route_facilities = Vec::new();
            let mut visited_tasks: BTreeSet<usize> = BTreeSet::new();
            for activity in route.tour.all_activities() {
                let Some(job) = &activity.job else { continue };
                let job_id = job.dimens.get_job_id().unwrap();
                let Some(&task_idx) = job_to_task.get(job_id.as_str()) else {
                    continue;
                };
                route_facilities.push(model.locations[activity.place.location].clone());
                visited_tasks.insert(task_idx);
            }
            // Stop aggregation (§4.6 step 2) needs tasks_in_route in
            // task-creation order to fix each facility's first-touched
            // action, not the solver's visit order (the solver is free to
            // visit a later task's pickup before an earlier task's
            // delivery at a shared facility).
            let task_indices: Vec<usize> = (0..tasks.len()).filter(|i| visited_tasks.contains(i)).collect();
            debug!(
                "{log} vehicle {} visits {} stops across {} tasks",
                vehicle.vehicle_id,
                route_facilities.len(),
                task_indices.len()
            );
            VehicleRoute {
                vehicle: vehicle.clone(),
                route_facilities,
                task_indices,
            }
        })
        .collect()
}
