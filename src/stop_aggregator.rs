//! Stop Aggregator (§4.6): collapses a vehicle's task assignments into an
//! ordered list of consolidated stops and emits one Bid per non-empty route.

use std::collections::BTreeSet;

use crate::models::{Bid, BiddingAssignment, FacilityId, Item, RequestId, Stop, StopAction, TransportTask, VehicleClass};
use crate::vrp::VehicleRoute;

pub fn aggregate(routes: &[VehicleRoute], tasks: &[TransportTask], vehicle_class: VehicleClass) -> Vec<Bid> {
    routes
        .iter()
        .filter(|route| !route.route_facilities.is_empty())
        .map(|route| aggregate_route(route, tasks, vehicle_class))
        .collect()
}

fn aggregate_route(route: &VehicleRoute, tasks: &[TransportTask], vehicle_class: VehicleClass) -> Bid {
    // stops_map preserves insertion order: the first task to touch a
    // facility fixes that facility's action (§4.6 step 2).
    let mut stops_map: Vec<(FacilityId, StopAction, Vec<Item>)> = Vec::new();
    let mut original_request_ids: BTreeSet<RequestId> = BTreeSet::new();

    for &task_idx in &route.task_indices {
        let task = &tasks[task_idx];
        original_request_ids.extend(task.original_request_ids.iter().cloned());
        insert_stop(&mut stops_map, &task.from, StopAction::Pickup, &task.items);
        insert_stop(&mut stops_map, &task.to, StopAction::Delivery, &task.items);
    }

    let mut stops = Vec::new();
    for facility in &route.route_facilities {
        if let Some(pos) = stops_map.iter().position(|(f, _, _)| f == facility) {
            let (facility_id, action, items) = stops_map.remove(pos);
            stops.push(Stop {
                facility_id,
                action,
                items: merge_items_by_key(items),
            });
        }
    }

    Bid {
        original_request_ids: original_request_ids.into_iter().collect(),
        bidding_assignments: vec![BiddingAssignment {
            driver_id: route.vehicle.owner_driver_id.clone(),
            vehicle_id: route.vehicle.vehicle_id.clone(),
        }],
        shipment_type: vehicle_class.shipment_type().to_string(),
        stops,
    }
}

fn insert_stop(stops_map: &mut Vec<(FacilityId, StopAction, Vec<Item>)>, facility: &FacilityId, action: StopAction, items: &[Item]) {
    if let Some(entry) = stops_map.iter_mut().find(|(f, _, _)| f == facility) {
        entry.2.extend(items.iter().cloned());
    } else {
        stops_map.push((facility.clone(), action, items.to_vec()));
    }
}

/// Merges items sharing an aggregation key (assetID, or sku when no
/// assetID is present — §9's `key()` accessor), keeping the first item's
/// metadata and summing quantity.value (§4.6 step 4).
fn merge_items_by_key(items: Vec<Item>) -> Vec<Item> {
    let mut merged: Vec<Item> = Vec::new();
    for item in items {
        let Some(key) = item.inventory_key() else {
            continue;
        };
        if let Some(existing) = merged
            .iter_mut()
            .find(|m: &&mut Item| m.inventory_key().as_deref() == Some(key.as_str()))
        {
            let summed = existing.quantity().value + item.quantity().value;
            *existing = existing.with_quantity_value(summed);
        } else {
            merged.push(item);
        }
    }
    merged
}
