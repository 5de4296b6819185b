//! VRP Model Builder (§4.4): location index, distance matrix, and
//! pickup/delivery node pairs, built fresh per vehicle class.

use std::collections::HashMap;

use crate::geo::haversine;
use crate::models::{Facility, FacilityId, TransportTask};

pub const DEPOT_INDEX: usize = 0;

fn location_index(locations: &mut Vec<FacilityId>, id: &FacilityId) -> usize {
    match locations.iter().position(|l| l == id) {
        Some(pos) => pos,
        None => {
            locations.push(id.clone());
            locations.len() - 1
        }
    }
}

/// A vehicle class's routing model: the location index (node 0 is the
/// synthetic depot), a symmetric integer distance matrix, and the
/// fromNode/toNode pair for each task in task order.
pub struct RoutingModel {
    pub locations: Vec<FacilityId>,
    pub distance_matrix: Vec<Vec<i64>>,
    pub pickups_deliveries: Vec<(usize, usize)>,
}

impl RoutingModel {
    pub fn build(tasks: &[TransportTask], facilities: &HashMap<FacilityId, Facility>) -> Self {
        let mut locations = vec![FacilityId::new("DEPOT")];
        let mut pickups_deliveries = Vec::with_capacity(tasks.len());
        for task in tasks {
            let from = location_index(&mut locations, &task.from);
            let to = location_index(&mut locations, &task.to);
            pickups_deliveries.push((from, to));
        }

        let coords: Vec<(f64, f64)> = locations
            .iter()
            .map(|id| match facilities.get(id) {
                Some(facility) => (facility.address.latitude, facility.address.longitude),
                None => (0.0, 0.0),
            })
            .collect();

        let n = locations.len();
        let mut distance_matrix = vec![vec![0i64; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (lat1, lon1) = coords[i];
                let (lat2, lon2) = coords[j];
                distance_matrix[i][j] = (haversine(lat1, lon1, lat2, lon2) * 100.0).floor() as i64;
            }
        }

        Self {
            locations,
            distance_matrix,
            pickups_deliveries,
        }
    }
}
