//! Great-circle distance and unit normalization (§4.1).

use log::warn;

use crate::models::{Address, Item, ProductCatalog};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometers.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1_rad, lon1_rad) = (lat1.to_radians(), lon1.to_radians());
    let (lat2_rad, lon2_rad) = (lat2.to_radians(), lon2.to_radians());
    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;
    let a = (dlat / 2.0).sin().powi(2) + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn haversine_addr(a: &Address, b: &Address) -> f64 {
    haversine(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// quantityValue * averageWeight(kg). Missing sku or catalog entry yields 0
/// and logs a diagnostic (§4.1).
pub fn normalize_to_kg(item: &Item, catalog: &ProductCatalog) -> f64 {
    let Some(key) = item.inventory_key() else {
        return 0.0;
    };
    let sku = crate::models::Sku::new(key);
    let Some(product) = catalog.get(&sku) else {
        warn!("unknown sku '{sku}' during weight normalization, treating as 0kg");
        return 0.0;
    };
    let avg_weight_kg = match product.average_weight.unit.as_str() {
        "g" => product.average_weight.value / 1000.0,
        _ => product.average_weight.value,
    };
    item.quantity().value * avg_weight_kg
}
