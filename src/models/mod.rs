mod facility;
mod ids;
mod item;
mod product;
mod quantity;
mod request;
mod stop;
mod task;
mod vehicle;

pub use facility::*;
pub use ids::*;
pub use item::*;
pub use product::*;
pub use quantity::*;
pub use request::*;
pub use stop::*;
pub use task::*;
pub use vehicle::*;

use serde::Deserialize;

/// The `/optimize` request envelope (§6). Missing top-level arrays are
/// permissively defaulted to empty rather than rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub dispatch_requests: Vec<Option<DispatchRequest>>,
    #[serde(default)]
    pub replenishment_requests: Vec<Option<ReplenishmentRequest>>,
    #[serde(default)]
    pub available_vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub all_facilities: Vec<Facility>,
    #[serde(default)]
    pub product_catalog: Vec<Product>,
}
