//! Vehicle Routing (§4.4–§4.5): builds a routing model per vehicle class
//! and drives the solver over it.

mod model_builder;
mod solver;

pub use model_builder::RoutingModel;
pub use solver::{solve, VehicleRoute};
