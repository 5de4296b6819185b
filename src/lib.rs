pub mod config;
pub mod error;
pub mod geo;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod request_handler;
pub mod stop_aggregator;
pub mod task_synthesizer;
pub mod vrp;
