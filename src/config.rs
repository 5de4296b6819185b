use std::env;

use lazy_static::lazy_static;

/// Process-wide immutable configuration, loaded once at startup from a
/// `.env` file (if present) and the process environment (§4.10, §5).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_server_url: String,
    pub agent_api_token: Option<String>,
    pub port: u16,
    pub solver_budget: chrono::Duration,
}

impl Config {
    fn from_env() -> Self {
        let api_server_url = env::var("API_SERVER_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let agent_api_token = env::var("AGENT_API_TOKEN").ok();
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5001);
        let solver_budget_secs: i64 = env::var("SOLVER_BUDGET_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        Self {
            api_server_url,
            agent_api_token,
            port,
            solver_budget: chrono::Duration::seconds(solver_budget_secs),
        }
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}
