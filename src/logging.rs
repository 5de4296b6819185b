//! Structured per-request logging (§4.9). Diagnostics are routed through a
//! cheap handle carrying a request id rather than printed directly, so
//! concurrent requests' log lines stay distinguishable in a shared stream.

use std::fmt;

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RequestLog {
    request_id: String,
}

impl RequestLog {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.request_id)
    }
}
