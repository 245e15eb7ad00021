use crate::{
    clients::ClientShares,
    health::{HealthCheckable, HealthStatus},
};

pub struct ServeHealth {
    client_shares_error: Option<String>,
}

impl ServeHealth {
    pub fn new(client_shares: &ClientShares) -> Self {
        let client_shares_error = client_shares.validate().err();
        Self {
            client_shares_error: client_shares_error.map(|error| error.to_string()),
        }
    }
}

impl HealthCheckable for ServeHealth {
    // Every correlated slashing estimate depends on the client share table, without a sane one
    // the server shouldn't take traffic.
    fn health_status(&self) -> HealthStatus {
        match &self.client_shares_error {
            None => HealthStatus::Healthy,
            Some(error) => HealthStatus::Unhealthy(Some(error.clone())),
        }
    }
}
