use crate::chart::Charts;
use crate::client::TripClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: TripClient,
    pub charts: Arc<Charts>,
}

impl AppState {
    pub fn new(client: TripClient, charts: Charts) -> Self {
        Self {
            client,
            charts: Arc::new(charts),
        }
    }
}
