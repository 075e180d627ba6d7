use crate::clock::{Clock, SystemClock};
use crate::config::{ProxyConfig, WidgetConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ProxyConfig>,
    pub widget: Arc<WidgetConfig>,
    pub http: reqwest::Client,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(proxy: ProxyConfig, widget: WidgetConfig, http: reqwest::Client) -> Self {
        Self {
            proxy: Arc::new(proxy),
            widget: Arc::new(widget),
            http,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
