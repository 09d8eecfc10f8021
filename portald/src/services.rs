use once_cell::sync::{Lazy, OnceCell};
use tracing::{info, warn};

use crate::analytics::{SearchAnalytics, TracingAnalytics};
use crate::config::PortalConfig;
use crate::consumer::catalog::CatalogConsumer;
use crate::consumer::ApiConsumer;

#[derive(Debug)]
pub struct Services {
    config: PortalConfig,
}

impl Services {
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn consumer(&self) -> &'static dyn ApiConsumer {
        &**CONSUMER
    }

    pub fn analytics(&self) -> &'static dyn SearchAnalytics {
        &**ANALYTICS
    }
}

/// Global search facade shared across the server.
static CONSUMER: Lazy<Box<dyn ApiConsumer>> = Lazy::new(|| {
    // seed from PORTAL_CATALOG when set, else serve an empty catalog
    if let Some(path) = &services().config.catalog_path {
        match CatalogConsumer::load(path) {
            Ok(consumer) => return Box::new(consumer),
            Err(e) => {
                warn!(
                    "[services] failed to load catalog at {}: {:?} ; falling back to an empty catalog",
                    path.display(),
                    e
                );
            }
        }
    }
    info!("[services] using empty in-memory catalog");
    Box::new(CatalogConsumer::new())
});

static ANALYTICS: Lazy<Box<dyn SearchAnalytics>> = Lazy::new(|| Box::new(TracingAnalytics));

static SERVICES: OnceCell<Services> = OnceCell::new();

/// Install the configuration. Only the first call has an effect.
pub fn init(config: PortalConfig) {
    if SERVICES.set(Services { config }).is_err() {
        warn!("[services] already initialized; ignoring new configuration");
    }
}

/// Registry, initialized from the environment on first use when `init` was
/// never called.
pub fn services() -> &'static Services {
    SERVICES.get_or_init(|| Services { config: PortalConfig::from_env() })
}

pub fn config() -> &'static PortalConfig {
    services().config()
}

pub fn consumer() -> &'static dyn ApiConsumer {
    &**CONSUMER
}

pub fn analytics() -> &'static dyn SearchAnalytics {
    &**ANALYTICS
}
