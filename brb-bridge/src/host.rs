//! RelayHost — the process-wide relay, reached only through [`global`].
//!
//! The native framework can only call fixed entry points, so there has to be
//! one statically reachable relay. The host owns it and its epochs: shutting
//! down retires the current instance and installs a fresh `Uninitialized` one.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::handler::UrlHandler;
use crate::relay::{DrainReport, Relay, RelayStats};

static HOST: Lazy<RelayHost> = Lazy::new(|| RelayHost::new(RelayConfig::load()));

/// The process-wide host. Config is read from disk on first access.
pub fn global() -> &'static RelayHost {
    &HOST
}

pub struct RelayHost {
    config: RelayConfig,
    current: Mutex<Arc<Relay>>,
}

impl RelayHost {
    pub fn new(config: RelayConfig) -> Self {
        let config = config.normalized();
        Self {
            current: Mutex::new(Arc::new(Relay::new(config.clone(), 1))),
            config,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// The relay for the current epoch. Callers must not hold onto it across
    /// a shutdown; a retired relay drops everything it is given.
    pub fn relay(&self) -> Arc<Relay> {
        self.current.lock().clone()
    }

    pub fn register_handler(&self, handler: Arc<dyn UrlHandler>) -> Result<DrainReport, RelayError> {
        self.relay().register_handler(handler)
    }

    pub fn stats(&self) -> RelayStats {
        self.relay().stats()
    }

    /// End the current epoch and start the next one. Safe to call repeatedly.
    pub fn shutdown(&self) {
        let retired = {
            let mut current = self.current.lock();
            let next = Arc::new(Relay::new(self.config.clone(), current.epoch() + 1));
            std::mem::replace(&mut *current, next)
        };
        retired.shutdown();
        tracing::debug!("relay epoch {} retired", retired.epoch());
    }
}
