//! Thread-safe configuration caching with arc-swap for lock-free reads.

use crate::loader::ConfigError;
use crate::schema::Config;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Thread-safe configuration cache using arc-swap for lock-free reads.
#[derive(Debug)]
pub struct ConfigCache {
    config: ArcSwap<Config>,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Replaces the configuration after validating it.
    ///
    /// The previous configuration stays in place when validation fails.
    pub fn update(&self, config: Config) -> Result<(), ConfigError> {
        config.validate()?;
        self.config.store(Arc::new(config));
        info!("Configuration replaced");
        Ok(())
    }

    /// Applies `change` to a copy of the current configuration and stores
    /// the result if it validates.
    pub fn modify<F>(&self, change: F) -> Result<Arc<Config>, ConfigError>
    where
        F: FnOnce(&mut Config),
    {
        let mut next = Config::clone(&self.get());
        change(&mut next);
        self.update(next)?;
        Ok(self.get())
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
