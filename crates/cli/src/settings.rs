// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved settings for one invocation
//!
//! The store URL comes from `--store-url` / `SLOTLOCK_STORE_URL`, then the
//! config file, then the built-in default.

use slotlock_adapters::{RedisSlotStore, RedisStoreConfig, StoreError, TracedSlotStore};
use slotlock_core::{ConfigError, FileConfig};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Settings {
    pub file: FileConfig,
    store_url: String,
}

impl Settings {
    pub fn load(config: Option<&Path>, store_url: Option<String>) -> Result<Self, ConfigError> {
        let file = match config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let store_url = store_url.unwrap_or_else(|| file.store_url().to_string());
        Ok(Self { file, store_url })
    }

    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    pub fn store_config(&self) -> RedisStoreConfig {
        RedisStoreConfig::new(self.store_url.clone())
            .with_connect_timeout(self.file.store.connect_timeout)
            .with_response_timeout(self.file.store.response_timeout)
    }

    /// Build the store client; connecting happens on first use
    pub fn open_store(&self) -> Result<TracedSlotStore<RedisSlotStore>, StoreError> {
        Ok(TracedSlotStore::new(RedisSlotStore::new(
            self.store_config(),
        )?))
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
