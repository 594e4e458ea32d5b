// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML config file
//!
//! ```toml
//! [store]
//! url = "redis://127.0.0.1:6379"
//! connect_timeout = "5s"
//! response_timeout = "2s"
//!
//! [pools.builds]
//! capacity = 4
//! info = "timestamp"
//! ```

use super::{ConfigError, InfoPayload, LockConfigBuilder};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Store URL used when neither flags, environment, nor file name one
pub const DEFAULT_STORE_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub store: StoreSection,
    pub pools: BTreeMap<String, PoolSection>,
}

/// Connection settings for the shared store
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub url: Option<String>,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub response_timeout: Duration,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            url: None,
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(2),
        }
    }
}

/// Defaults for one named pool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSection {
    pub capacity: Option<u32>,
    #[serde(deserialize_with = "deserialize_info")]
    pub info: Option<InfoPayload>,
}

fn deserialize_info<'de, D>(deserializer: D) -> Result<Option<InfoPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let setting = Option::<String>::deserialize(deserializer)?;
    Ok(setting.as_deref().map(InfoPayload::from_setting))
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Builder seeded with the file's defaults for `pool`
    pub fn lock_builder(&self, pool: &str) -> LockConfigBuilder {
        let mut builder = LockConfigBuilder::default().pool(pool);
        if let Some(section) = self.pools.get(pool) {
            if let Some(capacity) = section.capacity {
                builder = builder.capacity(capacity);
            }
            if let Some(info) = &section.info {
                builder = builder.info(info.clone());
            }
        }
        builder
    }

    /// Store URL from the file, falling back to [`DEFAULT_STORE_URL`]
    pub fn store_url(&self) -> &str {
        self.store.url.as_deref().unwrap_or(DEFAULT_STORE_URL)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
