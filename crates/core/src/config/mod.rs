// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration: per-lock settings and the TOML config file

mod file;
mod lock;

pub use file::{FileConfig, PoolSection, StoreSection, DEFAULT_STORE_URL};
pub use lock::{InfoPayload, LockConfig, LockConfigBuilder};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from building or loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("pool name is required")]
    MissingPoolName,
    #[error("pool name must not be empty")]
    EmptyPoolName,
    #[error("pool name is {len} bytes, the limit is {max}")]
    PoolNameTooLong { len: usize, max: usize },
    #[error("capacity is required")]
    MissingCapacity,
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("capacity {requested} exceeds the limit of {max}")]
    CapacityTooLarge { requested: u32, max: u32 },
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
