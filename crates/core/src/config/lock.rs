// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings for acquiring a slot in one pool

use super::ConfigError;
use crate::clock::Clock;
use crate::slot::{Capacity, PoolName};
use chrono::SecondsFormat;

/// Opaque text stored next to the token in an occupant record
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InfoPayload {
    /// No info, the record is just `<token>|`
    #[default]
    Empty,
    /// Client wall-clock time at acquire, RFC 3339 UTC
    Timestamp,
    /// Caller-supplied text
    Text(String),
}

impl InfoPayload {
    /// Render the payload as it will be written into the record
    pub fn render(&self, clock: &impl Clock) -> String {
        match self {
            InfoPayload::Empty => String::new(),
            InfoPayload::Timestamp => clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
            InfoPayload::Text(text) => text.clone(),
        }
    }

    /// Read a config-file setting, where `"empty"` and `"timestamp"` are keywords
    pub fn from_setting(setting: &str) -> Self {
        match setting {
            "empty" => InfoPayload::Empty,
            "timestamp" => InfoPayload::Timestamp,
            _ => InfoPayload::from(setting),
        }
    }
}

/// Caller text is taken literally; only `""` means [`InfoPayload::Empty`]
impl From<String> for InfoPayload {
    fn from(s: String) -> Self {
        if s.is_empty() {
            InfoPayload::Empty
        } else {
            InfoPayload::Text(s)
        }
    }
}

impl From<&str> for InfoPayload {
    fn from(s: &str) -> Self {
        InfoPayload::from(s.to_string())
    }
}

/// Validated settings for one lock: which pool, how many holders, what info
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockConfig {
    pub pool: PoolName,
    pub capacity: Capacity,
    pub info: InfoPayload,
}

impl LockConfig {
    pub fn new(pool: impl Into<String>, capacity: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            pool: PoolName::new(pool)?,
            capacity: Capacity::new(capacity)?,
            info: InfoPayload::Empty,
        })
    }

    pub fn builder() -> LockConfigBuilder {
        LockConfigBuilder::default()
    }

    pub fn with_info(mut self, info: impl Into<InfoPayload>) -> Self {
        self.info = info.into();
        self
    }
}

/// Builder for [`LockConfig`] when settings arrive piecemeal (flags, files)
#[derive(Clone, Debug, Default)]
pub struct LockConfigBuilder {
    pool: Option<String>,
    capacity: Option<u32>,
    info: Option<InfoPayload>,
}

impl LockConfigBuilder {
    pub fn pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = Some(pool.into());
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn info(mut self, info: impl Into<InfoPayload>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Overlay the set fields of `other` onto this builder
    pub fn merge(mut self, other: LockConfigBuilder) -> Self {
        if other.pool.is_some() {
            self.pool = other.pool;
        }
        if other.capacity.is_some() {
            self.capacity = other.capacity;
        }
        if other.info.is_some() {
            self.info = other.info;
        }
        self
    }

    pub fn build(self) -> Result<LockConfig, ConfigError> {
        let pool = self.pool.ok_or(ConfigError::MissingPoolName)?;
        let capacity = self.capacity.ok_or(ConfigError::MissingCapacity)?;
        Ok(LockConfig::new(pool, capacity)?.with_info(self.info.unwrap_or_default()))
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
