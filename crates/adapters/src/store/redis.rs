// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-backed slot store
//!
//! Claim and release run as Lua scripts, which Redis executes atomically
//! with respect to every other command. That makes the pool hash the single
//! point of serialization for all processes sharing it.

use super::{SlotStore, StoreError};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{Client, RedisError, RedisResult, Script};
use slotlock_core::{Capacity, PoolName, SlotNumber};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Scan `1..=ARGV[1]` and write ARGV[2] under the first missing field.
/// Returns the slot number, or 0 when the pool is full.
const CLAIM_SCRIPT: &str = r"
local capacity = tonumber(ARGV[1])
for slot = 1, capacity do
  if redis.call('HEXISTS', KEYS[1], slot) == 0 then
    redis.call('HSET', KEYS[1], slot, ARGV[2])
    return slot
  end
end
return 0
";

/// Unconditionally drop one field. Returns the number of fields removed.
const RELEASE_SCRIPT: &str = r"
return redis.call('HDEL', KEYS[1], ARGV[1])
";

/// Connection settings for [`RedisSlotStore`]
#[derive(Clone, Debug)]
pub struct RedisStoreConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379/0")
    pub url: String,
    /// Limit on establishing a connection
    pub connect_timeout: Duration,
    /// Limit on a single command round trip
    pub response_timeout: Duration,
}

impl RedisStoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(2),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }
}

/// Slot store backed by a Redis hash per pool.
///
/// The connection is opened lazily and shared by clones. A connection-level
/// failure drops it so the next call reconnects; there are no retries.
///
/// A response timeout does not cancel the script on the server. A claim that
/// times out may still have written its record, leaving the slot occupied by
/// a token no handle owns until it is reclaimed.
#[derive(Clone)]
pub struct RedisSlotStore {
    client: Client,
    config: RedisStoreConfig,
    connection: Arc<Mutex<Option<MultiplexedConnection>>>,
    claim_script: Script,
    release_script: Script,
}

impl RedisSlotStore {
    /// Create a store; does not connect until the first operation
    pub fn new(config: RedisStoreConfig) -> Result<Self, StoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| StoreError::InvalidConfig(format!("{}: {}", config.url, e)))?;

        Ok(Self {
            client,
            config,
            connection: Arc::new(Mutex::new(None)),
            claim_script: Script::new(CLAIM_SCRIPT),
            release_script: Script::new(RELEASE_SCRIPT),
        })
    }

    /// Create a store from a URL with default timeouts
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Self::new(RedisStoreConfig::new(url))
    }

    pub fn config(&self) -> &RedisStoreConfig {
        &self.config
    }

    async fn connection(&self) -> Result<MultiplexedConnection, StoreError> {
        let mut cached = self.connection.lock().await;
        if let Some(conn) = cached.as_ref() {
            return Ok(conn.clone());
        }

        let conn = tokio::time::timeout(
            self.config.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            StoreError::Unavailable(format!(
                "connecting timed out after {}ms",
                self.config.connect_timeout.as_millis()
            ))
        })?
        .map_err(|e| StoreError::Unavailable(format!("connect failed: {}", e)))?;

        *cached = Some(conn.clone());
        Ok(conn)
    }

    async fn reset_connection(&self) {
        *self.connection.lock().await = None;
    }

    /// Run one round trip under the response timeout, mapping failures
    async fn execute<T, F, Fut>(&self, op: &str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let conn = self.connection().await?;
        match tokio::time::timeout(self.config.response_timeout, f(conn)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                let err = classify(op, e);
                if err.is_unavailable() {
                    self.reset_connection().await;
                }
                Err(err)
            }
            Err(_) => {
                self.reset_connection().await;
                Err(StoreError::Unavailable(format!(
                    "{} timed out after {}ms",
                    op,
                    self.config.response_timeout.as_millis()
                )))
            }
        }
    }
}

fn classify(op: &str, e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
    {
        StoreError::Unavailable(format!("{} failed: {}", op, e))
    } else {
        StoreError::Protocol(format!("{} failed: {}", op, e))
    }
}

fn to_count(op: &str, value: i64) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::Protocol(format!("{} returned out-of-range integer {}", op, value)))
}

#[async_trait]
impl SlotStore for RedisSlotStore {
    async fn claim(
        &self,
        pool: &PoolName,
        capacity: Capacity,
        record: &[u8],
    ) -> Result<u32, StoreError> {
        let script = &self.claim_script;
        let slot: i64 = self
            .execute("claim", |mut conn| async move {
                let mut invocation = script.key(pool.as_str());
                invocation.arg(capacity.get()).arg(record);
                invocation.invoke_async(&mut conn).await
            })
            .await?;
        to_count("claim", slot)
    }

    async fn release(&self, pool: &PoolName, slot: SlotNumber) -> Result<u32, StoreError> {
        let script = &self.release_script;
        let removed: i64 = self
            .execute("release", |mut conn| async move {
                let mut invocation = script.key(pool.as_str());
                invocation.arg(slot.get());
                invocation.invoke_async(&mut conn).await
            })
            .await?;
        to_count("release", removed)
    }

    async fn read_slot(
        &self,
        pool: &PoolName,
        slot: SlotNumber,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        self.execute("read_slot", |mut conn| async move {
            redis::cmd("HGET")
                .arg(pool.as_str())
                .arg(slot.get())
                .query_async(&mut conn)
                .await
        })
        .await
    }

    async fn occupancy(
        &self,
        pool: &PoolName,
    ) -> Result<BTreeMap<SlotNumber, Vec<u8>>, StoreError> {
        let fields: HashMap<String, Vec<u8>> = self
            .execute("occupancy", |mut conn| async move {
                redis::cmd("HGETALL")
                    .arg(pool.as_str())
                    .query_async(&mut conn)
                    .await
            })
            .await?;

        let mut slots = BTreeMap::new();
        for (field, value) in fields {
            match field.parse::<SlotNumber>() {
                Ok(slot) => {
                    slots.insert(slot, value);
                }
                Err(e) => tracing::warn!(pool = %pool, error = %e, "skipping non-slot field"),
            }
        }
        Ok(slots)
    }
}

#[cfg(test)]
#[path = "redis_tests.rs"]
mod tests;
