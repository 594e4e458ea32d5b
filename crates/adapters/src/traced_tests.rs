// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::FakeSlotStore;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

fn pool() -> PoolName {
    PoolName::new("builds").unwrap()
}

fn cap(n: u32) -> Capacity {
    Capacity::new(n).unwrap()
}

#[tokio::test]
async fn traced_store_passes_results_through() {
    let fake = FakeSlotStore::new();
    let traced = TracedSlotStore::new(fake.clone());

    assert_eq!(traced.claim(&pool(), cap(1), b"t|").await.unwrap(), 1);
    assert_eq!(traced.claim(&pool(), cap(1), b"u|").await.unwrap(), 0);
    let slot = SlotNumber::new(1).unwrap();
    assert_eq!(
        traced.read_slot(&pool(), slot).await.unwrap(),
        Some(b"t|".to_vec())
    );
    assert_eq!(traced.occupancy(&pool()).await.unwrap().len(), 1);
    assert_eq!(traced.release(&pool(), slot).await.unwrap(), 1);
    assert_eq!(fake.calls().len(), 5);
}

#[test]
fn traced_claim_logs_span_and_outcome() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedSlotStore::new(FakeSlotStore::new());
        traced.claim(&pool(), cap(2), b"t|").await
    });

    assert_eq!(result.unwrap(), 1);
    assert!(
        logs.contains("store.claim"),
        "Should log span name. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("builds"),
        "Should log pool name. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("slot claimed"),
        "Should log completion. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("elapsed_ms"),
        "Should log timing. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_claim_logs_pool_full() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeSlotStore::new();
        fake.put_record("builds", 1, b"other|".to_vec());
        let traced = TracedSlotStore::new(fake);
        traced.claim(&pool(), cap(1), b"t|").await
    });

    assert_eq!(result.unwrap(), 0);
    assert!(
        logs.contains("pool full"),
        "Should log full pool. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_claim_logs_store_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeSlotStore::new();
        fake.set_unavailable(true);
        let traced = TracedSlotStore::new(fake);
        traced.claim(&pool(), cap(1), b"t|").await
    });

    assert!(result.is_err());
    assert!(
        logs.contains("claim failed"),
        "Should log failure. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("offline"),
        "Should log the error. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_release_logs_already_free() {
    let (logs, _) = with_tracing(|| async {
        let traced = TracedSlotStore::new(FakeSlotStore::new());
        traced.release(&pool(), SlotNumber::new(3).unwrap()).await
    });

    assert!(
        logs.contains("store.release"),
        "Should log release span. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("slot already free"),
        "Should log no-op release. Logs:\n{}",
        logs
    );
}
