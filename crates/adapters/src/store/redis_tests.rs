// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn config_defaults_and_overrides() {
    let config = RedisStoreConfig::new("redis://127.0.0.1:6379")
        .with_connect_timeout(Duration::from_millis(100))
        .with_response_timeout(Duration::from_millis(50));

    assert_eq!(config.url, "redis://127.0.0.1:6379");
    assert_eq!(config.connect_timeout, Duration::from_millis(100));
    assert_eq!(config.response_timeout, Duration::from_millis(50));

    let defaults = RedisStoreConfig::new("redis://x");
    assert_eq!(defaults.connect_timeout, Duration::from_secs(5));
    assert_eq!(defaults.response_timeout, Duration::from_secs(2));
}

#[test]
fn invalid_url_is_a_config_error() {
    let result = RedisSlotStore::open("not a url");
    assert!(matches!(result, Err(StoreError::InvalidConfig(_))));
}

#[test]
fn construction_does_not_connect() {
    // Nothing listens on port 1; building the store must still succeed
    assert!(RedisSlotStore::open("redis://127.0.0.1:1").is_ok());
}

#[tokio::test]
async fn unreachable_server_is_unavailable() {
    let store = RedisSlotStore::new(
        RedisStoreConfig::new("redis://127.0.0.1:1").with_connect_timeout(Duration::from_secs(1)),
    )
    .unwrap();
    let pool = PoolName::new("p").unwrap();

    let claim = store
        .claim(&pool, Capacity::new(1).unwrap(), b"t|")
        .await;
    assert!(matches!(claim, Err(StoreError::Unavailable(_))));

    let read = store.read_slot(&pool, SlotNumber::new(1).unwrap()).await;
    assert!(matches!(read, Err(StoreError::Unavailable(_))));
}

#[test]
fn to_count_rejects_negative_replies() {
    assert_eq!(to_count("claim", 3).unwrap(), 3);
    assert!(matches!(
        to_count("claim", -1),
        Err(StoreError::Protocol(_))
    ));
}

#[test]
fn claim_script_scans_ascending_and_returns_zero_when_full() {
    assert!(CLAIM_SCRIPT.contains("for slot = 1, capacity do"));
    assert!(CLAIM_SCRIPT.contains("HEXISTS"));
    assert!(CLAIM_SCRIPT.trim_end().ends_with("return 0"));
    assert!(RELEASE_SCRIPT.contains("HDEL"));
}
