// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn empty_file_uses_defaults() {
    let config = FileConfig::from_toml_str("").unwrap();
    assert_eq!(config.store_url(), DEFAULT_STORE_URL);
    assert_eq!(config.store.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.store.response_timeout, Duration::from_secs(2));
    assert!(config.pools.is_empty());
}

#[test]
fn parses_store_and_pools() {
    let config = FileConfig::from_toml_str(
        r#"
        [store]
        url = "redis://cache:6380/2"
        connect_timeout = "1s"
        response_timeout = "250ms"

        [pools.builds]
        capacity = 4
        info = "timestamp"

        [pools.deploys]
        capacity = 1
        "#,
    )
    .unwrap();

    assert_eq!(config.store_url(), "redis://cache:6380/2");
    assert_eq!(config.store.connect_timeout, Duration::from_secs(1));
    assert_eq!(config.store.response_timeout, Duration::from_millis(250));
    assert_eq!(config.pools["builds"].capacity, Some(4));
    assert_eq!(config.pools["builds"].info, Some(InfoPayload::Timestamp));
    assert_eq!(config.pools["deploys"].info, None);
}

#[test]
fn info_keywords_are_read_from_the_file() {
    let config = FileConfig::from_toml_str(
        "[pools.a]\ninfo = \"empty\"\n[pools.b]\ninfo = \"\"\n[pools.c]\ninfo = \"nightly\"\n",
    )
    .unwrap();
    assert_eq!(config.pools["a"].info, Some(InfoPayload::Empty));
    assert_eq!(config.pools["b"].info, Some(InfoPayload::Empty));
    assert_eq!(
        config.pools["c"].info,
        Some(InfoPayload::Text("nightly".to_string()))
    );
}

#[test]
fn rejects_unknown_keys() {
    let result = FileConfig::from_toml_str("[store]\nhost = \"x\"\n");
    assert!(result.is_err());
}

#[test]
fn lock_builder_uses_pool_section() {
    let config = FileConfig::from_toml_str("[pools.builds]\ncapacity = 4\ninfo = \"ci\"\n").unwrap();
    let lock = config.lock_builder("builds").build().unwrap();
    assert_eq!(lock.pool.as_str(), "builds");
    assert_eq!(lock.capacity.get(), 4);
    assert_eq!(lock.info, InfoPayload::Text("ci".to_string()));
}

#[test]
fn lock_builder_for_unknown_pool_needs_capacity() {
    let config = FileConfig::default();
    assert!(matches!(
        config.lock_builder("other").build(),
        Err(ConfigError::MissingCapacity)
    ));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[store]\nurl = \"redis://example:6379\"").unwrap();

    let config = FileConfig::load(file.path()).unwrap();
    assert_eq!(config.store_url(), "redis://example:6379");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FileConfig::load(&dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn load_reports_parse_errors_with_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[pools.builds]\ncapacity = \"four\"").unwrap();

    let err = FileConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}
