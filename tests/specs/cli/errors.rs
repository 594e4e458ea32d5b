//! Error reporting specs

use crate::prelude::*;

#[test]
fn unreachable_store_exits_69_with_suggestions() {
    Workspace::empty()
        .slotlock()
        .args(["--store-url", DEAD_STORE, "status", "p"])
        .exits_with(69)
        .stderr_has("Cannot reach store")
        .stderr_has("suggestions:");
}

#[test]
fn run_against_unreachable_store_does_not_start_command() {
    let ws = Workspace::empty();
    ws.slotlock()
        .args(["--store-url", DEAD_STORE, "run", "p", "--capacity", "1", "--"])
        .args(["touch", "ran"])
        .exits_with(69);
    assert!(!ws.path().join("ran").exists());
}

#[test]
fn reclaim_against_unreachable_store_exits_69() {
    Workspace::empty()
        .slotlock()
        .args(["--store-url", DEAD_STORE, "reclaim", "p", "1", "--force"])
        .exits_with(69);
}

#[test]
fn invalid_store_url_exits_2() {
    Workspace::empty()
        .slotlock()
        .args(["--store-url", "not a url", "status", "p"])
        .exits_with(2)
        .stderr_has("Invalid store URL");
}

#[test]
fn empty_pool_name_exits_2() {
    Workspace::empty()
        .slotlock()
        .args(["--store-url", DEAD_STORE, "status", ""])
        .exits_with(2);
}

#[test]
fn zero_heartbeat_is_a_usage_error() {
    let ws = Workspace::empty();
    ws.slotlock()
        .args(["--store-url", DEAD_STORE, "run", "p", "--capacity", "1"])
        .args(["--heartbeat", "0s", "--", "touch", "ran"])
        .exits_with(2)
        .stderr_has("greater than zero");
    assert!(!ws.path().join("ran").exists());
}
