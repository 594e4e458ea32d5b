//! Configuration specs

use crate::prelude::*;

#[test]
fn missing_config_file_exits_2() {
    let ws = Workspace::empty();
    ws.slotlock()
        .args(["--config", "nope.toml", "status", "p"])
        .exits_with(2)
        .stderr_has("Invalid configuration");
}

#[test]
fn unknown_config_key_exits_2() {
    let ws = Workspace::with_config("[store]\nadress = \"redis://x\"\n");
    ws.slotlock()
        .arg("--config")
        .arg(ws.config_path())
        .args(["status", "p"])
        .exits_with(2);
}

#[test]
fn config_file_from_environment() {
    let ws = Workspace::with_config("[store\n");
    ws.slotlock()
        .env("SLOTLOCK_CONFIG", ws.config_path())
        .args(["status", "p"])
        .exits_with(2)
        .stderr_has("slotlock.toml");
}

#[test]
fn zero_capacity_exits_2() {
    Workspace::empty()
        .slotlock()
        .args(["--store-url", DEAD_STORE, "run", "p", "--capacity", "0", "--", "true"])
        .exits_with(2)
        .stderr_has("capacity");
}

#[test]
fn missing_capacity_suggests_flag() {
    Workspace::empty()
        .slotlock()
        .args(["--store-url", DEAD_STORE, "run", "p", "--", "true"])
        .exits_with(2)
        .stderr_has("--capacity");
}

#[test]
fn capacity_from_config_file_reaches_the_store() {
    let ws = Workspace::with_config(&format!(
        "[store]\nurl = \"{}\"\nconnect_timeout = \"1s\"\n\n[pools.builds]\ncapacity = 2\n",
        DEAD_STORE
    ));
    // Settings are valid, so the failure is the unreachable store
    ws.slotlock()
        .arg("--config")
        .arg(ws.config_path())
        .args(["run", "builds", "--", "true"])
        .exits_with(69)
        .stderr_has(DEAD_STORE);
}

#[test]
fn store_url_from_environment() {
    Workspace::empty()
        .slotlock()
        .env("SLOTLOCK_STORE_URL", DEAD_STORE)
        .args(["status", "p"])
        .exits_with(69)
        .stderr_has(DEAD_STORE);
}
