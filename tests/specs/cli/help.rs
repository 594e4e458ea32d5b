//! Help and usage specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Workspace::empty()
        .slotlock()
        .arg("--help")
        .passes()
        .stdout_has("status")
        .stdout_has("run")
        .stdout_has("reclaim");
}

#[test]
fn version_is_printed() {
    Workspace::empty()
        .slotlock()
        .arg("--version")
        .passes()
        .stdout_has("slotlock");
}

#[test]
fn run_help_documents_heartbeat() {
    Workspace::empty()
        .slotlock()
        .args(["run", "--help"])
        .passes()
        .stdout_has("--heartbeat")
        .stdout_has("--kill-on-loss");
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    Workspace::empty().slotlock().exits_with(2);
}

#[test]
fn run_without_command_is_a_usage_error() {
    Workspace::empty()
        .slotlock()
        .args(["run", "p", "--capacity", "1"])
        .exits_with(2);
}

#[test]
fn kill_on_loss_requires_heartbeat() {
    Workspace::empty()
        .slotlock()
        .args(["run", "p", "--capacity", "1", "--kill-on-loss", "--", "true"])
        .exits_with(2);
}

#[test]
fn slot_zero_is_rejected() {
    Workspace::empty()
        .slotlock()
        .args(["reclaim", "p", "0"])
        .exits_with(2);
}
