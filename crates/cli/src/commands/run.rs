// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `slotlock run <pool> -- <command>` - Run a command while holding a slot

use crate::error::{CliError, EXIT_CONFIG};
use anyhow::Result;
use clap::Args;
use slotlock::{LockHandle, Ownership, SlotLock};
use slotlock_adapters::SlotStore;
use slotlock_core::{ConfigError, FileConfig, InfoPayload, LockConfig, LockConfigBuilder};
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::MissedTickBehavior;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Pool to take a slot from
    pub pool: String,

    /// Maximum concurrent holders [default: from the config file]
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Info text stored next to the token
    #[arg(long, conflicts_with = "timestamp")]
    pub info: Option<String>,

    /// Store the acquire time as info
    #[arg(long)]
    pub timestamp: bool,

    /// Verify ownership at this interval while the command runs (e.g. 30s)
    #[arg(long, value_parser = parse_heartbeat)]
    pub heartbeat: Option<Duration>,

    /// Kill the command when ownership cannot be confirmed
    #[arg(long, requires = "heartbeat")]
    pub kill_on_loss: bool,

    /// Command to run while holding the slot
    #[arg(last = true, required = true, num_args = 1..)]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Settings from flags, layered over the config file's pool section
    fn lock_config(&self, file: &FileConfig) -> Result<LockConfig, ConfigError> {
        let mut flags = LockConfigBuilder::default();
        if let Some(capacity) = self.capacity {
            flags = flags.capacity(capacity);
        }
        if self.timestamp {
            flags = flags.info(InfoPayload::Timestamp);
        } else if let Some(text) = &self.info {
            flags = flags.info(InfoPayload::from(text.as_str()));
        }
        file.lock_builder(&self.pool).merge(flags).build()
    }
}

/// A zero interval would make the verify ticker spin, so it is refused
fn parse_heartbeat(value: &str) -> Result<Duration, String> {
    let every = humantime::parse_duration(value).map_err(|e| e.to_string())?;
    if every.is_zero() {
        return Err("heartbeat interval must be greater than zero".to_string());
    }
    Ok(every)
}

struct Supervised {
    status: ExitStatus,
    lost: bool,
}

/// Wait for the child, verifying ownership every `heartbeat`
async fn supervise<S: SlotStore>(
    handle: &LockHandle<S>,
    child: &mut Child,
    heartbeat: Option<Duration>,
    kill_on_loss: bool,
) -> std::io::Result<Supervised> {
    let Some(every) = heartbeat else {
        return Ok(Supervised {
            status: child.wait().await?,
            lost: false,
        });
    };

    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let mut lost = false;
    let mut killed = false;
    loop {
        tokio::select! {
            status = child.wait() => return Ok(Supervised { status: status?, lost }),
            _ = ticker.tick() => {}
        }

        match handle.verify().await {
            Ownership::Held => tracing::debug!(pool = %handle.pool(), "ownership confirmed"),
            ownership => {
                lost |= matches!(ownership, Ownership::Lost);
                tracing::warn!(
                    pool = %handle.pool(),
                    slot = ?handle.slot().map(|s| s.get()),
                    ?ownership,
                    "cannot confirm slot ownership"
                );
                if kill_on_loss && !killed {
                    tracing::warn!("killing command");
                    child.start_kill()?;
                    killed = true;
                }
            }
        }
    }
}

/// Exit code to report for the child's status
fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).unwrap_or(1);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(1);
        }
    }
    1
}

async fn release_quietly<S: SlotStore>(handle: &mut LockHandle<S>) {
    if let Err(e) = handle.release().await {
        tracing::warn!(pool = %handle.pool(), error = %e, "release failed");
    }
}

pub async fn handle<S: SlotStore>(args: RunArgs, store: S, file: &FileConfig) -> Result<u8> {
    if args.heartbeat.is_some_and(|every| every.is_zero()) {
        return Err(CliError::new("Heartbeat interval must be greater than zero")
            .with_exit_code(EXIT_CONFIG)
            .with_suggestion("Pass a positive duration, e.g. --heartbeat 30s")
            .into());
    }
    let config = args.lock_config(file)?;
    let capacity = config.capacity.get();
    let lock = SlotLock::new(store, config);

    let Some(mut handle) = lock.try_acquire().await? else {
        return Err(CliError::pool_full(&args.pool, capacity).into());
    };
    let slot = handle.slot().map(|s| s.to_string()).unwrap_or_default();
    tracing::info!(pool = %handle.pool(), slot = %slot, "acquired slot");

    let Some((program, rest)) = args.command.split_first() else {
        release_quietly(&mut handle).await;
        return Err(anyhow::anyhow!("no command given"));
    };

    let spawned = Command::new(program)
        .args(rest)
        .env("SLOTLOCK_POOL", handle.pool().as_str())
        .env("SLOTLOCK_SLOT", &slot)
        .spawn();
    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            release_quietly(&mut handle).await;
            return Err(CliError::spawn_failed(program, e).into());
        }
    };

    let outcome = match supervise(&handle, &mut child, args.heartbeat, args.kill_on_loss).await {
        Ok(outcome) => outcome,
        Err(e) => {
            release_quietly(&mut handle).await;
            return Err(e.into());
        }
    };

    if outcome.lost {
        tracing::warn!(pool = %handle.pool(), slot = %slot, "slot taken over, not releasing it");
        handle.abandon();
    } else {
        handle.release().await?;
    }

    Ok(exit_code(outcome.status))
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
