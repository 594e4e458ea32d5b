// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Every error carries:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)
//! - The process exit code it maps to

use slotlock::LockError;
use slotlock_adapters::StoreError;
use slotlock_core::limits::MAX_CAPACITY;
use slotlock_core::ConfigError;
use std::fmt;
use std::time::Duration;

pub const EXIT_FAILURE: u8 = 1;
/// Bad settings, including clap usage errors
pub const EXIT_CONFIG: u8 = 2;
/// `EX_UNAVAILABLE`: the store could not be reached
pub const EXIT_UNAVAILABLE: u8 = 69;
/// `EX_TEMPFAIL`: the pool is full, try again later
pub const EXIT_TEMPFAIL: u8 = 75;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Exit status of the process
    pub exit_code: u8,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            exit_code: EXIT_FAILURE,
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_exit_code(mut self, code: u8) -> Self {
        self.exit_code = code;
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures the commands report.
impl CliError {
    /// Error for invalid or missing settings.
    pub fn config(err: ConfigError) -> Self {
        let mut cli = CliError::new(format!("Invalid configuration: {}", err))
            .with_exit_code(EXIT_CONFIG);
        cli = match &err {
            ConfigError::MissingCapacity => cli
                .with_suggestion("Pass --capacity N")
                .with_suggestion("Or set `capacity` under [pools.<name>] in the config file"),
            ConfigError::ZeroCapacity | ConfigError::CapacityTooLarge { .. } => cli
                .with_context(format!("Capacity must be between 1 and {}", MAX_CAPACITY)),
            ConfigError::Read { .. } | ConfigError::Parse { .. } => cli
                .with_suggestion("Check the file given by --config or SLOTLOCK_CONFIG"),
            _ => cli,
        };
        cli.with_source(err)
    }

    /// Error for a failed store operation.
    pub fn store(err: StoreError, store_url: &str) -> Self {
        let cli = match &err {
            StoreError::Unavailable(reason) => {
                CliError::new(format!("Cannot reach store at {}", store_url))
                    .with_context(reason.clone())
                    .with_suggestion(format!("Check that Redis is up: redis-cli -u {} ping", store_url))
                    .with_suggestion("Point at another store with --store-url or SLOTLOCK_STORE_URL")
                    .with_exit_code(EXIT_UNAVAILABLE)
            }
            StoreError::Protocol(reason) => {
                CliError::new(format!("Unexpected reply from store at {}", store_url))
                    .with_context(reason.clone())
                    .with_context("The key may have been written by something other than slotlock")
            }
            StoreError::InvalidConfig(reason) => CliError::new("Invalid store URL")
                .with_context(reason.clone())
                .with_suggestion("Use a URL like redis://127.0.0.1:6379/0")
                .with_exit_code(EXIT_CONFIG),
        };
        cli.with_source(err)
    }

    /// Error for a failed lock operation.
    pub fn lock(err: LockError, store_url: &str) -> Self {
        match err {
            LockError::Config(e) => Self::config(e),
            LockError::Store(e) => Self::store(e, store_url),
            LockError::Record(e) => CliError::new(format!("Cannot build occupant record: {}", e))
                .with_source(e),
        }
    }

    /// Every slot of the pool is held.
    pub fn pool_full(pool: &str, capacity: u32) -> Self {
        CliError::new(format!("Pool '{}' is full (capacity {})", pool, capacity))
            .with_context(format!("All {} slots are held", capacity))
            .with_suggestion("Retry later")
            .with_suggestion(format!("Inspect holders: slotlock status {}", pool))
            .with_suggestion(format!(
                "Reclaim a stale slot: slotlock reclaim {} <slot> --older-than 1h",
                pool
            ))
            .with_exit_code(EXIT_TEMPFAIL)
    }

    /// The wrapped command could not be started.
    pub fn spawn_failed(program: &str, err: std::io::Error) -> Self {
        CliError::new(format!("Failed to start '{}'", program))
            .with_context(err.to_string())
            .with_suggestion("Check that the command exists and is executable")
            .with_source(err)
    }

    /// The holder's age cannot be read from its token.
    pub fn holder_age_unknown(pool: &str, slot: u32) -> Self {
        CliError::new(format!(
            "Cannot tell how long slot {} in pool '{}' has been held",
            slot, pool
        ))
        .with_context("The holder's token does not carry a creation time")
        .with_suggestion(format!(
            "Reclaim anyway: slotlock reclaim {} {} --force",
            pool, slot
        ))
    }

    /// The holder is younger than the reclaim threshold.
    pub fn holder_too_young(pool: &str, slot: u32, age: Duration, threshold: Duration) -> Self {
        CliError::new(format!(
            "Slot {} in pool '{}' is not stale yet",
            slot, pool
        ))
        .with_context(format!(
            "Held for {}, threshold is {}",
            humantime::format_duration(age),
            humantime::format_duration(threshold)
        ))
        .with_suggestion(format!(
            "Reclaim anyway: slotlock reclaim {} {} --force",
            pool, slot
        ))
    }

    /// Map any command error onto a presentable one.
    pub fn from_anyhow(err: anyhow::Error, store_url: &str) -> Self {
        let err = match err.downcast::<CliError>() {
            Ok(e) => return e,
            Err(err) => err,
        };
        let err = match err.downcast::<LockError>() {
            Ok(e) => return Self::lock(e, store_url),
            Err(err) => err,
        };
        let err = match err.downcast::<StoreError>() {
            Ok(e) => return Self::store(e, store_url),
            Err(err) => err,
        };
        let err = match err.downcast::<ConfigError>() {
            Ok(e) => return Self::config(e),
            Err(err) => err,
        };
        CliError::new(format!("{:#}", err))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
