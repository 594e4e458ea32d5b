// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Occupant record codec
//!
//! The value stored under an occupied slot is `<token>|<info>`: the holder's
//! unique token, one separator byte, then the caller's opaque info string.
//! The layout is shared with every other process using the same pool, so it
//! must not change.

use crate::token;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Byte between the token and the info string
pub const RECORD_SEPARATOR: u8 = b'|';

/// Errors building or decoding an occupant record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("token must not be empty")]
    EmptyToken,
    #[error("token {0:?} contains the record separator")]
    TokenContainsSeparator(String),
    #[error("record has no separator")]
    MissingSeparator,
    #[error("record token is not valid UTF-8")]
    InvalidToken,
    #[error("record info is not valid UTF-8")]
    InvalidInfo,
}

/// Proof of ownership for one slot: a unique token plus opaque info
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupantRecord {
    token: String,
    info: String,
}

impl OccupantRecord {
    pub fn new(token: impl Into<String>, info: impl Into<String>) -> Result<Self, RecordError> {
        let token = token.into();
        if token.is_empty() {
            return Err(RecordError::EmptyToken);
        }
        if token.as_bytes().contains(&RECORD_SEPARATOR) {
            return Err(RecordError::TokenContainsSeparator(token));
        }
        Ok(Self {
            token,
            info: info.into(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    /// Encoded form, exactly as written to the store
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.token.len() + 1 + self.info.len());
        bytes.extend_from_slice(self.token.as_bytes());
        bytes.push(RECORD_SEPARATOR);
        bytes.extend_from_slice(self.info.as_bytes());
        bytes
    }

    /// Decode a stored value, splitting at the first separator.
    ///
    /// Tokens never contain the separator, so everything after it belongs to
    /// the info string, separators included.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        let pos = bytes
            .iter()
            .position(|b| *b == RECORD_SEPARATOR)
            .ok_or(RecordError::MissingSeparator)?;
        let (token, rest) = bytes.split_at(pos);
        if token.is_empty() {
            return Err(RecordError::EmptyToken);
        }
        let token = std::str::from_utf8(token).map_err(|_| RecordError::InvalidToken)?;
        let info = std::str::from_utf8(&rest[1..]).map_err(|_| RecordError::InvalidInfo)?;
        Ok(Self {
            token: token.to_string(),
            info: info.to_string(),
        })
    }

    /// Byte-for-byte comparison against a stored value
    pub fn matches(&self, stored: &[u8]) -> bool {
        let token = self.token.as_bytes();
        let info = self.info.as_bytes();
        stored.len() == token.len() + 1 + info.len()
            && stored[..token.len()] == *token
            && stored[token.len()] == RECORD_SEPARATOR
            && stored[token.len() + 1..] == *info
    }

    /// Creation time encoded in the token, when the token is time-ordered
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        token::issued_at(&self.token)
    }
}

impl std::fmt::Display for OccupantRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.token, RECORD_SEPARATOR as char, self.info)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
