// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hard limits on pool shape.
//!
//! The claim body scans slot numbers one by one while the store holds its
//! execution lock, so capacity is bounded to keep that scan short.

/// Largest capacity a pool may be configured with
pub const MAX_CAPACITY: u32 = 65_536;

/// Longest pool name (in bytes) accepted as a store key.
///
/// Any other UTF-8 is allowed, since the name is used as the key verbatim.
pub const MAX_POOL_NAME_LEN: usize = 512;
