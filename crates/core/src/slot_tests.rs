// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::BTreeSet;
use yare::parameterized;

fn slot(n: u32) -> SlotNumber {
    SlotNumber::new(n).unwrap()
}

#[test]
fn pool_name_accepts_ordinary_names() {
    let name = PoolName::new("builds:linux").unwrap();
    assert_eq!(name.as_str(), "builds:linux");
    assert_eq!(name.to_string(), "builds:linux");
}

#[test]
fn pool_name_rejects_empty() {
    assert!(matches!(PoolName::new(""), Err(ConfigError::EmptyPoolName)));
}

#[test]
fn pool_name_is_kept_byte_for_byte() {
    let name = PoolName::new("jobs\tweekly\n").unwrap();
    assert_eq!(name.as_str().as_bytes(), b"jobs\tweekly\n");
}

#[test]
fn pool_name_rejects_overlong() {
    let long = "x".repeat(MAX_POOL_NAME_LEN + 1);
    assert!(matches!(
        PoolName::new(long),
        Err(ConfigError::PoolNameTooLong { .. })
    ));
}

#[parameterized(
    zero = { 0, false },
    one = { 1, true },
    typical = { 8, true },
    large = { 5000, true },
    at_limit = { MAX_CAPACITY, true },
    over_limit = { MAX_CAPACITY + 1, false },
)]
fn capacity_bounds(n: u32, valid: bool) {
    assert_eq!(Capacity::new(n).is_ok(), valid);
}

#[test]
fn zero_capacity_is_a_distinct_error() {
    assert!(matches!(Capacity::new(0), Err(ConfigError::ZeroCapacity)));
}

#[test]
fn capacity_slots_are_ascending_from_one() {
    let slots: Vec<u32> = Capacity::new(4).unwrap().slots().map(|s| s.get()).collect();
    assert_eq!(slots, vec![1, 2, 3, 4]);
}

#[test]
fn capacity_contains_only_its_own_slots() {
    let cap = Capacity::new(3).unwrap();
    assert!(cap.contains(slot(1)));
    assert!(cap.contains(slot(3)));
    assert!(!cap.contains(slot(4)));
}

#[test]
fn slot_number_zero_is_the_sentinel() {
    assert!(SlotNumber::new(0).is_none());
    assert_eq!(slot(7).get(), 7);
}

#[parameterized(
    one = { "1", Some(1) },
    large = { "4096", Some(4096) },
    zero = { "0", None },
    leading_zero = { "01", None },
    signed = { "+1", None },
    negative = { "-1", None },
    padded = { " 1", None },
    empty = { "", None },
    word = { "slot", None },
    overflow = { "99999999999", None },
)]
fn slot_number_parses_decimal_field_names(input: &str, expected: Option<u32>) {
    let parsed = input.parse::<SlotNumber>().ok().map(SlotNumber::get);
    assert_eq!(parsed, expected);
}

#[test]
fn slot_number_display_matches_field_name() {
    assert_eq!(slot(12).to_string(), "12");
}

#[test]
fn first_free_slot_on_empty_pool_is_one() {
    let cap = Capacity::new(3).unwrap();
    assert_eq!(first_free_slot(cap, |_| false), Some(slot(1)));
}

#[test]
fn first_free_slot_reuses_lowest_gap() {
    let cap = Capacity::new(3).unwrap();
    let occupied: BTreeSet<SlotNumber> = [slot(1), slot(3)].into_iter().collect();
    assert_eq!(
        first_free_slot(cap, |s| occupied.contains(&s)),
        Some(slot(2))
    );
}

#[test]
fn first_free_slot_on_full_pool_is_none() {
    let cap = Capacity::new(2).unwrap();
    assert_eq!(first_free_slot(cap, |_| true), None);
}

#[test]
fn first_free_slot_ignores_entries_beyond_capacity() {
    let cap = Capacity::new(2).unwrap();
    let occupied: BTreeSet<SlotNumber> = [slot(1), slot(2)].into_iter().collect();
    // A slot 3 left over from a larger capacity does not make room
    assert_eq!(first_free_slot(cap, |s| occupied.contains(&s)), None);
}

#[test]
fn pool_name_deserializes_with_validation() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        #[allow(dead_code)]
        pool: PoolName,
    }
    assert!(toml::from_str::<Wrapper>("pool = \"ok\"").is_ok());
    assert!(toml::from_str::<Wrapper>("pool = \"\"").is_err());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn first_free_slot_is_minimum_unoccupied(
            cap in 1u32..64,
            occupied in proptest::collection::btree_set(1u32..80, 0..64),
        ) {
            let capacity = Capacity::new(cap).unwrap();
            let found = first_free_slot(capacity, |s| occupied.contains(&s.get()));
            let expected = (1..=cap).find(|n| !occupied.contains(n));
            prop_assert_eq!(found.map(SlotNumber::get), expected);
        }
    }
}
