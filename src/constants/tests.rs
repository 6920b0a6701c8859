//! Tests for the constants
//!
//! This test validates the relationships between the size constants.

use super::*;

#[test]
#[expect(
    clippy::assertions_on_constants,
    reason = "Asserting an invariant on the constants"
)]
fn test_invariant() {
    // CHUNK_SIZE is a multiple of 1 KiB
    assert_eq!(CHUNK_SIZE % 1024, 0);

    // CHUNK_SIZE is a power of two.
    assert_eq!(CHUNK_SIZE & (CHUNK_SIZE - 1), 0);

    // The skip scratch region fits in a single window
    assert!(SKIP_SCRATCH_SIZE <= CHUNK_SIZE);

    // The floor is well above the minimum ingestion capacity
    assert!(MIN_INGEST_CAPACITY < BOMB_FLOOR);

    // A hint below the minimum capacity cannot trip the ratio before the floor
    assert!(BOMB_FLOOR / BOMB_RATIO > MIN_INGEST_CAPACITY);
}

#[test]
fn test_bomb_floor_is_100_mib() {
    assert_eq!(BOMB_FLOOR, 100 * 1024 * 1024);
    assert_eq!(BOMB_RATIO, 200);
}
