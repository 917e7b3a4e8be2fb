// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_clock_advances_both_instant_and_epoch() {
    let clock = FakeClock::new();
    let start = clock.epoch_ms();
    clock.advance(Duration::from_secs(61));
    assert_eq!(clock.epoch_ms(), start + 61_000);
    assert_eq!(clock.epoch_secs(), (start + 61_000) / 1000);
}