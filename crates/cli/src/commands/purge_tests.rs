// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn min_age_converts_days_to_seconds() {
    assert_eq!(min_age(0), Duration::ZERO);
    assert_eq!(min_age(2), Duration::from_secs(2 * 24 * 60 * 60));
}

#[test]
fn min_age_saturates_on_absurd_day_counts() {
    assert_eq!(min_age(u64::MAX), Duration::from_secs(u64::MAX));
}
