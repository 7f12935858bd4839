// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The instant and zone offset a conversion is computed against.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// "Now" plus the local UTC offset in effect at that moment.
///
/// Every candidate and ranking produced by one aggregator call shares a
/// single `Reference`, so the results of that call are mutually consistent.
/// Tests and callers that need determinism build one explicitly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Reference {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl Reference {
    /// Build a reference from an explicit instant and offset.
    #[inline]
    pub const fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// A reference whose local zone is UTC itself.
    #[inline]
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    /// Sample the process clock and the local zone offset once.
    pub fn sample() -> Self {
        let local = Local::now();
        Self::new(local.with_timezone(&Utc), *local.offset())
    }

    #[inline]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    #[inline]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local offset east of UTC, in seconds.
    #[inline]
    pub fn offset_seconds(&self) -> i64 {
        i64::from(self.offset.local_minus_utc())
    }
}
