// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Closest-match ranking.
//!
//! An epoch is plausible for a number when "now", counted in that epoch's
//! seconds, lands close to the number. Ranking orders a catalog by
//!
//! ```text
//! distance = | seconds_since_start(now, epoch) − number |
//! ```
//!
//! smallest first. Ties are broken by start instant (oldest first), then by
//! catalog position, so the result never depends on anything but the inputs.
//! The input slice is only read; every call allocates a fresh ordering.

use crate::epoch::{EpochCatalog, EpochDefinition};
use chrono::{DateTime, Utc};
use qtty::{Day, Days, Seconds};
use tracing::trace;

/// An epoch together with how far its "now" sits from the ranked number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked {
    pub epoch: EpochDefinition,
    /// Absolute difference in seconds.
    pub distance: u64,
}

impl Ranked {
    #[inline]
    pub fn distance_seconds(&self) -> Seconds {
        Seconds::new(self.distance as f64)
    }

    /// The distance in days, handy for telling a near miss from a wild one.
    #[inline]
    pub fn distance_days(&self) -> Days {
        self.distance_seconds().to::<Day>()
    }
}

struct Scored<'a> {
    distance: u64,
    /// Index in the start-ordered copy.
    position: usize,
    epoch: &'a EpochDefinition,
}

fn score<'a>(catalog: &'a [EpochDefinition], number: i64, now: DateTime<Utc>) -> Vec<Scored<'a>> {
    let mut by_start: Vec<&EpochDefinition> = catalog.iter().collect();
    by_start.sort_by_key(|epoch| epoch.start());

    let mut scored: Vec<Scored<'a>> = by_start
        .into_iter()
        .enumerate()
        .map(|(position, epoch)| Scored {
            distance: epoch.seconds_since_start(now).abs_diff(number),
            position,
            epoch,
        })
        .collect();
    scored.sort_by_key(|s| (s.distance, s.position));
    scored
}

/// Order `catalog` by closeness of `now` to `number`, most plausible first.
pub fn rank(catalog: &[EpochDefinition], number: i64, now: DateTime<Utc>) -> EpochCatalog {
    let ordering: Vec<EpochDefinition> = score(catalog, number, now)
        .into_iter()
        .map(|s| s.epoch.clone())
        .collect();
    if let Some(top) = ordering.first() {
        trace!(number, top = top.name(), "ranked {} epochs", ordering.len());
    }
    EpochCatalog::from_ordering(ordering)
}

/// Same ordering as [`rank`], keeping each entry's distance.
pub fn ranked_distances(catalog: &[EpochDefinition], number: i64, now: DateTime<Utc>) -> Vec<Ranked> {
    score(catalog, number, now)
        .into_iter()
        .map(|s| Ranked {
            epoch: s.epoch.clone(),
            distance: s.distance,
        })
        .collect()
}
