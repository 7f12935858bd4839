// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reading one integer as elapsed seconds under one epoch.
//!
//! The local reading shifts the instant by the *current* zone offset of the
//! [`Reference`](crate::Reference), applied uniformly; daylight-saving rules
//! that would have applied at the target date are ignored.

use crate::epoch::EpochDefinition;
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

/// `number` read as seconds since the start of `epoch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    pub number: i64,
    pub epoch: EpochDefinition,
    /// `start + number` seconds, `None` outside chrono's range.
    pub utc: Option<DateTime<Utc>>,
    /// `start + number + offset` seconds, labelled UTC like the utc reading.
    pub local: Option<DateTime<Utc>>,
}

impl CandidateMatch {
    /// Compute both readings of `number` for `epoch`.
    pub fn generate(number: i64, epoch: &EpochDefinition, offset: FixedOffset) -> Self {
        let shift = i64::from(offset.local_minus_utc());
        Self {
            number,
            epoch: epoch.clone(),
            utc: date_for_number(epoch.start(), number),
            local: date_for_number(epoch.start(), number.saturating_add(shift)),
        }
    }
}

/// `start` advanced by `seconds`, or `None` when the result is unrepresentable.
pub fn date_for_number(start: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(seconds).and_then(|delta| start.checked_add_signed(delta))
}

/// One candidate per catalog entry, in catalog order.
pub fn candidates(
    number: i64,
    catalog: &[EpochDefinition],
    offset: FixedOffset,
) -> Vec<CandidateMatch> {
    catalog
        .iter()
        .map(|epoch| CandidateMatch::generate(number, epoch, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EpochCatalog;
    use chrono::{Datelike, Offset, TimeZone};

    fn unix() -> &'static EpochDefinition {
        EpochCatalog::default_catalog().get("Unix").unwrap()
    }

    #[test]
    fn utc_reading_is_start_plus_seconds() {
        let m = CandidateMatch::generate(86_400, unix(), Utc.fix());
        assert_eq!(m.utc, Some(Utc.with_ymd_and_hms(1970, 1, 2, 0, 0, 0).unwrap()));
    }

    #[test]
    fn local_reading_is_shifted_by_the_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let m = CandidateMatch::generate(1_000, unix(), offset);
        assert_eq!(m.local.unwrap() - m.utc.unwrap(), TimeDelta::hours(2));

        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        let m = CandidateMatch::generate(1_000, unix(), west);
        assert_eq!(m.local.unwrap() - m.utc.unwrap(), TimeDelta::hours(-5));
    }

    #[test]
    fn unix_zero_one_hour_east_is_3600() {
        let m = CandidateMatch::generate(0, unix(), FixedOffset::east_opt(3600).unwrap());
        assert_eq!(m.utc.unwrap().timestamp(), 0);
        assert_eq!(m.local.unwrap().timestamp(), 3600);
    }

    #[test]
    fn zero_offset_readings_agree() {
        let m = CandidateMatch::generate(123_456, unix(), Utc.fix());
        assert_eq!(m.local, m.utc);
    }

    #[test]
    fn negative_numbers_go_before_the_start() {
        let m = CandidateMatch::generate(-86_400, unix(), Utc.fix());
        assert_eq!(m.utc.unwrap().year(), 1969);
    }

    #[test]
    fn unrepresentable_dates_are_none() {
        let m = CandidateMatch::generate(i64::MAX, unix(), Utc.fix());
        assert_eq!(m.utc, None);
        assert_eq!(m.local, None);
        let m = CandidateMatch::generate(i64::MIN, unix(), Utc.fix());
        assert_eq!(m.utc, None);
        let m = CandidateMatch::generate(i64::MAX, unix(), FixedOffset::east_opt(3600).unwrap());
        assert_eq!(m.local, None);
    }

    #[test]
    fn one_candidate_per_epoch_in_catalog_order() {
        let catalog = EpochCatalog::default_catalog();
        let all = candidates(1_000, catalog, Utc.fix());
        assert_eq!(all.len(), catalog.len());
        for (m, epoch) in all.iter().zip(catalog.iter()) {
            assert_eq!(&m.epoch, epoch);
            assert_eq!(m.number, 1_000);
        }
    }
}
