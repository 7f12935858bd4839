// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Named-field records for presentation layers.
//!
//! The engine types carry behaviour; these records carry the flat shape that
//! gets printed or serialised. Field names are stable:
//!
//! | Record | Fields |
//! |--------|--------|
//! | [`EpochRecord`] | `epoch_name`, `epoch_uses`, `epoch_date`, `now_utc`, `now_local`, `prevalence` |
//! | [`CandidateRecord`] | `input_number`, `epoch_type`, `converted_date_local`, `converted_date_utc` |
//! | [`ResultRecord`] | `input_number`, `epoch_types`, `all_results`, `most_likely_epoch` |
//!
//! With the `serde` feature enabled all three (and [`ResultArray`]) implement
//! `Serialize` and `Deserialize`.
//!
//! `Display` renders the plain-text report. For a [`ResultRecord`] the
//! default form shows only the most likely epoch; the alternate form (`{:#}`)
//! lists every candidate.

use crate::candidate::CandidateMatch;
use crate::epoch::EpochDefinition;
use crate::guess::ConversionResult;
use crate::reference::Reference;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An epoch plus "now" counted in its seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochRecord {
    pub epoch_name: String,
    pub epoch_uses: Vec<String>,
    pub epoch_date: DateTime<Utc>,
    pub now_local: i64,
    pub now_utc: i64,
    pub prevalence: u8,
}

/// One integer read under one epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateRecord {
    pub input_number: i64,
    pub epoch_type: EpochRecord,
    pub converted_date_local: Option<DateTime<Utc>>,
    pub converted_date_utc: Option<DateTime<Utc>>,
}

/// Flat form of a [`ConversionResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultRecord {
    pub input_number: i64,
    /// Ranked, most plausible first.
    pub epoch_types: Vec<EpochRecord>,
    /// Catalog order.
    pub all_results: Vec<CandidateRecord>,
    pub most_likely_epoch: Option<EpochRecord>,
}

/// Top-level wrapper used for JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultArray {
    pub epoch_results_array: Vec<ResultRecord>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════

impl EpochDefinition {
    /// This epoch as a record, with "now" taken from `reference`.
    pub fn record(&self, reference: &Reference) -> EpochRecord {
        EpochRecord {
            epoch_name: self.name().to_owned(),
            epoch_uses: self.uses().to_vec(),
            epoch_date: self.start(),
            now_local: self.now_local(reference),
            now_utc: self.now_utc(reference),
            prevalence: self.prevalence(),
        }
    }
}

impl CandidateMatch {
    pub fn record(&self, reference: &Reference) -> CandidateRecord {
        CandidateRecord {
            input_number: self.number,
            epoch_type: self.epoch.record(reference),
            converted_date_local: self.local,
            converted_date_utc: self.utc,
        }
    }
}

impl ConversionResult {
    pub fn record(&self) -> ResultRecord {
        let reference = self.reference();
        ResultRecord {
            input_number: self.number(),
            epoch_types: self
                .ranking()
                .iter()
                .map(|r| r.epoch.record(reference))
                .collect(),
            all_results: self.candidates().iter().map(|c| c.record(reference)).collect(),
            most_likely_epoch: self.most_likely().map(|e| e.record(reference)),
        }
    }
}

impl ResultRecord {
    /// The candidate under the most likely epoch.
    pub fn most_likely_result(&self) -> Option<&CandidateRecord> {
        let top = self.most_likely_epoch.as_ref()?;
        self.all_results
            .iter()
            .find(|c| c.epoch_type.epoch_name == top.epoch_name)
    }
}

impl<'a> FromIterator<&'a ConversionResult> for ResultArray {
    fn from_iter<T: IntoIterator<Item = &'a ConversionResult>>(iter: T) -> Self {
        Self {
            epoch_results_array: iter.into_iter().map(ConversionResult::record).collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Display
// ═══════════════════════════════════════════════════════════════════════════

fn rfc3339(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => "out of range".to_owned(),
    }
}

impl fmt::Display for EpochRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name of Epoch: {}", self.epoch_name)?;
        writeln!(f, "Used for: {}", self.epoch_uses.join(", "))?;
        writeln!(
            f,
            "Started On (UTC): {}",
            self.epoch_date.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f, "Current UTC Time in Epoch Seconds: {}", self.now_utc)?;
        writeln!(f, "Current Local Time in Epoch Seconds: {}", self.now_local)
    }
}

impl fmt::Display for CandidateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} in this Epoch:", self.input_number)?;
        writeln!(f, " Local - {}", rfc3339(self.converted_date_local))?;
        writeln!(f, " UTC - {}", rfc3339(self.converted_date_utc))?;
        write!(f, "{}", self.epoch_type)
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "For Input Number: {}", self.input_number)?;
        writeln!(f, "---------Most Likely Result----")?;
        match self.most_likely_result() {
            Some(top) => write!(f, "{top}")?,
            None => writeln!(f, "(no epochs to compare against)")?,
        }
        if f.alternate() {
            writeln!(f, "---------Other Results---------")?;
            for candidate in &self.all_results {
                writeln!(f, "{candidate}")?;
            }
        }
        Ok(())
    }
}
