// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch definitions and the catalog that holds them.
//!
//! An [`EpochDefinition`] names a computing convention and the instant it
//! counts seconds from. An [`EpochCatalog`] is an ordered, validated,
//! immutable collection of them; insertion order is the display order.
//!
//! # Built-in epochs
//!
//! | Name | Start (UTC) | Prevalence |
//! |------|-------------|------------|
//! | CommonEra | 0001-01-01 | 1 |
//! | Windows | 1601-01-01 | 5 |
//! | VMS | 1858-11-17 | 3 |
//! | Microsoft COM | 1899-12-30 | 4 |
//! | Microsoft Excel | 1899-12-31 | 3 |
//! | NTP | 1900-01-01 | 2 |
//! | Mac Classic | 1904-01-01 | 2 |
//! | Unix | 1970-01-01 | 5 |
//! | FAT | 1980-01-01 | 5 |
//! | GPS | 1980-01-06 | 2 |
//! | PostgreSQL | 2000-01-01 | 3 |
//! | Mac OS X | 2001-01-01 | 5 |
//!
//! # Elapsed seconds
//!
//! Elapsed time is measured as a signed nanosecond count held in an `i64`,
//! then truncated to whole seconds. Spans longer than about 292 years do not
//! fit and saturate at ±[`MAX_ELAPSED_SECONDS`], so the two oldest built-in
//! epochs report the same "now" value.

use crate::error::CatalogError;
use crate::reference::Reference;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Layout every start-date literal must follow: `YYYY-MM-DDTHH:MM:SSZ`.
pub const START_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Highest prevalence weight an epoch may carry.
pub const MAX_PREVALENCE: u8 = 5;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Saturation bound of [`seconds_between`], roughly 292 years.
pub const MAX_ELAPSED_SECONDS: i64 = i64::MAX / NANOS_PER_SECOND;

/// Whole seconds elapsed from `start` to `at`, negative when `at` is earlier.
///
/// Saturates at ±[`MAX_ELAPSED_SECONDS`] when the span overflows a 64-bit
/// nanosecond count.
pub fn seconds_between(start: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    let elapsed = at.signed_duration_since(start);
    match elapsed.num_nanoseconds() {
        Some(nanos) => nanos / NANOS_PER_SECOND,
        None if elapsed < TimeDelta::zero() => -MAX_ELAPSED_SECONDS,
        None => MAX_ELAPSED_SECONDS,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EpochDefinition
// ═══════════════════════════════════════════════════════════════════════════

/// A named reference instant that some computing convention counts from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochDefinition {
    #[cfg_attr(feature = "serde", serde(rename = "epoch_name"))]
    name: String,
    #[cfg_attr(feature = "serde", serde(rename = "epoch_uses"))]
    uses: Vec<String>,
    #[cfg_attr(feature = "serde", serde(rename = "epoch_date"))]
    start: DateTime<Utc>,
    prevalence: u8,
}

impl EpochDefinition {
    /// Build a definition from an already-known start instant.
    ///
    /// Prevalence is checked when the definition joins an [`EpochCatalog`].
    pub fn new<N, U, S>(name: N, uses: U, start: DateTime<Utc>, prevalence: u8) -> Self
    where
        N: Into<String>,
        U: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            uses: uses.into_iter().map(Into::into).collect(),
            start,
            prevalence,
        }
    }

    /// Build a definition from a start literal in [`START_FORMAT`].
    pub fn parse<N, U, S>(
        name: N,
        uses: U,
        literal: &str,
        prevalence: u8,
    ) -> Result<Self, CatalogError>
    where
        N: Into<String>,
        U: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let start = NaiveDateTime::parse_from_str(literal, START_FORMAT)
            .map_err(|source| CatalogError::InvalidStart {
                name: name.clone(),
                literal: literal.to_owned(),
                source,
            })?
            .and_utc();
        Ok(Self::new(name, uses, start, prevalence))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    /// The instant this epoch counts from.
    #[inline]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// How common the convention is, 0 (rare) to 5 (everywhere).
    #[inline]
    pub const fn prevalence(&self) -> u8 {
        self.prevalence
    }

    // ── epoch seconds ─────────────────────────────────────────────────

    /// `at` expressed in this epoch's elapsed seconds.
    #[inline]
    pub fn seconds_since_start(&self, at: DateTime<Utc>) -> i64 {
        seconds_between(self.start, at)
    }

    /// The reference instant in this epoch's elapsed seconds.
    #[inline]
    pub fn now_utc(&self, reference: &Reference) -> i64 {
        self.seconds_since_start(reference.now())
    }

    /// Like [`now_utc`](Self::now_utc), shifted by the reference's local offset.
    #[inline]
    pub fn now_local(&self, reference: &Reference) -> i64 {
        self.now_utc(reference)
            .saturating_add(reference.offset_seconds())
    }
}

impl fmt::Display for EpochDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.start.format(START_FORMAT))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Built-in table
// ═══════════════════════════════════════════════════════════════════════════

struct BuiltinEpoch {
    name: &'static str,
    uses: &'static [&'static str],
    start: &'static str,
    prevalence: u8,
}

/// Canonical order of the built-in catalog.
const BUILTIN_EPOCHS: [BuiltinEpoch; 12] = [
    BuiltinEpoch {
        name: "CommonEra",
        uses: &[
            "Common Era",
            "ISO 2014",
            "RFC 3339",
            "Microsoft .NET",
            "Go",
            "REXX",
            "Rata Die",
        ],
        start: "0001-01-01T00:00:00Z",
        prevalence: 1,
    },
    BuiltinEpoch {
        name: "Windows",
        uses: &["Windows", "NTFS", "COBOL"],
        start: "1601-01-01T00:00:00Z",
        prevalence: 5,
    },
    // MJD zero, JD 2 400 000.5
    BuiltinEpoch {
        name: "VMS",
        uses: &[
            "VMS",
            "United States Naval Observatory",
            "DVB SI 16-bit day stamps",
            "Astronomy-related",
        ],
        start: "1858-11-17T00:00:00Z",
        prevalence: 3,
    },
    BuiltinEpoch {
        name: "Microsoft COM",
        uses: &[
            "Microsoft COM DATE",
            "Object Pascal",
            "LibreOffice Calc",
            "Google Sheets",
            "Technical internal value used by Microsoft Excel",
        ],
        start: "1899-12-30T00:00:00Z",
        prevalence: 4,
    },
    // "January 0, 1900"
    BuiltinEpoch {
        name: "Microsoft Excel",
        uses: &["Microsoft Excel", "Lotus 1-2-3"],
        start: "1899-12-31T00:00:00Z",
        prevalence: 3,
    },
    BuiltinEpoch {
        name: "NTP",
        uses: &[
            "Network Time Protocol",
            "IBM CICS",
            "Mathematica",
            "RISC OS",
            "VME",
            "Common Lisp",
            "Michigan Terminal System",
        ],
        start: "1900-01-01T00:00:00Z",
        prevalence: 2,
    },
    BuiltinEpoch {
        name: "Mac Classic",
        uses: &[
            "Apple Inc.'s classic Mac OS",
            "LabVIEW",
            "Palm OS",
            "MP4",
            "Microsoft Excel (optionally)",
            "IGOR Pro",
        ],
        start: "1904-01-01T00:00:00Z",
        prevalence: 2,
    },
    BuiltinEpoch {
        name: "Unix",
        uses: &[
            "Unix",
            "Unix Variants (Linux, MacOS, Solaris, BSD, etc...)",
            "POSIX",
        ],
        start: "1970-01-01T00:00:00Z",
        prevalence: 5,
    },
    BuiltinEpoch {
        name: "FAT",
        uses: &[
            "FAT12",
            "FAT16",
            "FAT32",
            "exFAT filesystems",
            "IBM BIOS",
            "INT 1Ah",
            "DOS",
            "OS/2",
        ],
        start: "1980-01-01T00:00:00Z",
        prevalence: 5,
    },
    // first Sunday of 1980, five days after FAT
    BuiltinEpoch {
        name: "GPS",
        uses: &["Qualcomm BREW", "GPS", "ATSC 32-bit time stamps"],
        start: "1980-01-06T00:00:00Z",
        prevalence: 2,
    },
    BuiltinEpoch {
        name: "PostgreSQL",
        uses: &["PostgreSQL", "AppleSingle", "AppleDouble", "ZigBee UTCTime"],
        start: "2000-01-01T00:00:00Z",
        prevalence: 3,
    },
    BuiltinEpoch {
        name: "Mac OS X",
        uses: &["OS X", "Apple Cocoa"],
        start: "2001-01-01T00:00:00Z",
        prevalence: 5,
    },
];

static DEFAULT_CATALOG: LazyLock<EpochCatalog> = LazyLock::new(|| {
    EpochCatalog::builtin()
        .unwrap_or_else(|err| panic!("built-in epoch table is malformed: {err}"))
});

// ═══════════════════════════════════════════════════════════════════════════
// EpochCatalog
// ═══════════════════════════════════════════════════════════════════════════

/// An ordered, immutable set of epochs with unique names.
///
/// Dereferences to `[EpochDefinition]`, so a catalog can be handed straight
/// to [`rank`](crate::rank()).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EpochCatalog {
    epochs: Vec<EpochDefinition>,
}

impl EpochCatalog {
    /// Validate and wrap `epochs`, keeping their order.
    pub fn new(epochs: Vec<EpochDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(epochs.len());
        for epoch in &epochs {
            if epoch.prevalence > MAX_PREVALENCE {
                return Err(CatalogError::PrevalenceOutOfRange {
                    name: epoch.name.clone(),
                    prevalence: epoch.prevalence,
                });
            }
            if !seen.insert(epoch.name()) {
                return Err(CatalogError::DuplicateName(epoch.name.clone()));
            }
        }
        Ok(Self { epochs })
    }

    /// Build the twelve built-in epochs from their literals.
    pub fn builtin() -> Result<Self, CatalogError> {
        let epochs = BUILTIN_EPOCHS
            .iter()
            .map(|e| EpochDefinition::parse(e.name, e.uses.iter().copied(), e.start, e.prevalence))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(epochs)
    }

    /// The shared built-in catalog, built and checked on first use.
    ///
    /// # Panics
    ///
    /// If the built-in table itself is malformed. That is a defect caught by
    /// this crate's tests, never a runtime condition.
    pub fn default_catalog() -> &'static EpochCatalog {
        &DEFAULT_CATALOG
    }

    /// Ordering produced by ranking: a permutation of a catalog's entries,
    /// which therefore needs no revalidation.
    pub(crate) fn from_ordering(epochs: Vec<EpochDefinition>) -> Self {
        Self { epochs }
    }

    /// Look up an epoch by exact name.
    pub fn get(&self, name: &str) -> Option<&EpochDefinition> {
        self.epochs.iter().find(|e| e.name == name)
    }

    /// A new catalog keeping only the epochs for which `keep` returns true.
    pub fn restricted<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&EpochDefinition) -> bool,
    {
        Self {
            epochs: self.epochs.iter().filter(|e| keep(e)).cloned().collect(),
        }
    }

    /// A new catalog with `epoch` appended.
    pub fn extended(&self, epoch: EpochDefinition) -> Result<Self, CatalogError> {
        let mut epochs = self.epochs.clone();
        epochs.push(epoch);
        Self::new(epochs)
    }

    pub fn as_slice(&self) -> &[EpochDefinition] {
        &self.epochs
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.epochs.iter().map(EpochDefinition::name)
    }

    pub fn into_vec(self) -> Vec<EpochDefinition> {
        self.epochs
    }
}

impl Deref for EpochCatalog {
    type Target = [EpochDefinition];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.epochs
    }
}

impl AsRef<[EpochDefinition]> for EpochCatalog {
    #[inline]
    fn as_ref(&self) -> &[EpochDefinition] {
        &self.epochs
    }
}

impl<'a> IntoIterator for &'a EpochCatalog {
    type Item = &'a EpochDefinition;
    type IntoIter = std::slice::Iter<'a, EpochDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.epochs.iter()
    }
}

impl TryFrom<Vec<EpochDefinition>> for EpochCatalog {
    type Error = CatalogError;

    fn try_from(epochs: Vec<EpochDefinition>) -> Result<Self, Self::Error> {
        Self::new(epochs)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
