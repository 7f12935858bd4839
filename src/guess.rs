// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Batch conversion: normalise, generate candidates, rank, package.

use crate::candidate::{candidates, CandidateMatch};
use crate::epoch::{EpochCatalog, EpochDefinition};
use crate::error::{BadInput, GuessError};
use crate::normalize::normalize;
use crate::rank::{ranked_distances, Ranked};
use crate::reference::Reference;
use qtty::Days;
use tracing::debug;

/// Everything known about one parsed integer.
///
/// Built once per conversion and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    number: i64,
    reference: Reference,
    candidates: Vec<CandidateMatch>,
    ranking: Vec<Ranked>,
}

impl ConversionResult {
    /// Convert `number` under every epoch of `catalog` and rank the catalog.
    pub fn compute(number: i64, catalog: &[EpochDefinition], reference: Reference) -> Self {
        let candidates = candidates(number, catalog, reference.offset());
        let ranking = ranked_distances(catalog, number, reference.now());
        Self {
            number,
            reference,
            candidates,
            ranking,
        }
    }

    #[inline]
    pub const fn number(&self) -> i64 {
        self.number
    }

    /// The instant and offset this result was computed against.
    #[inline]
    pub const fn reference(&self) -> &Reference {
        &self.reference
    }

    /// One candidate per catalog entry, in catalog order.
    #[inline]
    pub fn candidates(&self) -> &[CandidateMatch] {
        &self.candidates
    }

    /// The catalog ordered by closeness, most plausible first.
    pub fn ranked(&self) -> EpochCatalog {
        EpochCatalog::from_ordering(self.ranked_epochs().cloned().collect())
    }

    /// The ranked epochs without their distances.
    pub fn ranked_epochs(&self) -> impl Iterator<Item = &EpochDefinition> + '_ {
        self.ranking.iter().map(|r| &r.epoch)
    }

    /// The ranked order with each entry's distance.
    #[inline]
    pub fn ranking(&self) -> &[Ranked] {
        &self.ranking
    }

    /// Rank 0. `None` only when the catalog was empty.
    #[inline]
    pub fn most_likely(&self) -> Option<&EpochDefinition> {
        self.ranking.first().map(|r| &r.epoch)
    }

    /// The candidate dates under the most likely epoch.
    pub fn most_likely_candidate(&self) -> Option<&CandidateMatch> {
        let top = self.most_likely()?;
        self.candidates.iter().find(|c| c.epoch.name() == top.name())
    }

    /// How far the most likely reading sits from now.
    pub fn most_likely_distance(&self) -> Option<Days> {
        self.ranking.first().map(Ranked::distance_days)
    }
}

/// Results of one [`guess`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessReport {
    /// One entry per parsed integer, in input order.
    pub results: Vec<ConversionResult>,
    /// Inputs that did not parse, in input order.
    pub bad: Vec<BadInput>,
}

impl GuessReport {
    /// The advisory aggregate error: `Some` iff any input was rejected.
    pub fn error(&self) -> Option<GuessError> {
        (!self.bad.is_empty()).then(|| GuessError::ParseFailure {
            count: self.bad.len(),
        })
    }

    /// `Err(EmptyUsableInput)` when nothing could be converted.
    pub fn ensure_usable(&self) -> Result<&Self, GuessError> {
        if self.results.is_empty() {
            Err(GuessError::EmptyUsableInput)
        } else {
            Ok(self)
        }
    }

    /// Trimmed text of each rejected input.
    pub fn bad_strings(&self) -> impl Iterator<Item = &str> + '_ {
        self.bad.iter().map(|b| b.text.as_str())
    }
}

/// Guess the epoch of every input against the built-in catalog, sampling
/// the clock once.
pub fn guess<I, S>(inputs: I) -> GuessReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    guess_with(EpochCatalog::default_catalog(), inputs, Reference::sample())
}

/// [`guess`] with an explicit catalog and reference.
pub fn guess_with<I, S>(catalog: &[EpochDefinition], inputs: I, reference: Reference) -> GuessReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized = normalize(inputs);
    debug!(
        parsed = normalized.numbers.len(),
        rejected = normalized.bad.len(),
        epochs = catalog.len(),
        "normalised guess input"
    );

    let results = normalized
        .numbers
        .iter()
        .map(|&number| ConversionResult::compute(number, catalog, reference))
        .collect();

    GuessReport {
        results,
        bad: normalized.bad,
    }
}
