// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Turning raw text into candidate integers.
//!
//! [`normalize`] never stops at the first bad token: every input is tried and
//! the failures are collected next to the successes.

use crate::error::{BadInput, GuessError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const TRIMMED: &[char] = &[' ', '\t', '\r', '\n'];

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit-run pattern is valid"));

/// Outcome of normalising a batch of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Parsed values, in input order.
    pub numbers: Vec<i64>,
    /// Inputs that did not parse, in input order.
    pub bad: Vec<BadInput>,
}

impl Normalized {
    /// `Err(ParseFailure)` when at least one input was rejected.
    ///
    /// `numbers` stays usable either way.
    pub fn check(&self) -> Result<(), GuessError> {
        if self.bad.is_empty() {
            Ok(())
        } else {
            Err(GuessError::ParseFailure {
                count: self.bad.len(),
            })
        }
    }
}

/// Parse one token: trim, cut at the first `.`, read base-10 `i64`.
pub fn normalize_one(raw: &str) -> Result<i64, BadInput> {
    let trimmed = raw.trim_matches(TRIMMED);
    let integral = trimmed.split('.').next().unwrap_or_default();
    integral.parse::<i64>().map_err(|reason| BadInput {
        text: trimmed.to_owned(),
        reason,
    })
}

/// Parse every input, keeping successes and failures in input order.
pub fn normalize<I, S>(inputs: I) -> Normalized
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Normalized::default();
    for raw in inputs {
        match normalize_one(raw.as_ref()) {
            Ok(n) => out.numbers.push(n),
            Err(bad) => out.bad.push(bad),
        }
    }
    out
}

/// Every maximal run of ASCII digits in `text`, in order, duplicates kept.
///
/// Signs and decimal points are not part of a run: `"-12.5"` yields
/// `["12", "5"]`.
pub fn numeric_substrings(text: &str) -> Vec<&str> {
    DIGIT_RUN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Drop repeated strings, keeping the first occurrence of each.
pub fn dedup_preserving_order(items: &mut Vec<String>) {
    let mut seen = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(item.clone()));
}
