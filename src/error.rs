// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error taxonomy.
//!
//! | Type | Raised by | Recoverable |
//! |------|-----------|-------------|
//! | [`BadInput`] | [`normalize`](crate::normalize()) | per item, collected |
//! | [`GuessError::ParseFailure`] | [`Normalized::check`](crate::Normalized::check), [`GuessReport::error`](crate::GuessReport::error) | advisory |
//! | [`GuessError::EmptyUsableInput`] | [`GuessReport::ensure_usable`](crate::GuessReport::ensure_usable) | caller decides |
//! | [`CatalogError`] | [`EpochCatalog::new`](crate::EpochCatalog::new) | defect for the built-in table |

use std::num::ParseIntError;
use thiserror::Error;

/// An input token that could not be read as a signed 64-bit integer.
///
/// `text` is the whitespace-trimmed input, before any decimal suffix was cut.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{text:?} is not a signed 64-bit integer: {reason}")]
pub struct BadInput {
    pub text: String,
    #[source]
    pub reason: ParseIntError,
}

/// Failures surfaced to callers of the conversion engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// At least one input could not be converted. The converted values are
    /// still returned; inspect the bad-input list for details.
    #[error("{count} input string(s) could not be converted to an integer")]
    ParseFailure { count: usize },

    /// Nothing numeric was left once every input source was normalised.
    #[error("no usable numbers in the input")]
    EmptyUsableInput,
}

/// Problems found while assembling an [`EpochCatalog`](crate::EpochCatalog).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("epoch `{name}` has an unparseable start date {literal:?}: {source}")]
    InvalidStart {
        name: String,
        literal: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("epoch name `{0}` appears more than once")]
    DuplicateName(String),

    #[error("epoch `{name}` has prevalence {prevalence}, expected 0..=5")]
    PrevalenceOutOfRange { name: String, prevalence: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_input_message_names_the_text() {
        let reason = "x".parse::<i64>().unwrap_err();
        let bad = BadInput {
            text: "x".into(),
            reason,
        };
        let msg = bad.to_string();
        assert!(msg.starts_with("\"x\""), "{msg}");
        assert!(std::error::Error::source(&bad).is_some());
    }

    #[test]
    fn parse_failure_reports_count() {
        let err = GuessError::ParseFailure { count: 3 };
        assert!(err.to_string().starts_with("3 input"));
    }
}
