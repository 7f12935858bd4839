// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch guessing
//!
//! Given an integer, which epoch is it counting seconds from? This crate
//! reads the integer under every known epoch and ranks the epochs by how
//! close "now", counted in each epoch's own seconds, lands to the integer.
//!
//! # Core types
//!
//! - [`EpochDefinition`] — a named start instant with known uses and a
//!   prevalence weight.
//! - [`EpochCatalog`] — an ordered, validated, immutable set of epochs.
//! - [`Reference`] — the "now" and local UTC offset a conversion uses.
//! - [`CandidateMatch`] — one integer read under one epoch (UTC and local).
//! - [`ConversionResult`] — every candidate for one integer plus the ranking.
//! - [`GuessReport`] — results and rejected inputs of a batch.
//!
//! # Entry points
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`guess`] | batch conversion against the built-in catalog |
//! | [`guess_with`] | same, with an explicit catalog and [`Reference`] |
//! | [`rank()`] | closest-match ordering of any catalog |
//! | [`normalize()`] | raw strings to integers, collecting failures |
//! | [`numeric_substrings`] | digit runs inside free text |
//!
//! ```
//! use epochguess::guess;
//!
//! let report = guess(["1700000000"]);
//! assert!(report.error().is_none());
//! let top = report.results[0].most_likely().unwrap();
//! println!("{} looks like {}", report.results[0].number(), top.name());
//! ```
//!
//! # Features
//!
//! - `serde` — `Serialize`/`Deserialize` for epochs and the [`record`] types.
//! - `cli` — the `epochguess` command-line tool and its [`cli`] module.

mod candidate;
#[cfg(feature = "cli")]
pub mod cli;
mod epoch;
pub mod error;
mod guess;
mod normalize;
mod rank;
pub mod record;
mod reference;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use candidate::{candidates, date_for_number, CandidateMatch};
pub use epoch::{
    seconds_between, EpochCatalog, EpochDefinition, MAX_ELAPSED_SECONDS, MAX_PREVALENCE,
    START_FORMAT,
};
pub use error::{BadInput, CatalogError, GuessError};
pub use guess::{guess, guess_with, ConversionResult, GuessReport};
pub use normalize::{
    dedup_preserving_order, normalize, normalize_one, numeric_substrings, Normalized,
};
pub use rank::{rank, ranked_distances, Ranked};
pub use record::{CandidateRecord, EpochRecord, ResultArray, ResultRecord};
pub use reference::Reference;
