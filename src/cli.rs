// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Command-line front end behind the `cli` feature.
//!
//! Numbers come from the arguments and, when one argument is `-`, from
//! stdin. Stdin is read as bytes and decoded lossily, so stray non-UTF-8
//! bytes never hide the digit runs around them. The binary only parses
//! flags, installs the subscriber and hands the process streams to [`run`].

use crate::guess::{guess, GuessReport};
use crate::normalize::{dedup_preserving_order, numeric_substrings};
use crate::record::ResultArray;
use clap::Parser;
use std::io::{self, Read, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "epochguess", version)]
#[command(about = "Guess which epoch an integer timestamp counts from")]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Text containing numbers to convert; `-` also reads stdin
    pub inputs: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Show every epoch's reading, not only the most likely one
    #[arg(long)]
    pub all: bool,

    /// Pass tokens to the parser as-is instead of extracting digit runs
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no numbers found in the input")]
    NoInput,

    #[error("unable to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("none of the input converted to a number")]
    NoNumbers,

    #[error("could not encode results as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// Process exit status for this failure. Clap owns status 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::NoInput => 3,
            CliError::Stdin(_) => 4,
            CliError::NoNumbers => 5,
            CliError::Json(_) => 6,
            CliError::Output(_) => 7,
        }
    }
}

/// Tokens from the arguments, preceded by stdin's when an argument is `-`.
///
/// Unless `--raw`, every token is reduced to its digit runs. The merged list
/// keeps only the first occurrence of each string.
pub fn collect_inputs<R: Read>(cli: &Cli, mut stdin: R) -> Result<Vec<String>, CliError> {
    let mut tokens = Vec::new();
    if cli.inputs.iter().any(|arg| arg == "-") {
        let mut bytes = Vec::new();
        stdin.read_to_end(&mut bytes).map_err(CliError::Stdin)?;
        let text = String::from_utf8_lossy(&bytes);
        tokens.extend(text.split_whitespace().map(str::to_owned));
    }
    tokens.extend(cli.inputs.iter().filter(|arg| *arg != "-").cloned());

    let mut inputs: Vec<String> = if cli.raw {
        tokens
    } else {
        tokens
            .iter()
            .flat_map(|token| numeric_substrings(token))
            .map(str::to_owned)
            .collect()
    };
    dedup_preserving_order(&mut inputs);
    Ok(inputs)
}

/// Convert everything [`collect_inputs`] finds and print the report to `out`.
///
/// Rejected strings are listed on `err`; they only fail the run when nothing
/// else converted.
pub fn run<R, W, E>(cli: &Cli, stdin: R, mut out: W, mut err: E) -> Result<(), CliError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let inputs = collect_inputs(cli, stdin)?;
    if inputs.is_empty() {
        return Err(CliError::NoInput);
    }
    debug!(count = inputs.len(), "collected input strings");

    let report = guess(&inputs);
    report_bad_strings(&report, &mut err).map_err(CliError::Output)?;
    report.ensure_usable().map_err(|_| CliError::NoNumbers)?;

    if cli.json {
        let array: ResultArray = report.results.iter().collect();
        let json = serde_json::to_string_pretty(&array)?;
        writeln!(out, "{json}").map_err(CliError::Output)?;
    } else {
        for result in &report.results {
            let record = result.record();
            let written = if cli.all {
                writeln!(out, "{record:#}")
            } else {
                writeln!(out, "{record}")
            };
            written.map_err(CliError::Output)?;
        }
    }
    Ok(())
}

fn report_bad_strings<E: Write>(report: &GuessReport, err: &mut E) -> io::Result<()> {
    if let Some(failure) = report.error() {
        writeln!(err, "{failure}:")?;
        for bad in report.bad_strings() {
            writeln!(err, "{bad}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("epochguess").chain(args.iter().copied())).unwrap()
    }

    fn inputs(args: &[&str], stdin: &[u8]) -> Vec<String> {
        collect_inputs(&cli(args), stdin).unwrap()
    }

    fn run_with(args: &[&str], stdin: &[u8]) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(&cli(args), stdin, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn flags_parse() {
        let parsed = cli(&["--json", "--all", "--raw", "-5", "x"]);
        assert!(parsed.json && parsed.all && parsed.raw);
        assert_eq!(parsed.inputs, ["-5", "x"]);
        assert!(Cli::try_parse_from(["epochguess", "--bogus"]).is_err());
    }

    #[test]
    fn digit_runs_are_pulled_out_of_arguments() {
        assert_eq!(
            inputs(&["ts=1700000000,id=42", "v1.5"], b""),
            ["1700000000", "42", "1", "5"]
        );
    }

    #[test]
    fn stdin_is_read_only_for_a_dash() {
        assert_eq!(inputs(&["7"], b"99 100"), ["7"]);
        assert_eq!(inputs(&["7", "-"], b"99\n100\t"), ["99", "100", "7"]);
    }

    #[test]
    fn invalid_utf8_on_stdin_does_not_hide_numbers() {
        let got = inputs(&["-"], b"ts=1700000000 \xff\xfe junk\n");
        assert_eq!(got, ["1700000000"]);

        let (result, out, _) = run_with(&["-"], b"ts=1700000000 \xff\xfe junk\n");
        assert!(result.is_ok());
        assert!(out.starts_with("For Input Number: 1700000000\n"));
    }

    #[test]
    fn raw_keeps_tokens_whole() {
        assert_eq!(inputs(&["--raw", "-12.5", "abc"], b""), ["-12.5", "abc"]);
        assert_eq!(inputs(&["-12.5"], b""), ["12", "5"]);
    }

    #[test]
    fn duplicates_collapse_across_sources() {
        assert_eq!(
            inputs(&["-", "id 5 and 6", "6"], b"5 1700000000 5"),
            ["5", "1700000000", "6"]
        );
    }

    #[test]
    fn good_command_line_converts_every_number() {
        let (result, out, err) = run_with(&["3902432", "4928432432"], b"");
        assert!(result.is_ok());
        assert_eq!(out.matches("For Input Number:").count(), 2);
        assert!(out.contains("For Input Number: 3902432\n"));
        assert!(out.contains("For Input Number: 4928432432\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn oversized_number_fails_with_no_numbers() {
        let (result, out, err) = run_with(&["3452543252352353253253252"], b"");
        let failure = result.unwrap_err();
        assert!(matches!(failure, CliError::NoNumbers));
        assert_eq!(failure.exit_code(), 5);
        assert!(out.is_empty());
        assert!(err.contains("3452543252352353253253252"));
    }

    #[test]
    fn text_without_digits_is_no_input() {
        let (result, _, _) = run_with(&["abc"], b"");
        let failure = result.unwrap_err();
        assert!(matches!(failure, CliError::NoInput));
        assert_eq!(failure.exit_code(), 3);
        assert_eq!(failure.to_string(), "no numbers found in the input");

        let (result, _, _) = run_with(&[], b"");
        assert_eq!(result.unwrap_err().exit_code(), 3);
    }

    #[test]
    fn raw_garbage_is_no_numbers() {
        let (result, _, err) = run_with(&["--raw", "abc"], b"");
        assert_eq!(result.unwrap_err().exit_code(), 5);
        assert!(err.contains("abc"));
    }

    #[test]
    fn partial_failure_still_prints_results() {
        let (result, out, err) = run_with(&["--raw", "1700000000", "nope"], b"");
        assert!(result.is_ok());
        assert!(out.contains("For Input Number: 1700000000\n"));
        assert!(err.contains("nope"));
    }

    #[test]
    fn json_output_wraps_the_result_array() {
        let (result, out, _) = run_with(&["--json", "1700000000"], b"");
        assert!(result.is_ok());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let array = value["epoch_results_array"].as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["input_number"], 1_700_000_000i64);
    }

    #[test]
    fn all_lists_other_results() {
        let (_, short, _) = run_with(&["1700000000"], b"");
        let (_, long, _) = run_with(&["--all", "1700000000"], b"");
        assert!(!short.contains("Other Results"));
        assert!(long.contains("---------Other Results---------"));
    }
}
