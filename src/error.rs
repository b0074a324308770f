// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::fmt;

use snafu::Snafu;

/// A single parse failure: a line number and a human-readable message.
///
/// Parsing never aborts on the first error (see [`crate::Dockerfile::parse`]);
/// this is what gets carried alongside the best-effort partial tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
  pub line: usize,
  pub message: String
}

impl ParseError {
  pub(crate) fn new<S: Into<String>>(line: usize, message: S) -> ParseError {
    ParseError { line, message: message.into() }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "line {}: {}", self.line, self.message)
  }
}

/// A `dockerfile_lint` error.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
  #[snafu(display("could not parse Dockerfile: {}", source))]
  Parse {
    source: ParseError
  },

  #[snafu(display("error unescaping string: {:?}", source))]
  UnescapeError {
    source: enquote::Error
  },

  #[snafu(display("'{}' does not name a registered rule", id))]
  InvalidRuleId {
    id: String
  }
}

/// A `dockerfile_lint` result.
pub type Result<T, E = Error> = std::result::Result<T, E>;
