// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! A single lint finding (§4.3) and its severity.

/// How seriously a finding should be treated. Ordered `Info < Warning <
/// Error` so callers can filter by a minimum threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
  Info,
  Warning,
  Error
}

/// A single rule violation against one instruction (§4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
  pub rule_id: String,
  pub severity: Severity,
  pub line: usize,
  pub column: usize,
  pub message: String,
  pub suggestion: Option<String>
}

impl Finding {
  pub(crate) fn new(rule_id: &str, severity: Severity, line: usize, message: impl Into<String>) -> Finding {
    Finding {
      rule_id: rule_id.to_string(),
      severity,
      line,
      column: 1,
      message: message.into(),
      suggestion: None
    }
  }

  pub(crate) fn with_suggestion(mut self, suggestion: impl Into<String>) -> Finding {
    self.suggestion = Some(suggestion.into());
    self
  }
}
