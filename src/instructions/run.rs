// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::util::{looks_bracketed, parse_string_array};

/// A Dockerfile [`RUN` instruction][run].
///
/// Shell form stores the raw shell text as the sole element of `command`;
/// exec form stores the parsed argument vector (see SPEC_FULL.md §B for why
/// `command` is shaped this way in both forms).
///
/// [run]: https://docs.docker.com/engine/reference/builder/#run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInstruction {
  pub command: Vec<String>,
  pub shell_form: bool
}

impl RunInstruction {
  /// The command as a single string, for rules that pattern-match against
  /// the whole thing regardless of shell/exec form.
  pub fn shell_text(&self) -> String {
    if self.shell_form {
      self.command.get(0).cloned().unwrap_or_default()
    } else {
      self.command.join(" ")
    }
  }
}

pub(crate) fn parse(operand: &str) -> std::result::Result<RunInstruction, String> {
  let trimmed = operand.trim();

  if trimmed.is_empty() {
    return Ok(RunInstruction { command: Vec::new(), shell_form: true });
  }

  if looks_bracketed(trimmed) {
    Ok(RunInstruction { command: parse_string_array(trimmed), shell_form: false })
  } else {
    Ok(RunInstruction { command: vec![trimmed.to_string()], shell_form: true })
  }
}
