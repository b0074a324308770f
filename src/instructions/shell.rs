// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::util::{looks_bracketed, parse_string_array};

/// A Dockerfile [`SHELL` instruction][shell].
///
/// [shell]: https://docs.docker.com/engine/reference/builder/#shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInstruction {
  pub shell: Vec<String>
}

pub(crate) fn parse(operand: &str) -> std::result::Result<ShellInstruction, String> {
  let trimmed = operand.trim();

  let shell = if looks_bracketed(trimmed) {
    parse_string_array(trimmed)
  } else {
    trimmed.split_whitespace().map(str::to_string).collect()
  };

  Ok(ShellInstruction { shell })
}
