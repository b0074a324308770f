// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

/// A Dockerfile [`WORKDIR` instruction][workdir].
///
/// [workdir]: https://docs.docker.com/engine/reference/builder/#workdir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkdirInstruction {
  pub path: String
}

pub(crate) fn parse(operand: &str) -> std::result::Result<WorkdirInstruction, String> {
  let trimmed = operand.trim();

  if trimmed.is_empty() {
    return Err("WORKDIR requires a path".to_string());
  }

  Ok(WorkdirInstruction { path: trimmed.to_string() })
}
