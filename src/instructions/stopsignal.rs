// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

/// A Dockerfile [`STOPSIGNAL` instruction][stopsignal].
///
/// [stopsignal]: https://docs.docker.com/engine/reference/builder/#stopsignal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopsignalInstruction {
  pub signal: String
}

pub(crate) fn parse(operand: &str) -> std::result::Result<StopsignalInstruction, String> {
  let trimmed = operand.trim();

  if trimmed.is_empty() {
    return Err("STOPSIGNAL requires a signal".to_string());
  }

  Ok(StopsignalInstruction { signal: trimmed.to_string() })
}
