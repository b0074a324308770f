// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

/// A Dockerfile [`ENV` instruction][env].
///
/// Both the legacy `ENV key value` form and the `ENV key=value` form
/// collapse to a single key/value pair (see SPEC_FULL.md §B).
///
/// [env]: https://docs.docker.com/engine/reference/builder/#env
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvInstruction {
  pub key: String,
  pub value: String
}

pub(crate) fn parse(operand: &str) -> std::result::Result<EnvInstruction, String> {
  let trimmed = operand.trim();

  if trimmed.is_empty() {
    return Err("ENV requires a key".to_string());
  }

  if let Some((key, value)) = trimmed.split_once('=') {
    if key.is_empty() {
      return Err("ENV requires a key".to_string());
    }
    return Ok(EnvInstruction { key: key.to_string(), value: value.to_string() });
  }

  let mut parts = trimmed.splitn(2, char::is_whitespace);
  let key = parts.next().unwrap_or("").to_string();
  let value = parts.next().unwrap_or("").trim_start().to_string();

  Ok(EnvInstruction { key, value })
}
