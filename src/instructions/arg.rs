// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

/// A Dockerfile [`ARG` instruction][arg].
///
/// [arg]: https://docs.docker.com/engine/reference/builder/#arg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgInstruction {
  pub name: String,
  pub default: Option<String>
}

pub(crate) fn parse(operand: &str) -> std::result::Result<ArgInstruction, String> {
  let trimmed = operand.trim();

  if trimmed.is_empty() {
    return Err("ARG requires a name".to_string());
  }

  match trimmed.split_once('=') {
    Some((name, default)) => Ok(ArgInstruction {
      name: name.to_string(),
      default: Some(default.to_string())
    }),
    None => Ok(ArgInstruction { name: trimmed.to_string(), default: None })
  }
}
