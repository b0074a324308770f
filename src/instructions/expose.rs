// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

/// A Dockerfile [`EXPOSE` instruction][expose].
///
/// [expose]: https://docs.docker.com/engine/reference/builder/#expose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposeInstruction {
  pub ports: Vec<String>
}

pub(crate) fn parse(operand: &str) -> std::result::Result<ExposeInstruction, String> {
  Ok(ExposeInstruction {
    ports: operand.split_whitespace().map(str::to_string).collect()
  })
}
