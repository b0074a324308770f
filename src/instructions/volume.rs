// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::util::{looks_bracketed, parse_string_array};

/// A Dockerfile [`VOLUME` instruction][volume].
///
/// [volume]: https://docs.docker.com/engine/reference/builder/#volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeInstruction {
  pub paths: Vec<String>
}

pub(crate) fn parse(operand: &str) -> std::result::Result<VolumeInstruction, String> {
  let trimmed = operand.trim();

  let paths = if looks_bracketed(trimmed) {
    parse_string_array(trimmed)
  } else {
    trimmed.split_whitespace().map(str::to_string).collect()
  };

  Ok(VolumeInstruction { paths })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn whitespace_split() {
    let v = parse("/data /logs").unwrap();
    assert_eq!(v.paths, vec!["/data", "/logs"]);
  }

  #[test]
  fn json_array() {
    let v = parse(r#"["/data", "/logs"]"#).unwrap();
    assert_eq!(v.paths, vec!["/data", "/logs"]);
  }

  #[test]
  fn single_path() {
    let v = parse("/data").unwrap();
    assert_eq!(v.paths, vec!["/data"]);
  }
}
