// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

use crate::util::{looks_bracketed, parse_string_array};

/// A Dockerfile [`ENTRYPOINT` instruction][entrypoint].
///
/// [entrypoint]: https://docs.docker.com/engine/reference/builder/#entrypoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrypointInstruction {
  pub command: Vec<String>,
  pub shell_form: bool
}

pub(crate) fn parse(operand: &str) -> std::result::Result<EntrypointInstruction, String> {
  let trimmed = operand.trim();

  if looks_bracketed(trimmed) {
    Ok(EntrypointInstruction { command: parse_string_array(trimmed), shell_form: false })
  } else {
    Ok(EntrypointInstruction { command: vec![trimmed.to_string()], shell_form: true })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shell_form() {
    let e = parse(r#"echo "hello world""#).unwrap();
    assert!(e.shell_form);
    assert_eq!(e.command, vec![r#"echo "hello world""#]);
  }

  #[test]
  fn exec_form() {
    let e = parse(r#"["echo", "hello world"]"#).unwrap();
    assert!(!e.shell_form);
    assert_eq!(e.command, vec!["echo", "hello world"]);
  }
}
