// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

use crate::util::{looks_bracketed, parse_string_array};

/// A Dockerfile [`CMD` instruction][cmd].
///
/// [cmd]: https://docs.docker.com/engine/reference/builder/#cmd
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdInstruction {
  pub command: Vec<String>,
  pub shell_form: bool
}

pub(crate) fn parse(operand: &str) -> std::result::Result<CmdInstruction, String> {
  let trimmed = operand.trim();

  if looks_bracketed(trimmed) {
    Ok(CmdInstruction { command: parse_string_array(trimmed), shell_form: false })
  } else {
    Ok(CmdInstruction { command: vec![trimmed.to_string()], shell_form: true })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shell_form() {
    let c = parse(r#"echo "hello world""#).unwrap();
    assert!(c.shell_form);
    assert_eq!(c.command, vec![r#"echo "hello world""#]);
  }

  #[test]
  fn exec_form() {
    let c = parse(r#"["echo", "hello world"]"#).unwrap();
    assert!(!c.shell_form);
    assert_eq!(c.command, vec!["echo", "hello world"]);
  }
}
