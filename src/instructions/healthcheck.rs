// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::util::{looks_bracketed, parse_string_array, split_shell_words};

/// A Dockerfile [`HEALTHCHECK` instruction][healthcheck].
///
/// [healthcheck]: https://docs.docker.com/engine/reference/builder/#healthcheck
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthcheckInstruction {
  pub none: bool,
  pub interval: Option<String>,
  pub timeout: Option<String>,
  pub retries: Option<String>,
  pub start_period: Option<String>,
  pub command: Vec<String>,
  pub shell_form: bool
}

pub(crate) fn parse(operand: &str) -> std::result::Result<HealthcheckInstruction, String> {
  let trimmed = operand.trim();

  if trimmed.eq_ignore_ascii_case("NONE") {
    return Ok(HealthcheckInstruction { none: true, ..Default::default() });
  }

  let words = split_shell_words(trimmed);
  let mut h = HealthcheckInstruction::default();
  let mut idx = 0;

  while let Some(word) = words.get(idx) {
    if word.eq_ignore_ascii_case("CMD") {
      idx += 1;
      break;
    }

    if let Some(flag) = word.strip_prefix("--") {
      if let Some((key, value)) = flag.split_once('=') {
        match key {
          "interval" => h.interval = Some(value.to_string()),
          "timeout" => h.timeout = Some(value.to_string()),
          "retries" => h.retries = Some(value.to_string()),
          "start-period" => h.start_period = Some(value.to_string()),
          _ => {}
        }
        idx += 1;
        continue;
      }
    }

    return Err(format!("unexpected word '{}' in HEALTHCHECK", word));
  }

  let rest = words[idx..].join(" ");

  if rest.trim().is_empty() {
    return Err("HEALTHCHECK requires CMD or NONE".to_string());
  }

  if looks_bracketed(rest.trim()) {
    h.command = parse_string_array(rest.trim());
    h.shell_form = false;
  } else {
    h.command = vec![rest];
    h.shell_form = true;
  }

  Ok(h)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn none() {
    let h = parse("NONE").unwrap();
    assert!(h.none);
  }

  #[test]
  fn none_case_insensitive() {
    let h = parse("none").unwrap();
    assert!(h.none);
  }

  #[test]
  fn cmd_shell_form() {
    let h = parse("CMD curl -f http://localhost/ || exit 1").unwrap();
    assert!(!h.none);
    assert!(h.shell_form);
    assert_eq!(h.command, vec!["curl -f http://localhost/ || exit 1"]);
  }

  #[test]
  fn cmd_exec_form() {
    let h = parse(r#"CMD ["curl", "-f", "http://localhost/"]"#).unwrap();
    assert!(!h.shell_form);
    assert_eq!(h.command, vec!["curl", "-f", "http://localhost/"]);
  }

  #[test]
  fn options_then_cmd() {
    let h = parse("--interval=30s --timeout=3s --retries=3 CMD true").unwrap();
    assert_eq!(h.interval, Some("30s".into()));
    assert_eq!(h.timeout, Some("3s".into()));
    assert_eq!(h.retries, Some("3".into()));
    assert_eq!(h.command, vec!["true"]);
  }

  #[test]
  fn missing_cmd_is_an_error() {
    assert!(parse("--interval=30s").is_err());
  }
}
