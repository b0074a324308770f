// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::util::split_shell_words;

/// A Dockerfile [`COPY` instruction][copy].
///
/// [copy]: https://docs.docker.com/engine/reference/builder/#copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyInstruction {
  pub sources: Vec<String>,
  pub dest: String,
  pub from: Option<String>,
  pub chown: Option<String>
}

pub(crate) fn parse(operand: &str) -> std::result::Result<CopyInstruction, String> {
  let words = split_shell_words(operand);
  let mut from = None;
  let mut chown = None;
  let mut idx = 0;

  while let Some(word) = words.get(idx) {
    if let Some(flag) = word.strip_prefix("--") {
      if let Some((key, value)) = flag.split_once('=') {
        match key {
          "from" => from = Some(value.to_string()),
          "chown" => chown = Some(value.to_string()),
          _ => {} // other --key=value flags are silently tolerated
        }
        idx += 1;
        continue;
      }
    }
    break;
  }

  let rest = &words[idx..];
  if rest.len() < 2 {
    return Err("COPY requires at least one source and a destination".to_string());
  }

  let dest = rest.last().unwrap().clone();
  let sources = rest[..rest.len() - 1].to_vec();

  Ok(CopyInstruction { sources, dest, from, chown })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn basic() {
    let c = parse("foo bar").unwrap();
    assert_eq!(c, CopyInstruction {
      sources: vec!["foo".into()], dest: "bar".into(), from: None, chown: None
    });
  }

  #[test]
  fn multiple_sources() {
    let c = parse("foo bar baz qux").unwrap();
    assert_eq!(c.sources, vec!["foo", "bar", "baz"]);
    assert_eq!(c.dest, "qux");
  }

  #[test]
  fn flags() {
    let c = parse("--from=builder --chown=1000:1000 /a /b").unwrap();
    assert_eq!(c.from, Some("builder".into()));
    assert_eq!(c.chown, Some("1000:1000".into()));
    assert_eq!(c.sources, vec!["/a"]);
    assert_eq!(c.dest, "/b");
  }

  #[test]
  fn unknown_flags_are_tolerated() {
    let c = parse("--link=true /a /b").unwrap();
    assert_eq!(c.sources, vec!["/a"]);
    assert_eq!(c.dest, "/b");
  }

  #[test]
  fn too_few_words_is_an_error() {
    assert!(parse("onlyone").is_err());
    assert!(parse("").is_err());
  }
}
