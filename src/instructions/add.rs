// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::util::split_shell_words;

/// A Dockerfile [`ADD` instruction][add].
///
/// Structurally identical to [`crate::CopyInstruction`] minus `--from`
/// (`ADD` can't copy from another build stage).
///
/// [add]: https://docs.docker.com/engine/reference/builder/#add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddInstruction {
  pub sources: Vec<String>,
  pub dest: String,
  pub chown: Option<String>
}

pub(crate) fn parse(operand: &str) -> std::result::Result<AddInstruction, String> {
  let words = split_shell_words(operand);
  let mut chown = None;
  let mut idx = 0;

  while let Some(word) = words.get(idx) {
    if let Some(flag) = word.strip_prefix("--") {
      if let Some((key, value)) = flag.split_once('=') {
        if key == "chown" {
          chown = Some(value.to_string());
        }
        idx += 1;
        continue;
      }
    }
    break;
  }

  let rest = &words[idx..];
  if rest.len() < 2 {
    return Err("ADD requires at least one source and a destination".to_string());
  }

  let dest = rest.last().unwrap().clone();
  let sources = rest[..rest.len() - 1].to_vec();

  Ok(AddInstruction { sources, dest, chown })
}
