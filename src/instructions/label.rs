// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::util::{find_unquoted_eq, split_shell_words, split_top_level_words};

/// A Dockerfile [`LABEL` instruction][label].
///
/// A single `LABEL` instruction may set many labels; stored as an ordered
/// sequence of pairs (a mapping per §3, but order is preserved since it's
/// free and matches source order for findings/formatting).
///
/// [label]: https://docs.docker.com/engine/reference/builder/#label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInstruction(pub Vec<(String, String)>);

/// Strips and unescapes a `"`/`'`-quoted label field. Falls back to the
/// unquoted-word splitter for anything `enquote` can't make sense of
/// (unbalanced quotes, stray backslashes) rather than erroring — LABEL
/// parsing never rejects on a malformed quote, per the tokenizer's own
/// "preserve verbatim" contract for interior argument text.
fn unquote(s: &str) -> String {
  let is_quoted = s.len() >= 2
    && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));

  if is_quoted {
    if let Ok(unescaped) = enquote::unquote(s) {
      return unescaped;
    }
  }

  split_shell_words(s).into_iter().next().unwrap_or_default()
}

pub(crate) fn parse(operand: &str) -> std::result::Result<LabelInstruction, String> {
  let raw_words = split_top_level_words(operand);
  let mut pairs = Vec::new();

  for raw in &raw_words {
    match find_unquoted_eq(raw) {
      Some(i) => pairs.push((unquote(&raw[..i]), unquote(&raw[i + 1..]))),
      None => return Err(format!("label pair '{}' is missing a value", raw))
    }
  }

  if pairs.is_empty() {
    return Err("LABEL requires at least one key=value pair".to_string());
  }

  Ok(LabelInstruction(pairs))
}
