// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! Shared helpers used by the per-instruction parsers (§4.2): a second,
//! quote-aware word split over an already-normalized argument, and a
//! best-effort bracketed string-array parser for exec form.

/// Splits an already-tokenizer-normalized argument into whitespace-separated
/// shell words, honoring `"` and `'` quoting. Unlike the tokenizer's own
/// escape handling, here `\X` outside single quotes always collapses to `X`
/// (the backslash is dropped); inside single quotes, backslash is literal
/// and not interpreted at all. Quote characters themselves are consumed,
/// not included in the returned words.
pub(crate) fn split_shell_words(s: &str) -> Vec<String> {
  let mut words = Vec::new();
  let mut current = String::new();
  let mut has_content = false;
  let mut quote: Option<char> = None;
  let mut chars = s.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '\\' if quote != Some('\'') => {
        match chars.next() {
          Some(next) => { current.push(next); has_content = true; },
          None => current.push('\\')
        }
      },
      '"' if quote.is_none() => { quote = Some('"'); has_content = true; },
      '"' if quote == Some('"') => quote = None,
      '\'' if quote.is_none() => { quote = Some('\''); has_content = true; },
      '\'' if quote == Some('\'') => quote = None,
      c if c.is_whitespace() && quote.is_none() => {
        if has_content {
          words.push(std::mem::take(&mut current));
          has_content = false;
        }
      },
      c => { current.push(c); has_content = true; }
    }
  }

  if has_content {
    words.push(current);
  }

  words
}

/// Splits `s` into top-level whitespace-separated words, honoring `"`/`'`
/// quoting to decide what counts as "top-level" — but unlike
/// [`split_shell_words`], quote characters and backslashes are left in the
/// output untouched. Used where a caller needs to find a delimiter (e.g.
/// LABEL's `=`) that must itself respect quoting, which isn't possible once
/// [`split_shell_words`] has already thrown the quote positions away.
pub(crate) fn split_top_level_words(s: &str) -> Vec<String> {
  let mut words = Vec::new();
  let mut current = String::new();
  let mut has_content = false;
  let mut quote: Option<char> = None;
  let mut chars = s.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '\\' if quote != Some('\'') => {
        current.push('\\');
        has_content = true;
        if let Some(next) = chars.next() {
          current.push(next);
        }
      },
      '"' if quote.is_none() => { quote = Some('"'); current.push('"'); has_content = true; },
      '"' if quote == Some('"') => { quote = None; current.push('"'); },
      '\'' if quote.is_none() => { quote = Some('\''); current.push('\''); has_content = true; },
      '\'' if quote == Some('\'') => { quote = None; current.push('\''); },
      c if c.is_whitespace() && quote.is_none() => {
        if has_content {
          words.push(std::mem::take(&mut current));
          has_content = false;
        }
      },
      c => { current.push(c); has_content = true; }
    }
  }

  if has_content {
    words.push(current);
  }

  words
}

/// Finds the byte offset of the first `=` in `s` that falls outside any
/// `"`/`'` quoted region, the way LABEL's `key=value` separator must be
/// located before the quotes around an embedded `=` (e.g. `"a=b"=c`) are
/// stripped.
pub(crate) fn find_unquoted_eq(s: &str) -> Option<usize> {
  let mut quote: Option<char> = None;
  let mut chars = s.char_indices().peekable();

  while let Some((i, c)) = chars.next() {
    match c {
      '\\' if quote != Some('\'') => { chars.next(); },
      '"' if quote.is_none() => quote = Some('"'),
      '"' if quote == Some('"') => quote = None,
      '\'' if quote.is_none() => quote = Some('\''),
      '\'' if quote == Some('\'') => quote = None,
      '=' if quote.is_none() => return Some(i),
      _ => {}
    }
  }

  None
}

/// True if the trimmed text looks like a JSON/bracketed string array, e.g.
/// `["a", "b"]`.
pub(crate) fn looks_bracketed(s: &str) -> bool {
  let t = s.trim();
  t.starts_with('[') && t.ends_with(']')
}

/// Parses a bracketed region as a JSON array of strings. Falls back to a
/// best-effort comma split with quote trimming on malformed input (§4.2,
/// §7) rather than failing — exec-form arrays are never rejected outright.
pub(crate) fn parse_string_array(s: &str) -> Vec<String> {
  let inner = s.trim();
  let inner = inner
    .strip_prefix('[')
    .and_then(|s| s.strip_suffix(']'))
    .unwrap_or(inner);

  if inner.trim().is_empty() {
    return Vec::new();
  }

  if let Ok(parsed) = parse_json_string_array(inner) {
    return parsed;
  }

  inner
    .split(',')
    .map(|part| {
      let t = part.trim();
      let t = t.strip_prefix('"').unwrap_or(t);
      let t = t.strip_suffix('"').unwrap_or(t);
      let t = t.strip_prefix('\'').unwrap_or(t);
      let t = t.strip_suffix('\'').unwrap_or(t);
      t.to_string()
    })
    .collect()
}

/// A small, deliberately forgiving JSON-string-array tokenizer: just enough
/// to split `"a", "b", "c"` (the interior of a bracketed exec form) into
/// unescaped strings. Returns `Err(())` on anything it can't make sense of,
/// which callers treat as a signal to fall back to the comma split above.
fn parse_json_string_array(inner: &str) -> std::result::Result<Vec<String>, ()> {
  let mut out = Vec::new();
  let mut chars = inner.chars().peekable();

  loop {
    while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
      chars.next();
    }

    match chars.peek() {
      None => break,
      Some('"') => {
        chars.next();
        let mut value = String::new();
        loop {
          match chars.next() {
            Some('"') => break,
            Some('\\') => match chars.next() {
              Some('n') => value.push('\n'),
              Some('t') => value.push('\t'),
              Some('"') => value.push('"'),
              Some('\\') => value.push('\\'),
              Some('/') => value.push('/'),
              Some(other) => value.push(other),
              None => return Err(())
            },
            Some(c) => value.push(c),
            None => return Err(())
          }
        }
        out.push(value);
      },
      Some(_) => return Err(())
    }

    while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
      chars.next();
    }

    match chars.next() {
      Some(',') => continue,
      None => break,
      Some(_) => return Err(())
    }
  }

  Ok(out)
}
