// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! The lexical layer: folds line continuations into logical lines and slices
//! each one into a small run of [`Token`]s.
//!
//! Per §4.1 of the design, the tokenizer is infallible at this level —
//! anything it can't make sense of becomes an `Argument` rather than a hard
//! failure. It's also fully buffered (§5): there's no incremental I/O here,
//! so `Tokenizer` just builds the whole token list up front and hands out a
//! peekable cursor over it.

use std::collections::HashMap;

/// The closed set of recognized instruction keywords (plus `MAINTAINER`,
/// which the parser folds into a `LABEL`).
pub(crate) const INSTRUCTION_KEYWORDS: &[&str] = &[
  "FROM", "RUN", "COPY", "ADD", "ENV", "ARG", "EXPOSE", "WORKDIR", "USER",
  "LABEL", "VOLUME", "CMD", "ENTRYPOINT", "HEALTHCHECK", "SHELL",
  "STOPSIGNAL", "ONBUILD", "MAINTAINER"
];

fn is_instruction_keyword(word: &str) -> bool {
  INSTRUCTION_KEYWORDS.iter().any(|k| *k == word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Instruction,
  Argument,
  Comment,
  Newline,
  End,
  /// Never constructed by this tokenizer (see SPEC_FULL.md §B) — tokenizer
  /// anomalies are absorbed into `Argument` instead. Kept in the closed set
  /// so a `match` on `TokenKind` stays exhaustive if a future caller-driven
  /// anomaly class needs it.
  Error
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
  pub line: usize,
  pub column: usize
}

impl Token {
  fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Token {
    Token { kind, text: text.into(), line, column }
  }
}

/// Folds a raw source string into logical lines, joining any physical line
/// whose last byte is `\` with the line that follows it (separated by a
/// single space, per §4.1). The reported line number is that of the first
/// physical line in the fold.
fn fold_logical_lines(input: &str) -> Vec<(usize, String)> {
  let mut folded = Vec::new();
  let mut lines = input.lines().enumerate();

  while let Some((idx, first)) = lines.next() {
    let start_line = idx + 1;
    let mut text = String::new();
    let mut current = first;

    loop {
      if let Some(stripped) = current.strip_suffix('\\') {
        text.push_str(stripped);
        text.push(' ');

        match lines.next() {
          Some((_, next)) => {
            current = next;
            continue;
          },
          None => break
        }
      } else {
        text.push_str(current);
        break;
      }
    }

    folded.push((start_line, text));
  }

  folded
}

/// Normalizes a tokenizer argument: interprets `\n \t \" \' \\ \ ` outside
/// single quotes (any other `\X` preserves the backslash), tracks quote
/// state to find an unquoted `#` that ends the argument, and trims trailing
/// whitespace. Quote characters themselves are preserved in the output so
/// downstream per-instruction splitters can re-examine them.
pub(crate) fn normalize_argument(s: &str) -> String {
  let mut out = String::new();
  let mut quote: Option<char> = None;
  let mut chars = s.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '\\' if quote != Some('\'') => {
        match chars.peek().copied() {
          Some('n') => { out.push('\n'); chars.next(); },
          Some('t') => { out.push('\t'); chars.next(); },
          Some('"') => { out.push('"'); chars.next(); },
          Some('\'') => { out.push('\''); chars.next(); },
          Some('\\') => { out.push('\\'); chars.next(); },
          Some(' ') => { out.push(' '); chars.next(); },
          _ => out.push('\\')
        }
      },
      '"' if quote.is_none() => { quote = Some('"'); out.push('"'); },
      '"' if quote == Some('"') => { quote = None; out.push('"'); },
      '\'' if quote.is_none() => { quote = Some('\''); out.push('\''); },
      '\'' if quote == Some('\'') => { quote = None; out.push('\''); },
      '#' if quote.is_none() => break,
      _ => out.push(c)
    }
  }

  out.trim_end().to_string()
}

fn tokenize_logical_line(line: usize, text: &str) -> Vec<Token> {
  let mut tokens = Vec::new();

  let trimmed = text.trim_start_matches(|c: char| c == ' ' || c == '\t');
  let leading_ws = text.len() - trimmed.len();

  if trimmed.starts_with('#') {
    tokens.push(Token::new(TokenKind::Comment, trimmed, line, leading_ws + 1));
    tokens.push(Token::new(TokenKind::Newline, "", line, text.len() + 1));
    return tokens;
  }

  let word_end = trimmed
    .char_indices()
    .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
    .last()
    .map(|(i, c)| i + c.len_utf8())
    .unwrap_or(0);

  let word = &trimmed[..word_end];
  let upper = word.to_ascii_uppercase();

  if !word.is_empty() && is_instruction_keyword(&upper) {
    tokens.push(Token::new(TokenKind::Instruction, upper, line, leading_ws + 1));

    let rest = &trimmed[word_end..];
    let rest_trimmed = rest.trim_start_matches(|c: char| c == ' ' || c == '\t');
    let arg_ws = rest.len() - rest_trimmed.len();
    let arg_column = leading_ws + word_end + arg_ws + 1;

    if !rest_trimmed.is_empty() {
      let arg_text = normalize_argument(rest_trimmed);
      if !arg_text.is_empty() {
        tokens.push(Token::new(TokenKind::Argument, arg_text, line, arg_column));
      }
    }
  } else {
    let arg_text = normalize_argument(trimmed);
    if !arg_text.is_empty() {
      tokens.push(Token::new(TokenKind::Argument, arg_text, line, leading_ws + 1));
    }
  }

  tokens.push(Token::new(TokenKind::Newline, "", line, text.len() + 1));
  tokens
}

/// A restartable, peekable stream of [`Token`]s over a whole Dockerfile.
///
/// The underlying token list is built eagerly from the fully-buffered input
/// (§5); `peek`/`next` are just a cursor over it, which is what gives the
/// one-token lookahead described in §4.1.
pub struct Tokenizer {
  tokens: Vec<Token>,
  pos: usize,
  raw_lines: HashMap<usize, String>
}

impl Tokenizer {
  pub fn new(input: &str) -> Tokenizer {
    let logical_lines = fold_logical_lines(input);

    let mut tokens = Vec::new();
    let mut raw_lines = HashMap::new();

    for (line, text) in &logical_lines {
      raw_lines.insert(*line, text.trim_end().to_string());
      tokens.extend(tokenize_logical_line(*line, text));
    }

    let end_line = logical_lines.last().map(|(l, _)| *l + 1).unwrap_or(1);
    tokens.push(Token::new(TokenKind::End, "", end_line, 1));

    Tokenizer { tokens, pos: 0, raw_lines }
  }

  /// Returns the token at the cursor without consuming it.
  pub fn peek(&self) -> &Token {
    &self.tokens[self.pos]
  }

  /// Consumes and returns the token at the cursor, advancing unless already
  /// at `End`.
  pub fn next(&mut self) -> Token {
    let token = self.tokens[self.pos].clone();
    if self.pos + 1 < self.tokens.len() {
      self.pos += 1;
    }
    token
  }

  /// The original (pre-escape-normalization) text of the logical line
  /// starting at `line`, trimmed of trailing whitespace. Used by the parser
  /// to populate `Instruction::raw`.
  pub(crate) fn raw_line(&self, line: usize) -> Option<&str> {
    self.raw_lines.get(&line).map(|s| s.as_str())
  }

  /// The first source line after `after` that isn't blank, per §6's inline
  /// ignore directive ("applies to the next non-blank source line"). Falls
  /// back to `after + 1` once the known logical lines run out, so a
  /// directive on the last line of the file still resolves to *some* line
  /// (one with nothing on it, so it simply never matches a finding).
  pub(crate) fn next_non_blank_line(&self, after: usize) -> usize {
    let mut candidate = after + 1;

    while let Some(text) = self.raw_lines.get(&candidate) {
      if !text.trim().is_empty() {
        return candidate;
      }
      candidate += 1;
    }

    candidate
  }
}
