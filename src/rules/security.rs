// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! Rules about secret exposure and fetching untrusted content: secret-shaped
//! `ENV`/`ARG` names, remote `ADD` sources, non-archive `ADD` sources, and
//! glob sources that silently expand at build time.

use lazy_static::lazy_static;
use regex::Regex;

use crate::dockerfile::{Dockerfile, InstructionKind};
use crate::rules::finding::{Finding, Severity};

lazy_static! {
  /// Key-name fragments that suggest the value is a secret. Matched
  /// case-insensitively against the whole key, never against its value —
  /// findings for DL4000/DL4001 must never repeat the value back.
  static ref SECRET_KEY: Regex = Regex::new(
    r"(?i)password|passwd|secret|token|api[_-]?key|apikey|private[_-]?key|privatekey|access[_-]?key|accesskey|auth[_-]?token|credentials?|ssh[_-]?key|encryption[_-]?key"
  ).unwrap();

  static ref URL_SOURCE: Regex = Regex::new(r"(?i)^https?://").unwrap();
}

const ARCHIVE_EXTENSIONS: &[&str] = &[
  ".tar", ".tar.gz", ".tgz", ".tar.bz2", ".tbz2", ".tar.xz", ".txz",
  ".zip", ".gz", ".bz2", ".xz"
];

/// DL4000: an `ENV` key that looks like it holds a secret.
pub(crate) fn dl4000(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::Env(e) if SECRET_KEY.is_match(&e.key) => {
        Some(Finding::new(
          "DL4000",
          Severity::Warning,
          ins.line,
          format!("ENV key '{}' looks like a secret; it is baked into every image layer", e.key)
        ))
      },
      _ => None
    })
    .collect()
}

/// DL4001: same, for `ARG`. `ARG` values don't persist into the final image
/// the way `ENV` does, but they are visible in `docker history` and to
/// anyone who can read the build context, so the same name heuristic
/// applies.
pub(crate) fn dl4001(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::Arg(a) if SECRET_KEY.is_match(&a.name) => {
        Some(Finding::new(
          "DL4001",
          Severity::Warning,
          ins.line,
          format!("ARG name '{}' looks like a secret; it is visible in build history", a.name)
        ))
      },
      _ => None
    })
    .collect()
}

/// DL4003: an `ADD` fetching directly from a remote URL, bypassing any
/// integrity check a dedicated `RUN curl`/`RUN wget` step could apply.
pub(crate) fn dl4003(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::Add(a) if a.sources.iter().any(|s| URL_SOURCE.is_match(s)) => {
        Some(Finding::new(
          "DL4003",
          Severity::Warning,
          ins.line,
          "ADD fetches from a remote URL; prefer RUN with an explicit checksum check"
        ))
      },
      _ => None
    })
    .collect()
}

fn looks_like_archive(source: &str) -> bool {
  let lower = source.to_ascii_lowercase();
  ARCHIVE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// DL4004: an `ADD` whose source is neither a URL (DL4003 already covers
/// that case) nor a recognized archive — `ADD`'s only advantage over
/// `COPY` is transparent archive extraction and URL fetching, so anything
/// else should just be `COPY`.
pub(crate) fn dl4004(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::Add(a)
        if !a.sources.iter().any(|s| URL_SOURCE.is_match(s) || looks_like_archive(s)) =>
      {
        Some(Finding::new(
          "DL4004",
          Severity::Warning,
          ins.line,
          "ADD used for a plain file or directory; COPY is more explicit"
        ))
      },
      _ => None
    })
    .collect()
}

fn basename(path: &str) -> &str {
  path.rsplit('/').next().unwrap_or(path)
}

fn has_glob_chars(path: &str) -> bool {
  basename(path).chars().any(|c| c == '*' || c == '?' || c == '[')
}

/// DL5001: a `COPY` (without `--from`) or `ADD` whose source basename
/// contains a shell glob character — the expansion is implicit and easy
/// to get wrong across Docker versions.
pub(crate) fn dl5001(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::Copy(c) if c.from.is_none() && c.sources.iter().any(|s| has_glob_chars(s)) => {
        Some(Finding::new(
          "DL5001",
          Severity::Info,
          ins.line,
          "COPY source contains a glob pattern; list files explicitly where practical"
        ))
      },
      InstructionKind::Add(a) if a.sources.iter().any(|s| has_glob_chars(s)) => {
        Some(Finding::new(
          "DL5001",
          Severity::Info,
          ins.line,
          "ADD source contains a glob pattern; list files explicitly where practical"
        ))
      },
      _ => None
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dl4000_flags_secret_looking_env_key() {
    let (df, _) = Dockerfile::parse("FROM alpine\nENV DB_PASSWORD=hunter2\n");
    let findings = dl4000(&df);
    assert_eq!(findings.len(), 1);
    assert!(!findings[0].message.contains("hunter2"));
  }

  #[test]
  fn dl4000_allows_ordinary_env_key() {
    let (df, _) = Dockerfile::parse("FROM alpine\nENV PORT=8080\n");
    assert!(dl4000(&df).is_empty());
  }

  #[test]
  fn dl4001_flags_secret_looking_arg_name() {
    let (df, _) = Dockerfile::parse("FROM alpine\nARG API_KEY=abc123\n");
    let findings = dl4001(&df);
    assert_eq!(findings.len(), 1);
    assert!(!findings[0].message.contains("abc123"));
  }

  #[test]
  fn dl4001_allows_ordinary_arg_name() {
    let (df, _) = Dockerfile::parse("FROM alpine\nARG VERSION=1.0\n");
    assert!(dl4001(&df).is_empty());
  }

  #[test]
  fn dl4003_flags_url_source() {
    let (df, _) = Dockerfile::parse("FROM alpine\nADD https://example.com/app.tar.gz /app/\n");
    assert_eq!(dl4003(&df).len(), 1);
  }

  #[test]
  fn dl4003_allows_local_archive() {
    let (df, _) = Dockerfile::parse("FROM alpine\nADD app.tar.gz /app/\n");
    assert!(dl4003(&df).is_empty());
  }

  #[test]
  fn dl4004_flags_non_archive_source() {
    let (df, _) = Dockerfile::parse("FROM alpine\nADD config.yaml /etc/config.yaml\n");
    assert_eq!(dl4004(&df).len(), 1);
  }

  #[test]
  fn dl4004_allows_archive_source() {
    let (df, _) = Dockerfile::parse("FROM alpine\nADD app.tar.gz /app/\n");
    assert!(dl4004(&df).is_empty());
  }

  #[test]
  fn dl4004_allows_url_source() {
    let (df, _) = Dockerfile::parse("FROM alpine\nADD https://example.com/file /dest\n");
    assert!(dl4004(&df).is_empty());
  }

  #[test]
  fn dl5001_flags_glob_in_copy_source() {
    let (df, _) = Dockerfile::parse("FROM alpine\nCOPY *.txt /app/\n");
    assert_eq!(dl5001(&df).len(), 1);
  }

  #[test]
  fn dl5001_ignores_copy_from_another_stage() {
    let (df, _) = Dockerfile::parse("FROM alpine\nCOPY --from=builder *.txt /app/\n");
    assert!(dl5001(&df).is_empty());
  }

  #[test]
  fn dl5001_flags_glob_in_add_source() {
    let (df, _) = Dockerfile::parse("FROM alpine\nADD file?.tar.gz /app/\n");
    assert_eq!(dl5001(&df).len(), 1);
  }
}
