// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! Rules about `RUN` command hygiene and its interaction with `COPY`/`ADD`
//! placement: package-manager cache cleanup, redundant `RUN`s, cache
//! invalidation from copying application code before dependency manifests,
//! and stale package indexes.

use lazy_static::lazy_static;
use regex::Regex;

use crate::dockerfile::{Dockerfile, InstructionKind};
use crate::rules::finding::{Finding, Severity};

lazy_static! {
  static ref APT_INSTALL: Regex = Regex::new(r"(?i)\bapt-get\s+(install|upgrade)\b").unwrap();
  static ref APT_CLEAN: Regex =
    Regex::new(r"(?i)\bapt-get\s+clean\b|rm\s+-rf\s+/var/lib/apt/lists").unwrap();
  static ref APT_UPDATE: Regex = Regex::new(r"(?i)\bapt-get\s+update\b").unwrap();

  static ref YUM_DNF_INSTALL: Regex = Regex::new(r"(?i)\b(yum|dnf)\s+install\b").unwrap();
  static ref YUM_DNF_CLEAN: Regex = Regex::new(r"(?i)\b(yum|dnf)\s+clean\s+all\b").unwrap();
  static ref YUM_DNF_MAKECACHE: Regex = Regex::new(r"(?i)\b(yum|dnf)\s+makecache\b").unwrap();

  static ref APK_ADD: Regex = Regex::new(r"(?i)\bapk\s+(add|update)\b").unwrap();
  static ref APK_NO_CACHE: Regex =
    Regex::new(r"(?i)--no-cache\b|rm\s+-rf\s+/var/cache/apk").unwrap();

  static ref PIP_INSTALL: Regex = Regex::new(r"(?i)\bpip3?\s+install\b").unwrap();
  static ref PIP_NO_CACHE_DIR: Regex = Regex::new(r"(?i)--no-cache-dir\b").unwrap();
}

/// Known package-manifest basenames exempted from DL3011's cache-busting
/// check — copying just the manifest before installing, then the rest of
/// the source tree after, is the recommended pattern.
const PACKAGE_MANIFESTS: &[&str] = &[
  "requirements.txt", "package.json", "package-lock.json", "yarn.lock",
  "go.mod", "go.sum", "Gemfile", "Gemfile.lock", "Cargo.toml", "Cargo.lock",
  "pom.xml", "build.gradle", "composer.json", "composer.lock"
];

fn run_texts(dockerfile: &Dockerfile) -> Vec<(usize, String)> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::Run(r) => Some((ins.line, r.shell_text())),
      _ => None
    })
    .collect()
}

/// DL3009: a package-manager install without its corresponding cache
/// cleanup, within the same `RUN` command.
pub(crate) fn dl3009(dockerfile: &Dockerfile) -> Vec<Finding> {
  run_texts(dockerfile)
    .into_iter()
    .filter(|(_, text)| {
      (APT_INSTALL.is_match(text) && !APT_CLEAN.is_match(text))
        || (YUM_DNF_INSTALL.is_match(text) && !YUM_DNF_CLEAN.is_match(text))
        || (APK_ADD.is_match(text) && !APK_NO_CACHE.is_match(text))
        || (PIP_INSTALL.is_match(text) && !PIP_NO_CACHE_DIR.is_match(text))
    })
    .map(|(line, _)| Finding::new(
      "DL3009",
      Severity::Warning,
      line,
      "package install is not followed by a cache cleanup"
    ))
    .collect()
}

/// DL3010: a maximal run of two or more consecutive `RUN` instructions in
/// the flat instruction list. Implemented as the `Idle`/`Run(n, line)`
/// state machine from §4.3, flushing on any non-`RUN` instruction and at
/// end of input.
pub(crate) fn dl3010(dockerfile: &Dockerfile) -> Vec<Finding> {
  let mut findings = Vec::new();
  let mut run_count = 0usize;
  let mut first_line = 0usize;

  let mut flush = |count: usize, line: usize, findings: &mut Vec<Finding>| {
    if count >= 2 {
      findings.push(Finding::new(
        "DL3010",
        Severity::Warning,
        line,
        format!("{} consecutive RUN instructions could be combined into one", count)
      ));
    }
  };

  for ins in &dockerfile.instructions {
    if matches!(ins.kind, InstructionKind::Run(_)) {
      if run_count == 0 {
        first_line = ins.line;
      }
      run_count += 1;
    } else {
      flush(run_count, first_line, &mut findings);
      run_count = 0;
    }
  }

  flush(run_count, first_line, &mut findings);
  findings
}

fn is_install_run(text: &str) -> bool {
  APT_INSTALL.is_match(text)
    || YUM_DNF_INSTALL.is_match(text)
    || APK_ADD.is_match(text)
    || PIP_INSTALL.is_match(text)
}

fn dest_of(kind: &InstructionKind) -> Option<&str> {
  match kind {
    InstructionKind::Copy(c) => Some(&c.dest),
    InstructionKind::Add(a) => Some(&a.dest),
    _ => None
  }
}

fn is_manifest_basename(dest: &str) -> bool {
  let basename = dest.rsplit('/').next().unwrap_or(dest);
  PACKAGE_MANIFESTS.contains(&basename)
}

/// DL3011: a `COPY`/`ADD` of non-manifest files that happens before a
/// package-install `RUN` which is itself followed by another `COPY`/`ADD`
/// in the same stage — the classic Docker-layer-cache buster.
pub(crate) fn dl3011(dockerfile: &Dockerfile) -> Vec<Finding> {
  let mut flagged: Vec<usize> = Vec::new();

  for stage in &dockerfile.stages {
    let indices = &stage.instructions;

    for (pos, &global_idx) in indices.iter().enumerate() {
      let ins = &dockerfile.instructions[global_idx];

      let is_install = match &ins.kind {
        InstructionKind::Run(r) => is_install_run(&r.shell_text()),
        _ => false
      };

      if !is_install {
        continue;
      }

      let earlier: Vec<usize> = indices[..pos].iter()
        .copied()
        .filter(|&i| dest_of(&dockerfile.instructions[i].kind).is_some())
        .collect();
      let later_has_copy = indices[pos + 1..].iter()
        .any(|&i| dest_of(&dockerfile.instructions[i].kind).is_some());

      if earlier.is_empty() || !later_has_copy {
        continue;
      }

      for &i in &earlier {
        let dest = dest_of(&dockerfile.instructions[i].kind).unwrap();
        if !is_manifest_basename(dest) && !flagged.contains(&i) {
          flagged.push(i);
        }
      }
    }
  }

  flagged.sort_unstable();
  flagged.into_iter()
    .map(|i| Finding::new(
      "DL3011",
      Severity::Warning,
      dockerfile.instructions[i].line,
      "copying application source before installing dependencies busts the build cache"
    ))
    .collect()
}

/// DL3012: refreshing a package index without ever installing anything.
pub(crate) fn dl3012(dockerfile: &Dockerfile) -> Vec<Finding> {
  run_texts(dockerfile)
    .into_iter()
    .filter(|(_, text)| {
      (APT_UPDATE.is_match(text) && !APT_INSTALL.is_match(text))
        || (YUM_DNF_MAKECACHE.is_match(text) && !YUM_DNF_INSTALL.is_match(text))
    })
    .map(|(line, _)| Finding::new(
      "DL3012",
      Severity::Warning,
      line,
      "package index refreshed but nothing is installed in the same command"
    ))
    .collect()
}
