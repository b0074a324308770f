// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! Rules about the shape of a stage: duplicate terminal instructions,
//! non-absolute `WORKDIR`s, and the presence of `USER`/`HEALTHCHECK`.

use crate::dockerfile::{Dockerfile, InstructionKind};
use crate::rules::finding::{Finding, Severity};

/// DL3001: a stage with more than one `CMD` — only the last one takes
/// effect, so every earlier one is reported.
pub(crate) fn dl3001(dockerfile: &Dockerfile) -> Vec<Finding> {
  let mut findings = Vec::new();

  for stage in &dockerfile.stages {
    let cmd_lines: Vec<usize> = dockerfile.stage_instructions(stage)
      .iter()
      .filter(|ins| matches!(ins.kind, InstructionKind::Cmd(_)))
      .map(|ins| ins.line)
      .collect();

    for &line in &cmd_lines[..cmd_lines.len().saturating_sub(1)] {
      findings.push(Finding::new(
        "DL3001",
        Severity::Warning,
        line,
        "multiple CMD instructions in this stage; only the last one takes effect"
      ));
    }
  }

  findings
}

/// DL3002: same, for `ENTRYPOINT`.
pub(crate) fn dl3002(dockerfile: &Dockerfile) -> Vec<Finding> {
  let mut findings = Vec::new();

  for stage in &dockerfile.stages {
    let entrypoint_lines: Vec<usize> = dockerfile.stage_instructions(stage)
      .iter()
      .filter(|ins| matches!(ins.kind, InstructionKind::Entrypoint(_)))
      .map(|ins| ins.line)
      .collect();

    for &line in &entrypoint_lines[..entrypoint_lines.len().saturating_sub(1)] {
      findings.push(Finding::new(
        "DL3002",
        Severity::Warning,
        line,
        "multiple ENTRYPOINT instructions in this stage; only the last one takes effect"
      ));
    }
  }

  findings
}

fn is_absolute_workdir(path: &str) -> bool {
  if path.starts_with('/') || path.starts_with('$') {
    return true;
  }

  let mut chars = path.chars();
  match (chars.next(), chars.next()) {
    (Some(drive), Some(':')) => drive.is_ascii_alphabetic(),
    _ => false
  }
}

/// DL3003: a non-empty `WORKDIR` that isn't an absolute path, a drive
/// letter, or a build-arg reference.
pub(crate) fn dl3003(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::Workdir(w) if !w.path.is_empty() && !is_absolute_workdir(&w.path) => {
        Some(Finding::new(
          "DL3003",
          Severity::Warning,
          ins.line,
          format!("WORKDIR '{}' is not an absolute path", w.path)
        ))
      },
      _ => None
    })
    .collect()
}

/// DL4002: a stage with no `USER` instruction anywhere in it.
pub(crate) fn dl4002(dockerfile: &Dockerfile) -> Vec<Finding> {
  let mut findings = Vec::new();

  for stage in &dockerfile.stages {
    let instructions = dockerfile.stage_instructions(stage);
    let has_user = instructions.iter().any(|ins| matches!(ins.kind, InstructionKind::User(_)));

    if !has_user {
      let line = instructions.last().map(|ins| ins.line).unwrap_or(stage.from_line);
      findings.push(Finding::new(
        "DL4002",
        Severity::Warning,
        line,
        "stage has no USER instruction; it will run as root"
      ));
    }
  }

  findings
}

/// DL5000: no `HEALTHCHECK` instruction anywhere in the file.
pub(crate) fn dl5000(dockerfile: &Dockerfile) -> Vec<Finding> {
  let has_healthcheck = dockerfile.instructions
    .iter()
    .any(|ins| matches!(ins.kind, InstructionKind::Healthcheck(_)));

  if has_healthcheck {
    return Vec::new();
  }

  let line = match dockerfile.stages.last() {
    Some(stage) => {
      let instructions = dockerfile.stage_instructions(stage);
      instructions.last().map(|ins| ins.line).unwrap_or(stage.from_line)
    },
    // No FROM anywhere, but there may still be top-level instructions (e.g.
    // a bare ARG before any FROM) — report against the last of those rather
    // than dropping the finding. A genuinely empty file has no instructions
    // at all, so `last()` is `None` and no finding is produced (§7: empty
    // files produce an empty finding list).
    None => match dockerfile.instructions.last() {
      Some(ins) => ins.line,
      None => return Vec::new()
    }
  };

  vec![Finding::new(
    "DL5000",
    Severity::Warning,
    line,
    "no HEALTHCHECK instruction found"
  )]
}
