// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! Rule evaluation (§4.3): runs every registered rule over a tree, applies
//! the global and inline ignore sets, and returns a deterministically
//! sorted finding list.

use std::collections::HashSet;

use crate::dockerfile::Dockerfile;
use crate::rules::finding::Finding;
use crate::rules::registry::REGISTRY;

/// Evaluates every registered rule against `dockerfile`, skipping any rule
/// id present in `ignored` and any finding suppressed by a matching inline
/// ignore directive, then returns the findings sorted by `(line, rule_id)`.
pub fn analyze(dockerfile: &Dockerfile, ignored: &HashSet<String>) -> Vec<Finding> {
  let mut findings = Vec::new();

  for (id, descriptor) in REGISTRY.iter() {
    if ignored.contains(*id) {
      continue;
    }

    for finding in (descriptor.check)(dockerfile) {
      let suppressed = dockerfile.inline_ignores
        .get(&finding.line)
        .map_or(false, |ids| ids.contains(&finding.rule_id));

      if !suppressed {
        findings.push(finding);
      }
    }
  }

  findings.sort_by(|a, b| (a.line, &a.rule_id).cmp(&(b.line, &b.rule_id)));
  findings
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn global_ignore_suppresses_a_rule_entirely() {
    let (df, _) = Dockerfile::parse("FROM ubuntu\n");
    let mut ignored = HashSet::new();
    ignored.insert("DL3006".to_string());
    ignored.insert("DL3007".to_string());
    ignored.insert("DL3008".to_string());
    ignored.insert("DL5000".to_string());
    ignored.insert("DL4002".to_string());

    let findings = analyze(&df, &ignored);
    assert!(findings.is_empty());
  }

  #[test]
  fn inline_ignore_suppresses_a_single_line() {
    let (df, _) = Dockerfile::parse(
      "# docker-lint ignore: DL3006,DL3007,DL3008\nFROM ubuntu\n"
    );
    let ignored = HashSet::new();
    let findings = analyze(&df, &ignored);
    assert!(!findings.iter().any(|f| f.rule_id == "DL3006"));
    assert!(!findings.iter().any(|f| f.rule_id == "DL3007"));
  }

  #[test]
  fn findings_are_sorted_by_line_then_rule_id() {
    let (df, _) = Dockerfile::parse("FROM ubuntu\nWORKDIR rel\n");
    let findings = analyze(&df, &HashSet::new());

    for pair in findings.windows(2) {
      let a = &pair[0];
      let b = &pair[1];
      assert!((a.line, &a.rule_id) <= (b.line, &b.rule_id));
    }
  }
}
