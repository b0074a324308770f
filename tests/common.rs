// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::collections::HashSet;

use dockerfile_lint::Finding;

pub fn ignore_set(ids: &[&str]) -> HashSet<String> {
  ids.iter().map(|s| s.to_string()).collect()
}

pub fn rule_ids(findings: &[Finding]) -> Vec<&str> {
  findings.iter().map(|f| f.rule_id.as_str()).collect()
}
