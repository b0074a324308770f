// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! The process-wide rule registry (§4.3): a sorted-by-id table of rule
//! descriptors, built once and never mutated after.

use std::collections::BTreeMap;

use lazy_static::lazy_static;

use crate::dockerfile::Dockerfile;
use crate::error::Error;
use crate::rules::finding::Finding;
use crate::rules::{image, run, security, structure};

/// One entry in the rule registry: an identifier and the function that
/// evaluates it over a whole tree.
pub struct RuleDescriptor {
  pub id: &'static str,
  pub check: fn(&Dockerfile) -> Vec<Finding>
}

lazy_static! {
  /// Keyed by rule id; `BTreeMap` gives deterministic, sorted-by-id
  /// iteration for free, which is the basis for the engine's output order.
  pub(crate) static ref REGISTRY: BTreeMap<&'static str, RuleDescriptor> = {
    let rules: Vec<RuleDescriptor> = vec![
      RuleDescriptor { id: "DL3001", check: structure::dl3001 },
      RuleDescriptor { id: "DL3002", check: structure::dl3002 },
      RuleDescriptor { id: "DL3003", check: structure::dl3003 },
      RuleDescriptor { id: "DL3006", check: image::dl3006 },
      RuleDescriptor { id: "DL3007", check: image::dl3007 },
      RuleDescriptor { id: "DL3008", check: image::dl3008 },
      RuleDescriptor { id: "DL3009", check: run::dl3009 },
      RuleDescriptor { id: "DL3010", check: run::dl3010 },
      RuleDescriptor { id: "DL3011", check: run::dl3011 },
      RuleDescriptor { id: "DL3012", check: run::dl3012 },
      RuleDescriptor { id: "DL4000", check: security::dl4000 },
      RuleDescriptor { id: "DL4001", check: security::dl4001 },
      RuleDescriptor { id: "DL4002", check: structure::dl4002 },
      RuleDescriptor { id: "DL4003", check: security::dl4003 },
      RuleDescriptor { id: "DL4004", check: security::dl4004 },
      RuleDescriptor { id: "DL5000", check: structure::dl5000 },
      RuleDescriptor { id: "DL5001", check: security::dl5001 },
    ];

    rules.into_iter().map(|r| (r.id, r)).collect()
  };
}

/// Every registered rule id, in sorted order. Exposed for frontends that
/// need to validate `--ignore` arguments against a real rule id.
pub fn known_rule_ids() -> Vec<&'static str> {
  REGISTRY.keys().copied().collect()
}

/// Checks that every id in `ids` names a registered rule, for embedders
/// who want to reject a bad `--ignore` argument up front instead of
/// having `analyze` silently treat it as a no-op (per §4.3).
pub fn validate_ids(ids: &[String]) -> crate::error::Result<()> {
  for id in ids {
    if !REGISTRY.contains_key(id.as_str()) {
      return Err(Error::InvalidRuleId { id: id.clone() });
    }
  }

  Ok(())
}
