// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! Rules about the `FROM` image reference itself: missing/floating tags
//! and unnecessarily large base images.

use crate::dockerfile::{Dockerfile, InstructionKind};
use crate::image::bare_image_name;
use crate::rules::finding::{Finding, Severity};

/// Base images known to have much smaller variants (§4.3's closed set).
const LARGE_BASE_IMAGES: &[&str] = &[
  "ubuntu", "debian", "centos", "fedora", "amazonlinux", "oraclelinux",
  "python", "node", "ruby", "golang", "openjdk", "java", "php", "perl", "rust"
];

/// Tag substrings (case-insensitive) that indicate a deliberately small
/// variant of a base image, exempting it from DL3008.
const SMALL_VARIANT_MARKERS: &[&str] = &[
  "slim", "alpine", "minimal", "distroless", "scratch", "tiny", "micro"
];

/// DL3006: a `FROM` with no tag and no digest (excluding `scratch`).
pub(crate) fn dl3006(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::From(f)
        if f.tag.as_deref().unwrap_or("").is_empty()
          && f.digest.is_none()
          && !f.image.eq_ignore_ascii_case("scratch") =>
      {
        Some(Finding::new(
          "DL3006",
          Severity::Warning,
          ins.line,
          format!("image '{}' has no pinned tag or digest", f.image)
        ).with_suggestion(format!("pin a tag, e.g. FROM {}:<version>", f.image)))
      },
      _ => None
    })
    .collect()
}

/// DL3007: a `FROM` pinned to the floating `latest` tag.
pub(crate) fn dl3007(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::From(f)
        if f.tag.as_deref().map_or(false, |t| t.eq_ignore_ascii_case("latest"))
          && f.digest.is_none()
          && !f.image.eq_ignore_ascii_case("scratch") =>
      {
        Some(Finding::new(
          "DL3007",
          Severity::Warning,
          ins.line,
          format!("image '{}' is pinned to the floating 'latest' tag", f.image)
        ))
      },
      _ => None
    })
    .collect()
}

/// DL3008: a known-large base image used without a small-variant tag.
pub(crate) fn dl3008(dockerfile: &Dockerfile) -> Vec<Finding> {
  dockerfile.instructions
    .iter()
    .filter_map(|ins| match &ins.kind {
      InstructionKind::From(f) => {
        let bare = bare_image_name(&f.image).to_ascii_lowercase();

        if !LARGE_BASE_IMAGES.contains(&bare.as_str()) {
          return None;
        }

        let tag = f.tag.as_deref().unwrap_or("").to_ascii_lowercase();
        let has_small_variant = SMALL_VARIANT_MARKERS.iter().any(|m| tag.contains(m));

        if has_small_variant {
          None
        } else {
          Some(Finding::new(
            "DL3008",
            Severity::Warning,
            ins.line,
            format!("'{}' is a large base image; consider a slim/alpine variant", f.image)
          ))
        }
      },
      _ => None
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dl3006_flags_untagged_image() {
    let (df, _) = Dockerfile::parse("FROM alpine\n");
    assert_eq!(dl3006(&df).len(), 1);
  }

  #[test]
  fn dl3006_allows_scratch() {
    let (df, _) = Dockerfile::parse("FROM scratch\n");
    assert!(dl3006(&df).is_empty());
  }

  #[test]
  fn dl3006_allows_digest() {
    let (df, _) = Dockerfile::parse("FROM alpine@sha256:abcd\n");
    assert!(dl3006(&df).is_empty());
  }

  #[test]
  fn dl3007_flags_latest() {
    let (df, _) = Dockerfile::parse("FROM alpine:latest\n");
    assert_eq!(dl3007(&df).len(), 1);
  }

  #[test]
  fn dl3007_allows_pinned_tag() {
    let (df, _) = Dockerfile::parse("FROM alpine:3.18\n");
    assert!(dl3007(&df).is_empty());
  }

  #[test]
  fn dl3008_flags_large_image_without_slim_variant() {
    let (df, _) = Dockerfile::parse("FROM ubuntu:22.04\n");
    assert_eq!(dl3008(&df).len(), 1);
  }

  #[test]
  fn dl3008_allows_slim_variant() {
    let (df, _) = Dockerfile::parse("FROM python:3.11-slim\n");
    assert!(dl3008(&df).is_empty());
  }

  #[test]
  fn dl3008_strips_registry_prefix() {
    let (df, _) = Dockerfile::parse("FROM registry.example.com/ubuntu:22.04\n");
    assert_eq!(dl3008(&df).len(), 1);
  }

  #[test]
  fn dl3008_ignores_unlisted_images() {
    let (df, _) = Dockerfile::parse("FROM alpine:3.18\n");
    assert!(dl3008(&df).is_empty());
  }
}
