// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::image::split_image_reference;
use crate::util::split_shell_words;

/// A Dockerfile [`FROM` instruction][from].
///
/// [from]: https://docs.docker.com/engine/reference/builder/#from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromInstruction {
  pub image: String,
  pub tag: Option<String>,
  pub digest: Option<String>,
  pub alias: Option<String>,
  pub platform: Option<String>
}

pub(crate) fn parse(operand: &str) -> std::result::Result<FromInstruction, String> {
  let words = split_shell_words(operand);
  let mut idx = 0;
  let mut platform = None;

  if let Some(first) = words.get(idx) {
    if let Some(value) = first.strip_prefix("--platform=") {
      platform = Some(value.to_string());
      idx += 1;
    } else if first == "--platform" {
      idx += 1;
      match words.get(idx) {
        Some(value) => { platform = Some(value.clone()); idx += 1; },
        None => return Err("--platform requires a value".to_string())
      }
    }
  }

  let image_word = match words.get(idx) {
    Some(w) if !w.is_empty() => w.clone(),
    _ => return Err("FROM requires an image".to_string())
  };
  idx += 1;

  let mut alias = None;
  if let Some(as_kw) = words.get(idx) {
    if as_kw.eq_ignore_ascii_case("AS") {
      idx += 1;
      match words.get(idx) {
        Some(name) if !name.is_empty() => alias = Some(name.clone()),
        _ => return Err("AS requires a stage name".to_string())
      }
    }
  }

  let (image, tag, digest) = split_image_reference(&image_word);

  Ok(FromInstruction { image, tag, digest, alias, platform })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn simple() {
    let f = parse("alpine:3.18").unwrap();
    assert_eq!(f, FromInstruction {
      image: "alpine".into(), tag: Some("3.18".into()), digest: None,
      alias: None, platform: None
    });
  }

  #[test]
  fn with_alias() {
    let f = parse("golang:1.21-alpine AS builder").unwrap();
    assert_eq!(f.alias, Some("builder".into()));
    assert_eq!(f.image, "golang");
    assert_eq!(f.tag, Some("1.21-alpine".into()));
  }

  #[test]
  fn with_platform_eq() {
    let f = parse("--platform=linux/amd64 alpine:3.18").unwrap();
    assert_eq!(f.platform, Some("linux/amd64".into()));
    assert_eq!(f.image, "alpine");
  }

  #[test]
  fn with_platform_space() {
    let f = parse("--platform linux/amd64 alpine:3.18").unwrap();
    assert_eq!(f.platform, Some("linux/amd64".into()));
  }

  #[test]
  fn with_digest() {
    let f = parse("alpine@sha256:abc123").unwrap();
    assert_eq!(f.digest, Some("sha256:abc123".into()));
    assert_eq!(f.tag, None);
  }

  #[test]
  fn empty_image_is_an_error() {
    assert!(parse("").is_err());
  }

  #[test]
  fn missing_alias_name_is_an_error() {
    assert!(parse("alpine:3.18 AS").is_err());
  }

  #[test]
  fn scratch() {
    let f = parse("scratch").unwrap();
    assert_eq!(f.image, "scratch");
  }
}
