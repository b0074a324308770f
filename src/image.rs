// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! Splits a `FROM` image reference into image/tag/digest, and strips a
//! registry prefix off an image name for rules (DL3008) that only care
//! about the bare image.

/// Determines whether a `/`-separated leading path segment names a
/// registry host rather than the first component of an image path.
///
/// Based on rules from <https://stackoverflow.com/a/42116190>: `localhost`,
/// anything containing a `.`, or anything containing a `:` (a registry
/// port) is a registry; otherwise it's the first segment of the image
/// path itself (e.g. the `library` implicit in `ubuntu`, or an
/// organization like `org` in `org/foo`).
fn is_registry(segment: &str) -> bool {
  segment == "localhost" || segment.contains('.') || segment.contains(':')
}

/// Splits a `FROM` image reference (already stripped of any leading
/// `--platform=` flag and trailing ` AS alias`) into `(image, tag, digest)`
/// per §4.2: split on `@` first for the digest, then split the leading
/// part on the first `:` for the tag. The `:`/`/` split additionally
/// disambiguates a registry port from a tag separator, the way the
/// upstream parser's `ImageRef` does, so `localhost:5000/x` isn't
/// misread as image `localhost` tag `5000/x`.
pub(crate) fn split_image_reference(s: &str) -> (String, Option<String>, Option<String>) {
  let mut digest_parts = s.splitn(2, '@');
  let before_digest = digest_parts.next().unwrap_or("");
  let digest = digest_parts.next().map(|d| d.to_string());

  let path_parts: Vec<&str> = before_digest.splitn(2, '/').collect();
  let (registry, rest) = if path_parts.len() == 2 && is_registry(path_parts[0]) {
    (Some(path_parts[0]), path_parts[1])
  } else {
    (None, before_digest)
  };

  let mut tag_parts = rest.splitn(2, ':');
  let image_tail = tag_parts.next().unwrap_or("");
  let tag = tag_parts.next().map(|t| t.to_string());

  let image = match registry {
    Some(r) => format!("{}/{}", r, image_tail),
    None => image_tail.to_string()
  };

  (image, tag, digest)
}

/// Strips a registry prefix (if any) off an already-parsed image name, for
/// rules that only care about the bare image (e.g. `registry.io/ubuntu` ->
/// `ubuntu`).
pub(crate) fn bare_image_name(image: &str) -> &str {
  let parts: Vec<&str> = image.splitn(2, '/').collect();
  if parts.len() == 2 && is_registry(parts[0]) {
    parts[1]
  } else {
    image
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_image() {
    assert_eq!(
      split_image_reference("alpine"),
      ("alpine".to_string(), None, None)
    );
  }

  #[test]
  fn image_with_tag() {
    assert_eq!(
      split_image_reference("alpine:3.18"),
      ("alpine".to_string(), Some("3.18".to_string()), None)
    );
  }

  #[test]
  fn image_with_digest() {
    assert_eq!(
      split_image_reference("alpine@sha256:abcd"),
      ("alpine".to_string(), None, Some("sha256:abcd".to_string()))
    );
  }

  #[test]
  fn image_with_tag_and_digest() {
    assert_eq!(
      split_image_reference("alpine:3.18@sha256:abcd"),
      ("alpine".to_string(), Some("3.18".to_string()), Some("sha256:abcd".to_string()))
    );
  }

  #[test]
  fn registry_port_is_not_mistaken_for_a_tag() {
    assert_eq!(
      split_image_reference("localhost:5000/myimage:1.0"),
      ("localhost:5000/myimage".to_string(), Some("1.0".to_string()), None)
    );
  }

  #[test]
  fn bare_image_name_strips_registry() {
    assert_eq!(bare_image_name("registry.example.com/org/ubuntu"), "org/ubuntu");
    assert_eq!(bare_image_name("ubuntu"), "ubuntu");
    assert_eq!(bare_image_name("localhost/ubuntu"), "ubuntu");
  }
}
