// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

/// A Dockerfile [`ONBUILD` instruction][onbuild].
///
/// The inner instruction is owned outright (single-owner tree; `FROM` and
/// `ONBUILD` itself are rejected as inner instructions). Parsing the inner
/// instruction requires the full per-instruction dispatch table, so it's
/// built by the top-level parser rather than here.
///
/// [onbuild]: https://docs.docker.com/engine/reference/builder/#onbuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnbuildInstruction {
  pub instruction: String,
  pub inner: Box<crate::dockerfile::InstructionKind>
}
