// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

//! The parser (§4.2): turns a token stream into a `Dockerfile` tree.
//!
//! Stage membership is tracked as indices into `Dockerfile.instructions`
//! rather than borrowed references (see SPEC_FULL.md §B), so the tree is a
//! single flat, self-owned structure with no lifetime parameter.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ParseError;
use crate::instructions::{
  self, ArgInstruction, AddInstruction, CmdInstruction, CopyInstruction, EntrypointInstruction,
  EnvInstruction, ExposeInstruction, FromInstruction, HealthcheckInstruction, LabelInstruction,
  OnbuildInstruction, RunInstruction, ShellInstruction, StopsignalInstruction, UserInstruction,
  VolumeInstruction, WorkdirInstruction
};
use crate::token::{TokenKind, Tokenizer};

lazy_static! {
  static ref IGNORE_DIRECTIVE: Regex =
    Regex::new(r"(?i)^#\s*docker-lint\s+ignore:\s*(.+)$").unwrap();
}

/// A parsed instruction, in its variant-specific form (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionKind {
  From(FromInstruction),
  Run(RunInstruction),
  Copy(CopyInstruction),
  Add(AddInstruction),
  Env(EnvInstruction),
  Arg(ArgInstruction),
  Expose(ExposeInstruction),
  Workdir(WorkdirInstruction),
  User(UserInstruction),
  Label(LabelInstruction),
  Volume(VolumeInstruction),
  Cmd(CmdInstruction),
  Entrypoint(EntrypointInstruction),
  Healthcheck(HealthcheckInstruction),
  Shell(ShellInstruction),
  Stopsignal(StopsignalInstruction),
  Onbuild(OnbuildInstruction)
}

/// A single node in `Dockerfile.instructions` (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
  /// 1-based line of the instruction's first token.
  pub line: usize,

  /// The original source text of the logical line, without the trailing
  /// newline.
  pub raw: String,

  pub kind: InstructionKind
}

/// A `#`-prefixed comment line, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
  pub line: usize,
  pub text: String
}

/// A contiguous run of instructions beginning at (and including) a `FROM`
/// and ending before the next `FROM`, if any.
///
/// `instructions` holds indices into `Dockerfile.instructions` rather than
/// borrowed references or owned copies, so looking a stage's instructions
/// up is a level of indirection through the owning `Dockerfile` (see
/// [`Dockerfile::stage_instructions`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
  pub index: usize,

  /// The stage's `FROM ... AS <name>` alias, or empty if unnamed.
  pub name: String,

  pub from_line: usize,
  pub instructions: Vec<usize>
}

/// The full parsed tree of a Dockerfile (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dockerfile {
  pub stages: Vec<Stage>,

  /// All parsed instructions, including every `FROM`, in source order.
  pub instructions: Vec<Instruction>,

  pub comments: Vec<Comment>,

  /// Line number -> set of rule identifiers ignored on that line, per the
  /// `# docker-lint ignore: ID[,ID...]` directive (it applies to the next
  /// non-blank line following the comment, per §6).
  pub inline_ignores: HashMap<usize, HashSet<String>>
}

impl Dockerfile {
  /// Parses a whole Dockerfile. Always returns a best-effort tree; the
  /// second element of the pair is the first parse error encountered, if
  /// any (§4.2 "Failure semantics"). A malformed instruction is simply
  /// absent from the tree rather than included in some broken form.
  pub fn parse(input: &str) -> (Dockerfile, Option<ParseError>) {
    let mut tokenizer = Tokenizer::new(input);
    let mut instructions = Vec::new();
    let mut comments = Vec::new();
    let mut inline_ignores: HashMap<usize, HashSet<String>> = HashMap::new();
    let mut stages: Vec<Stage> = Vec::new();
    let mut first_error: Option<ParseError> = None;

    loop {
      let token = tokenizer.next();

      match token.kind {
        TokenKind::End => break,
        TokenKind::Newline => continue,

        TokenKind::Comment => {
          if let Some(caps) = IGNORE_DIRECTIVE.captures(&token.text) {
            let ids: HashSet<String> = caps[1]
              .split(',')
              .map(|id| id.trim().to_string())
              .filter(|id| !id.is_empty())
              .collect();

            let target_line = tokenizer.next_non_blank_line(token.line);
            inline_ignores.entry(target_line).or_default().extend(ids);
          }

          comments.push(Comment { line: token.line, text: token.text });
        },

        TokenKind::Instruction => {
          let name = token.text;
          let line = token.line;

          let operand = if tokenizer.peek().kind == TokenKind::Argument {
            tokenizer.next().text
          } else {
            String::new()
          };

          let raw = tokenizer.raw_line(line).unwrap_or(name.as_str()).to_string();

          match dispatch(&name, &operand) {
            Ok(kind) => {
              let index = instructions.len();

              if let InstructionKind::From(ref from) = kind {
                stages.push(Stage {
                  index: stages.len(),
                  name: from.alias.clone().unwrap_or_default(),
                  from_line: line,
                  instructions: vec![index]
                });
              } else if let Some(stage) = stages.last_mut() {
                stage.instructions.push(index);
              }

              instructions.push(Instruction { line, raw, kind });
            },
            Err(message) => {
              if first_error.is_none() {
                first_error = Some(ParseError::new(line, message));
              }
            }
          }
        },

        TokenKind::Argument => {
          if first_error.is_none() {
            first_error = Some(ParseError::new(
              token.line,
              format!("unexpected argument '{}'", token.text)
            ));
          }
        },

        TokenKind::Error => {
          if first_error.is_none() {
            first_error = Some(ParseError::new(token.line, "unrecognized token".to_string()));
          }
        }
      }
    }

    (Dockerfile { stages, instructions, comments, inline_ignores }, first_error)
  }

  /// Resolves a stage's instruction indices to their parsed nodes, in
  /// source order.
  pub fn stage_instructions(&self, stage: &Stage) -> Vec<&Instruction> {
    stage.instructions.iter().map(|&i| &self.instructions[i]).collect()
  }
}

/// Dispatches an instruction name/operand pair to its per-instruction
/// parser (§4.2). `ONBUILD` recurses into this same dispatcher to parse
/// its inner instruction.
fn dispatch(name: &str, operand: &str) -> std::result::Result<InstructionKind, String> {
  match name {
    "FROM" => instructions::from::parse(operand).map(InstructionKind::From),
    "RUN" => instructions::run::parse(operand).map(InstructionKind::Run),
    "COPY" => instructions::copy::parse(operand).map(InstructionKind::Copy),
    "ADD" => instructions::add::parse(operand).map(InstructionKind::Add),
    "ENV" => instructions::env::parse(operand).map(InstructionKind::Env),
    "ARG" => instructions::arg::parse(operand).map(InstructionKind::Arg),
    "EXPOSE" => instructions::expose::parse(operand).map(InstructionKind::Expose),
    "WORKDIR" => instructions::workdir::parse(operand).map(InstructionKind::Workdir),
    "USER" => instructions::user::parse(operand).map(InstructionKind::User),
    "LABEL" => instructions::label::parse(operand).map(InstructionKind::Label),
    "VOLUME" => instructions::volume::parse(operand).map(InstructionKind::Volume),
    "CMD" => instructions::cmd::parse(operand).map(InstructionKind::Cmd),
    "ENTRYPOINT" => instructions::entrypoint::parse(operand).map(InstructionKind::Entrypoint),
    "HEALTHCHECK" => instructions::healthcheck::parse(operand).map(InstructionKind::Healthcheck),
    "SHELL" => instructions::shell::parse(operand).map(InstructionKind::Shell),
    "STOPSIGNAL" => instructions::stopsignal::parse(operand).map(InstructionKind::Stopsignal),
    "ONBUILD" => parse_onbuild(operand),

    // MAINTAINER folds into a LABEL with a single `maintainer` pair (§4.2).
    // The raw operand is free text (may contain whitespace), so it's quoted
    // before being handed to the LABEL parser's word splitter.
    "MAINTAINER" => {
      let escaped = operand.replace('\\', "\\\\").replace('"', "\\\"");
      instructions::label::parse(&format!("maintainer=\"{}\"", escaped))
        .map(InstructionKind::Label)
    },

    other => Err(format!("unrecognized instruction '{}'", other))
  }
}

fn parse_onbuild(operand: &str) -> std::result::Result<InstructionKind, String> {
  let trimmed = operand.trim();
  let mut parts = trimmed.splitn(2, char::is_whitespace);
  let inner_name = parts.next().unwrap_or("").to_ascii_uppercase();
  let inner_operand = parts.next().unwrap_or("").trim_start();

  if inner_name.is_empty() {
    return Err("ONBUILD requires an inner instruction".to_string());
  }

  if inner_name == "FROM" || inner_name == "ONBUILD" {
    return Err(format!("ONBUILD does not support {}", inner_name));
  }

  let inner = dispatch(&inner_name, inner_operand)?;

  Ok(InstructionKind::Onbuild(OnbuildInstruction {
    instruction: inner_name,
    inner: Box::new(inner)
  }))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_stage() {
    let (df, err) = Dockerfile::parse("FROM alpine:3.18\nRUN echo hi\n");
    assert!(err.is_none());
    assert_eq!(df.stages.len(), 1);
    assert_eq!(df.instructions.len(), 2);
    assert_eq!(df.stages[0].instructions, vec![0, 1]);
  }

  #[test]
  fn instructions_before_first_from_belong_to_no_stage() {
    let (df, err) = Dockerfile::parse("ARG VERSION=1\nFROM alpine:${VERSION}\n");
    assert!(err.is_none());
    assert_eq!(df.stages.len(), 1);
    assert_eq!(df.stages[0].instructions, vec![1]);
  }

  #[test]
  fn multi_stage_partitioning() {
    let (df, err) = Dockerfile::parse(
      "FROM golang:1.21-alpine AS builder\nRUN go build\nFROM alpine:3.18\nCOPY --from=builder /a /a\n"
    );
    assert!(err.is_none());
    assert_eq!(df.stages.len(), 2);
    assert_eq!(df.stages[0].name, "builder");
    assert_eq!(df.stages[0].instructions, vec![0, 1]);
    assert_eq!(df.stages[1].name, "");
    assert_eq!(df.stages[1].instructions, vec![2, 3]);
  }

  #[test]
  fn maintainer_folds_into_label() {
    let (df, err) = Dockerfile::parse("FROM scratch\nMAINTAINER me@example.com\n");
    assert!(err.is_none());
    match &df.instructions[1].kind {
      InstructionKind::Label(l) => {
        assert_eq!(l.0, vec![("maintainer".to_string(), "me@example.com".to_string())]);
      },
      other => panic!("expected Label, got {:?}", other)
    }
  }

  #[test]
  fn onbuild_recurses_into_inner_instruction() {
    let (df, err) = Dockerfile::parse("FROM alpine\nONBUILD RUN echo hi\n");
    assert!(err.is_none());
    match &df.instructions[1].kind {
      InstructionKind::Onbuild(o) => {
        assert_eq!(o.instruction, "RUN");
        match o.inner.as_ref() {
          InstructionKind::Run(r) => assert_eq!(r.command, vec!["echo hi"]),
          other => panic!("expected Run, got {:?}", other)
        }
      },
      other => panic!("expected Onbuild, got {:?}", other)
    }
  }

  #[test]
  fn onbuild_rejects_from_and_onbuild() {
    let (_, err) = Dockerfile::parse("FROM alpine\nONBUILD FROM x\n");
    assert!(err.is_some());

    let (_, err) = Dockerfile::parse("FROM alpine\nONBUILD ONBUILD RUN x\n");
    assert!(err.is_some());
  }

  #[test]
  fn inline_ignore_directive_applies_to_next_line() {
    let (df, err) = Dockerfile::parse(
      "FROM alpine\n# docker-lint ignore: DL3006, DL3007\nFROM ubuntu\n"
    );
    assert!(err.is_none());
    let ignores = df.inline_ignores.get(&3).unwrap();
    assert!(ignores.contains("DL3006"));
    assert!(ignores.contains("DL3007"));
  }

  #[test]
  fn inline_ignore_directive_skips_blank_lines() {
    let (df, err) = Dockerfile::parse(
      "FROM alpine\n# docker-lint ignore: DL3006\n\n\nFROM ubuntu\n"
    );
    assert!(err.is_none());
    assert!(!df.inline_ignores.contains_key(&3));
    assert!(!df.inline_ignores.contains_key(&4));
    let ignores = df.inline_ignores.get(&5).unwrap();
    assert!(ignores.contains("DL3006"));
  }

  #[test]
  fn malformed_instruction_is_skipped_and_recorded_as_error() {
    let (df, err) = Dockerfile::parse("FROM alpine\nWORKDIR\nUSER nobody\n");
    assert!(err.is_some());
    assert_eq!(err.unwrap().line, 2);
    assert_eq!(df.instructions.len(), 2);
  }

  #[test]
  fn comments_are_recorded() {
    let (df, _) = Dockerfile::parse("# hello\nFROM alpine\n");
    assert_eq!(df.comments.len(), 1);
    assert_eq!(df.comments[0].text, "# hello");
  }
}
