// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

/// A Dockerfile [`USER` instruction][user].
///
/// [user]: https://docs.docker.com/engine/reference/builder/#user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInstruction {
  pub user: String,
  pub group: Option<String>
}

pub(crate) fn parse(operand: &str) -> std::result::Result<UserInstruction, String> {
  let trimmed = operand.trim();

  if trimmed.is_empty() {
    return Err("USER requires a user".to_string());
  }

  match trimmed.split_once(':') {
    Some((user, group)) => Ok(UserInstruction {
      user: user.to_string(),
      group: Some(group.to_string())
    }),
    None => Ok(UserInstruction { user: trimmed.to_string(), group: None })
  }
}
