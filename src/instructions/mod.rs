// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

//! One module per instruction form (§3). Each exposes its node struct
//! publicly and a crate-private `parse(operand) -> Result<T, String>`
//! that the top-level parser in `dockerfile.rs` dispatches to.

pub(crate) mod from;
pub use from::FromInstruction;

pub(crate) mod run;
pub use run::RunInstruction;

pub(crate) mod copy;
pub use copy::CopyInstruction;

pub(crate) mod add;
pub use add::AddInstruction;

pub(crate) mod env;
pub use env::EnvInstruction;

pub(crate) mod arg;
pub use arg::ArgInstruction;

pub(crate) mod expose;
pub use expose::ExposeInstruction;

pub(crate) mod workdir;
pub use workdir::WorkdirInstruction;

pub(crate) mod user;
pub use user::UserInstruction;

pub(crate) mod label;
pub use label::LabelInstruction;

pub(crate) mod volume;
pub use volume::VolumeInstruction;

pub(crate) mod cmd;
pub use cmd::CmdInstruction;

pub(crate) mod entrypoint;
pub use entrypoint::EntrypointInstruction;

pub(crate) mod healthcheck;
pub use healthcheck::HealthcheckInstruction;

pub(crate) mod shell;
pub use shell::ShellInstruction;

pub(crate) mod stopsignal;
pub use stopsignal::StopsignalInstruction;

pub(crate) mod onbuild;
pub use onbuild::OnbuildInstruction;
