// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

#![forbid(unsafe_code)]

mod error;
mod util;
mod image;
mod token;
mod instructions;
mod dockerfile;
mod rules;

pub use error::*;
pub use instructions::*;
pub use dockerfile::*;
pub use rules::*;
