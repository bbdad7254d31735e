//! Production implementations of the application port traits.

pub mod cli_session;
pub mod command_runner;
pub mod stager;
