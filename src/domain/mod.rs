//! Pure domain types and logic.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.

pub mod command;
pub mod error;
pub mod outcome;
pub mod request;
pub mod response;
