//! Command handlers — wire infrastructure into the application services.

pub mod deploy;
pub mod version;
