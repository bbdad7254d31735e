//! Use-case services. All I/O is routed through injected port traits.

pub mod inspect;
pub mod mode;
pub mod reconcile;
