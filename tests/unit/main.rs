//! Unit tests for wfdeploy
//!
//! These tests use mocked ports and run fast without network or process I/O.

mod helpers;
