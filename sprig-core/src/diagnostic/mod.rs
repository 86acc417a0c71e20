//! Configuration diagnostics
//!
//! Text screens that tell the deployer which configuration group failed
//! and why, without echoing any configured value.

pub mod screen;

pub use screen::{DiagnosticScreen, LINE_LEN, SCREEN_ROWS};
