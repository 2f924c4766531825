#![forbid(unsafe_code)]

//! `hostlink` — host-communication layer for a 3D-printer controller.
//!
//! Pushes `//action:` status notifications to an attached host application
//! and runs single-outstanding interactive prompts whose resolution the
//! host reports back asynchronously as an `M876 S<code>` acknowledgement.

pub mod channel;
pub mod config;
pub mod errors;
pub mod gcode;
pub mod hooks;
pub mod notifier;
pub mod prompt;

pub use config::HostConfig;
pub use errors::{AppError, Result};
