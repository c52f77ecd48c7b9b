//! Exohood preview CLI library
//!
//! Backs the `exohood` binary: resolves a host property bag, mounts the
//! widget into an in-memory document and prints what the host would see.

pub mod cli;
pub mod commands;
pub mod home;
