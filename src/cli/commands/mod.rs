//! Subcommand implementations

pub mod init;
pub mod interview;
pub mod questions;
pub mod serve;
