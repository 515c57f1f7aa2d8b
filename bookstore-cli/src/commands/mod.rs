//! CLI command implementations.

pub mod demo;
pub mod init;
pub mod seed;
pub mod version;
