//! Core building blocks shared by both release tools
//!
//! - **config**: release.toml parsing with repository-layout defaults
//! - **context**: per-invocation root + config
//! - **error**: error types with contextual help messages
//! - **vcs**: repository operations (`RepoOps`) and the system git backend

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
