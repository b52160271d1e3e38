//! Versions and the files that declare them
//!
//! # Layout
//!
//! - **version**: `SdkVersion` (`X.Y.Z[-canary.N]`) and `LibwebrtcVersion` (`mMAJOR.BRANCH.COMMIT.MAINT`)
//! - **canary**: locating and rewriting the SDK version line in Sora.podspec and PackageInfo.swift
//! - **apply**: writing computed contents, or previewing them under `--dry-run`
//!
//! Contents are always computed in full before anything is written, so a
//! failure while computing leaves every file untouched.

pub mod apply;
pub mod canary;
pub mod version;

pub use apply::FileUpdate;
pub use version::{LibwebrtcVersion, SdkVersion};
