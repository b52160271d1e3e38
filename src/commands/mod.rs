//! CLI commands for sora-release
//!
//! - **canary**: bump the canary version in Sora.podspec and PackageInfo.swift, then commit, tag and push
//! - **libwebrtc**: update Package.swift, PackageInfo.swift, CHANGES.md and README.md for a libwebrtc build
//!
//! Both commands take `&ReleaseContext` so the configuration is loaded once.

pub mod canary;
pub mod libwebrtc;

pub use canary::run_canary;
pub use libwebrtc::run_libwebrtc;
