//! The WebRTC.xcframework artifact: locate or download it, hash it, read its build info

pub mod archive;
pub mod build_info;
pub mod checksum;
pub mod resolve;
pub mod source;

pub use build_info::BuildInfo;
pub use checksum::sha256_file;
pub use resolve::ArtifactResolver;
pub use source::{ArtifactSource, HttpSource};
