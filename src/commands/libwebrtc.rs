//! `sora-release libwebrtc <version>`: point the SDK at a new WebRTC.xcframework build

use crate::artifact::{ArtifactResolver, ArtifactSource, HttpSource, sha256_file};
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::patch::{update_changes_md, update_package_info, update_package_swift, update_readme};
use crate::release::{FileUpdate, LibwebrtcVersion};
use std::io::IsTerminal;

/// Run the libwebrtc command against the release download server
pub fn run_libwebrtc(ctx: &ReleaseContext, version: &str, author: Option<&str>, dry_run: bool) -> ReleaseResult<()> {
  let version = LibwebrtcVersion::parse(version)?;
  let source = HttpSource::new(std::io::stderr().is_terminal())?;
  update_libwebrtc(ctx, &source, &version, author, dry_run)
}

/// Resolve the artifact from `source`, then update every managed file
///
/// All four contents are computed before the first write, so a missing marker
/// in any file leaves the repository untouched.
pub fn update_libwebrtc<S: ArtifactSource>(
  ctx: &ReleaseContext,
  source: &S,
  version: &LibwebrtcVersion,
  author: Option<&str>,
  dry_run: bool,
) -> ReleaseResult<()> {
  let config = &ctx.config.libwebrtc;
  let resolver = ArtifactResolver::new(source, &ctx.root, config, dry_run);
  let artifact = resolver.resolve(version)?;

  let checksum = sha256_file(&artifact.path)?;
  let build_info = resolver.read_build_info(&artifact.path)?;
  tracing::debug!(path = %artifact.path.display(), origin = ?artifact.origin, %checksum, "artifact resolved");

  let mismatched = build_info.mismatches(version);
  if !mismatched.is_empty() {
    return Err(ReleaseError::ArtifactMismatch {
      path: artifact.path.clone(),
      version: version.to_string(),
      mismatched,
    });
  }

  let updates = [
    FileUpdate::compute(&ctx.root, &config.package_swift, |content| {
      update_package_swift(content, &config.package_swift, version, &checksum)
    })?,
    FileUpdate::compute(&ctx.root, &config.package_info, |content| {
      update_package_info(content, &config.package_info, &build_info, version.branch)
    })?,
    FileUpdate::compute(&ctx.root, &config.changes, |content| {
      update_changes_md(content, &config.changes, version, author)
    })?,
    FileUpdate::compute(&ctx.root, &config.readme, |content| {
      update_readme(content, &config.readme, version.major, version.branch)
    })?,
  ];

  for update in &updates {
    update.write_or_preview(dry_run)?;
  }

  if dry_run {
    println!("Dry run complete. No files were modified.");
  } else {
    println!("libwebrtc update completed.");
  }
  Ok(())
}
