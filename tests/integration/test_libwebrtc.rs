//! Integration tests for `sora-release libwebrtc`, run offline against a cached artifact

use crate::helpers::{CHANGES, MATCHING_BUILD_INFO, PACKAGE_SWIFT, README, TestRepo, run_sora_release, sora_release};
use anyhow::Result;

#[test]
fn test_libwebrtc_updates_every_file() -> Result<()> {
  let repo = TestRepo::new()?;
  let checksum = repo.write_artifact(MATCHING_BUILD_INFO)?;

  let output = run_sora_release(&repo.path, &["libwebrtc", "m143.7499.2.1", "--author", "@bob"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Using existing artifact at WebRTC.xcframework.zip"));
  assert!(stdout.contains("Updated Package.swift"));
  assert!(stdout.contains("Updated Sora/PackageInfo.swift"));
  assert!(stdout.contains("Updated CHANGES.md"));
  assert!(stdout.contains("Updated README.md"));
  assert!(stdout.trim_end().ends_with("libwebrtc update completed."));

  let package_swift = repo.read_file("Package.swift")?;
  assert!(package_swift.contains("let libwebrtcVersion = \"m143.7499.2.1\""));
  assert!(package_swift.contains(&format!("checksum: \"{}\"", checksum)));

  let info = repo.read_file("Sora/PackageInfo.swift")?;
  assert!(info.contains("    public static let version = \"2025.2.0\""));
  assert!(info.contains("    public static let version = \"M143\""));
  assert!(info.contains("    public static let branch = \"7499\""));
  assert!(info.contains("    public static let commitPosition = \"2\""));
  assert!(info.contains("    public static let maintenanceVersion = \"1\""));
  assert!(info.contains("    public static let revision = \"2c8f5be6924d507ee74191b1aeadcec07f747f21\""));

  let changes = repo.read_file("CHANGES.md")?;
  assert!(changes.contains("## develop\n\n- [UPDATE] libwebrtc m143.7499.2.1 に上げる\n  - @bob\n- [FIX]"));

  let readme = repo.read_file("README.md")?;
  assert!(readme.contains("badge/libwebrtc-143.7499-blue.svg)](https://chromium.googlesource.com/external/webrtc/+/branch-heads/7499)"));

  Ok(())
}

#[test]
fn test_libwebrtc_rerun_is_noop() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_artifact(MATCHING_BUILD_INFO)?;

  run_sora_release(&repo.path, &["libwebrtc", "m143.7499.2.1", "--author", "bob"])?;
  let files = ["Package.swift", "Sora/PackageInfo.swift", "CHANGES.md", "README.md"];
  let first: Vec<String> = files.iter().map(|f| repo.read_file(f)).collect::<Result<_>>()?;

  let output = run_sora_release(&repo.path, &["libwebrtc", "m143.7499.2.1", "--author", "BOB"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  for file in files {
    assert!(stdout.contains(&format!("No changes for {}", file)), "{} changed on rerun", file);
  }

  let second: Vec<String> = files.iter().map(|f| repo.read_file(f)).collect::<Result<_>>()?;
  assert_eq!(first, second);

  Ok(())
}

#[test]
fn test_libwebrtc_dry_run_prints_diffs_only() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_artifact(MATCHING_BUILD_INFO)?;

  let output = run_sora_release(&repo.path, &["libwebrtc", "m143.7499.2.1", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("[dry-run] Using existing artifact at WebRTC.xcframework.zip"));
  assert!(stdout.contains("[dry-run] Diff for Package.swift:"));
  assert!(stdout.contains("--- Package.swift\n+++ Package.swift\n"));
  assert!(stdout.contains("+let libwebrtcVersion = \"m143.7499.2.1\""));
  assert!(stdout.contains("+  - @your-github-id"));
  assert!(stdout.trim_end().ends_with("Dry run complete. No files were modified."));

  assert_eq!(repo.read_file("Package.swift")?, PACKAGE_SWIFT);
  assert_eq!(repo.read_file("CHANGES.md")?, CHANGES);
  assert_eq!(repo.read_file("README.md")?, README);

  Ok(())
}

#[test]
fn test_libwebrtc_invalid_version_exits_one() -> Result<()> {
  let repo = TestRepo::new()?;

  for bad in ["143.7499.2.1", "M143.7499.2.1", "m143.7499.2", "m143.7499.2.1-rc"] {
    let output = sora_release(&repo.path, &["libwebrtc", bad])?;
    assert_eq!(output.status.code(), Some(1), "{} accepted", bad);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("m143.7499.1.0"), "{}", stderr);
  }

  assert_eq!(repo.read_file("Package.swift")?, PACKAGE_SWIFT);
  Ok(())
}

#[test]
fn test_libwebrtc_missing_marker_writes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_artifact(MATCHING_BUILD_INFO)?;
  std::fs::write(repo.path.join("README.md"), "# Sora iOS SDK\n")?;

  let output = sora_release(&repo.path, &["libwebrtc", "m143.7499.2.1"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("README.md"), "{}", stderr);

  assert_eq!(repo.read_file("Package.swift")?, PACKAGE_SWIFT);
  assert_eq!(repo.read_file("CHANGES.md")?, CHANGES);
  Ok(())
}

#[test]
fn test_libwebrtc_missing_develop_heading_fails() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_artifact(MATCHING_BUILD_INFO)?;
  std::fs::write(repo.path.join("CHANGES.md"), "# 変更履歴\n")?;

  let output = sora_release(&repo.path, &["libwebrtc", "m143.7499.2.1"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("## develop"));
  assert_eq!(repo.read_file("Package.swift")?, PACKAGE_SWIFT);
  Ok(())
}

#[test]
fn test_libwebrtc_without_version_argument_exits_one() -> Result<()> {
  let repo = TestRepo::new()?;
  let output = sora_release(&repo.path, &["libwebrtc"])?;
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_libwebrtc_version_flag_prints_version() -> Result<()> {
  let repo = TestRepo::new()?;
  let output = run_sora_release(&repo.path, &["libwebrtc", "--version"])?;
  assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));

  let output = run_sora_release(&repo.path, &["libwebrtc", "m143.7499.2.1", "--dry-run", "--help"])?;
  assert!(String::from_utf8_lossy(&output.stdout).contains("VERSION"));
  Ok(())
}
