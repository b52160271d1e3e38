//! Integration tests for `sora-release canary`

use crate::helpers::{TestRepo, git, run_sora_release, sora_release, sora_release_with_env};
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_canary_bumps_commits_tags_and_pushes() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_sora_release(&repo.path, &["canary"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Sora.podspec updated."));
  assert!(stdout.contains("Sora/PackageInfo.swift updated."));
  assert!(stdout.contains("Executing: git push origin develop"));

  let podspec = repo.read_file("Sora.podspec")?;
  assert!(podspec.contains("  s.version = \"2025.2.0-canary.0\"\n"));
  assert!(podspec.contains("  s.name         = \"Sora\"\n"));

  let info = repo.read_file("Sora/PackageInfo.swift")?;
  assert!(info.contains("    public static let version = \"2025.2.0-canary.0\"\n"));
  assert!(info.contains("    public static let version = \"M142\"\n"));

  let subject = repo.origin_git(&["log", "-1", "--format=%s", "develop"])?;
  assert_eq!(
    subject,
    "[canary] Update Sora.podspec and PackageInfo.swift version to 2025.2.0-canary.0"
  );
  assert_eq!(repo.origin_git(&["tag", "--list"])?, "2025.2.0-canary.0");

  Ok(())
}

#[test]
fn test_canary_twice_advances_ordinal() -> Result<()> {
  let repo = TestRepo::new()?;

  run_sora_release(&repo.path, &["canary"])?;
  run_sora_release(&repo.path, &["canary"])?;

  assert!(repo.read_file("Sora.podspec")?.contains("\"2025.2.0-canary.1\""));
  let tags = repo.origin_git(&["tag", "--list"])?;
  assert_eq!(tags.lines().collect::<Vec<_>>(), ["2025.2.0-canary.0", "2025.2.0-canary.1"]);

  Ok(())
}

#[test]
fn test_canary_dry_run_changes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  let head = git(&repo.path, &["rev-parse", "HEAD"])?;

  let output = run_sora_release(&repo.path, &["canary", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Dry run: The following changes would be written to Sora.podspec:"));
  assert!(stdout.contains("  s.version = \"2025.2.0-canary.0\""));
  assert!(stdout.contains("Dry run: Would execute git add Sora.podspec Sora/PackageInfo.swift"));
  assert!(stdout.contains(
    "Dry run: Would execute git commit -m '[canary] Update Sora.podspec and PackageInfo.swift version to 2025.2.0-canary.0'"
  ));
  assert!(stdout.contains("Dry run: Would execute git tag 2025.2.0-canary.0"));
  assert!(stdout.contains("Dry run: Would execute git push origin develop"));
  assert!(stdout.contains("Dry run: Would execute git push origin 2025.2.0-canary.0"));

  assert!(repo.read_file("Sora.podspec")?.contains("s.version = \"2025.2.0\""));
  assert_eq!(git(&repo.path, &["rev-parse", "HEAD"])?.stdout, head.stdout);
  assert_eq!(repo.origin_git(&["tag", "--list"])?, "");

  Ok(())
}

#[test]
fn test_canary_without_version_line_fails() -> Result<()> {
  let repo = TestRepo::new()?;
  std::fs::write(repo.path.join("Sora.podspec"), "Pod::Spec.new do |s|\nend\n")?;

  let output = sora_release(&repo.path, &["canary"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("s.version"));

  // Nothing was written to the other file either
  assert!(repo.read_file("Sora/PackageInfo.swift")?.contains("version = \"2025.2.0\""));

  Ok(())
}

#[test]
fn test_canary_commits_with_identity_from_xdg_config() -> Result<()> {
  let repo = TestRepo::new()?;
  git(&repo.path, &["config", "--unset", "user.name"])?;
  git(&repo.path, &["config", "--unset", "user.email"])?;

  let home = TempDir::new()?;
  let xdg = home.path().join("xdg");
  std::fs::create_dir_all(xdg.join("git"))?;
  std::fs::write(
    xdg.join("git/config"),
    "[user]\n\tname = Xdg User\n\temail = xdg@example.com\n[commit]\n\tgpgsign = false\n",
  )?;

  let output = sora_release_with_env(
    &repo.path,
    &["canary"],
    &[
      ("HOME", home.path()),
      ("XDG_CONFIG_HOME", xdg.as_path()),
      ("GIT_CONFIG_NOSYSTEM", std::path::Path::new("1")),
    ],
  )?;
  assert!(
    output.status.success(),
    "canary failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  assert_eq!(repo.origin_git(&["log", "-1", "--format=%ae", "develop"])?, "xdg@example.com");

  Ok(())
}
