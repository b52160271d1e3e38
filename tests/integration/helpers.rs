//! Test helpers for integration tests

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const PODSPEC: &str = r#"Pod::Spec.new do |s|
  s.name         = "Sora"
  s.version = "2025.2.0"
  s.summary      = "Sora iOS SDK"
  s.ios.deployment_target = "14.0"
end
"#;

pub const PACKAGE_INFO: &str = r#"import Foundation

/// :nodoc:
public enum SDKInfo {
    // Sora iOS SDK のバージョンを定義する
    public static let version = "2025.2.0"
}

/// WebRTC フレームワークの情報を表します。
public enum WebRTCInfo {
    /// WebRTC フレームワークのバージョン
    public static let version = "M142"

    /// WebRTC フレームワークのブランチ
    public static let branch = "7444"

    /// WebRTC フレームワークのコミットポジション
    public static let commitPosition = "1"

    /// WebRTC フレームワークのメンテナンスバージョン
    public static let maintenanceVersion = "0"

    /// WebRTC フレームワークのソースコードのリビジョン
    public static let revision = "fb7f5a7b1b6b8c1a3cf9d0d6f1e5f27c09c1c2ab"
}
"#;

pub const PACKAGE_SWIFT: &str = r#"// swift-tools-version:5.10

import Foundation
import PackageDescription

let libwebrtcVersion = "m142.7444.1.0"

let package = Package(
    name: "Sora",
    platforms: [.iOS(.v14)],
    products: [
        .library(name: "Sora", targets: ["Sora"]),
    ],
    targets: [
        .binaryTarget(
            name: "WebRTC",
            url: "https://github.com/shiguredo-webrtc-build/webrtc-build/releases/download/\(libwebrtcVersion)/WebRTC.xcframework.zip",
            checksum: "78405439cccb973329e615030cc18dac693102fa3aec245bc29e583673d32b3d"
        ),
        .target(
            name: "Sora",
            dependencies: ["WebRTC"],
            path: "Sora"
        ),
    ]
)
"#;

pub const CHANGES: &str = r#"# 変更履歴

- CHANGE
  - 下位互換のない変更
- UPDATE
  - 下位互換がある変更

## develop

- [FIX] 接続中にシグナリングが切断されると落ちる問題を修正する
  - @carol

## 2025.1.0

- [ADD] サイマルキャストの rid を指定できるようにする
  - @alice
"#;

pub const README: &str = r#"# Sora iOS SDK

[![libwebrtc](https://img.shields.io/badge/libwebrtc-142.7444-blue.svg)](https://chromium.googlesource.com/external/webrtc/+/branch-heads/7444)
[![GitHub tag](https://img.shields.io/github/tag/shiguredo/sora-ios-sdk.svg)](https://github.com/shiguredo/sora-ios-sdk)
"#;

pub const MATCHING_BUILD_INFO: &str =
  r#"{"branch": "M143", "commit": "2", "maint": 1, "revision": "2c8f5be6924d507ee74191b1aeadcec07f747f21"}"#;

/// A throwaway SDK repository on branch `develop` with a local bare `origin`
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  pub origin: PathBuf,
}

impl TestRepo {
  /// Create the repository with every managed file committed
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("sora-ios-sdk");
    let origin = root.path().join("origin.git");
    std::fs::create_dir_all(path.join("Sora"))?;

    git(root.path(), &["init", "--bare", "--initial-branch=develop", "origin.git"])?;
    git(&path, &["init", "--initial-branch=develop"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["config", "tag.gpgsign", "false"])?;
    let origin_url = origin.to_string_lossy().to_string();
    git(&path, &["remote", "add", "origin", origin_url.as_str()])?;

    std::fs::write(path.join("Sora.podspec"), PODSPEC)?;
    std::fs::write(path.join("Sora/PackageInfo.swift"), PACKAGE_INFO)?;
    std::fs::write(path.join("Package.swift"), PACKAGE_SWIFT)?;
    std::fs::write(path.join("CHANGES.md"), CHANGES)?;
    std::fs::write(path.join("README.md"), README)?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial SDK layout"])?;
    git(&path, &["push", "origin", "develop"])?;

    Ok(Self { _root: root, path, origin })
  }

  /// Place a cached `WebRTC.xcframework.zip` carrying `build_info` at the root
  pub fn write_artifact(&self, build_info: &str) -> Result<String> {
    let artifact = self.path.join("WebRTC.xcframework.zip");
    let mut zip = zip::ZipWriter::new(std::fs::File::create(&artifact)?);
    zip.add_directory("WebRTC.xcframework/", SimpleFileOptions::default())?;
    zip.start_file("WebRTC.xcframework/build_info.json", SimpleFileOptions::default())?;
    zip.write_all(build_info.as_bytes())?;
    zip.start_file("WebRTC.xcframework/Info.plist", SimpleFileOptions::default())?;
    zip.write_all(b"<plist version=\"1.0\"><dict/></plist>\n")?;
    zip.finish()?;

    let mut hasher = Sha256::new();
    hasher.update(std::fs::read(&artifact)?);
    Ok(format!("{:x}", hasher.finalize()))
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Run git against the bare origin
  pub fn origin_git(&self, args: &[&str]) -> Result<String> {
    let output = git(&self.origin, args)?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the sora-release binary, whatever its exit status
pub fn sora_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  sora_release_with_env(cwd, args, &[])
}

/// Run the sora-release binary with extra environment and no identity overrides
pub fn sora_release_with_env(cwd: &Path, args: &[&str], env: &[(&str, &Path)]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_sora-release");
  let mut cmd = Command::new(bin);
  cmd.current_dir(cwd).args(args).env_remove("RUST_LOG");
  for key in [
    "GIT_AUTHOR_NAME",
    "GIT_AUTHOR_EMAIL",
    "GIT_COMMITTER_NAME",
    "GIT_COMMITTER_EMAIL",
    "EMAIL",
  ] {
    cmd.env_remove(key);
  }
  cmd.envs(env.iter().copied());
  cmd.output().context("Failed to run sora-release")
}

/// Run the sora-release binary and require success
pub fn run_sora_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = sora_release(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "sora-release command failed: sora-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
