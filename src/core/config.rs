use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the libwebrtc version in `download_url`
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Configuration for sora-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every field has a default matching the SDK repository layout, so the file
/// is optional. The git remote (`origin`) and pushed branch (`develop`) are
/// not configurable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub canary: CanaryConfig,
  #[serde(default)]
  pub libwebrtc: LibwebrtcConfig,
}

/// Files touched by `sora-release canary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanaryConfig {
  /// CocoaPods spec carrying `s.version`
  #[serde(default = "default_podspec")]
  pub podspec: PathBuf,

  /// Swift constants file carrying `SDKInfo.version`
  #[serde(default = "default_package_info")]
  pub package_info: PathBuf,
}

impl Default for CanaryConfig {
  fn default() -> Self {
    Self {
      podspec: default_podspec(),
      package_info: default_package_info(),
    }
  }
}

/// Files and artifact locations used by `sora-release libwebrtc`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibwebrtcConfig {
  #[serde(default = "default_package_swift")]
  pub package_swift: PathBuf,

  #[serde(default = "default_package_info")]
  pub package_info: PathBuf,

  #[serde(default = "default_changes")]
  pub changes: PathBuf,

  #[serde(default = "default_readme")]
  pub readme: PathBuf,

  /// Cached artifact reused when its build info matches
  #[serde(default = "default_artifact")]
  pub artifact: PathBuf,

  /// Path of the build info document inside the artifact
  #[serde(default = "default_build_info_entry")]
  pub build_info_entry: String,

  /// Download URL template, `{version}` is replaced by the requested version
  #[serde(default = "default_download_url")]
  pub download_url: String,
}

impl Default for LibwebrtcConfig {
  fn default() -> Self {
    Self {
      package_swift: default_package_swift(),
      package_info: default_package_info(),
      changes: default_changes(),
      readme: default_readme(),
      artifact: default_artifact(),
      build_info_entry: default_build_info_entry(),
      download_url: default_download_url(),
    }
  }
}

fn default_podspec() -> PathBuf {
  PathBuf::from("Sora.podspec")
}

fn default_package_info() -> PathBuf {
  PathBuf::from("Sora/PackageInfo.swift")
}

fn default_package_swift() -> PathBuf {
  PathBuf::from("Package.swift")
}

fn default_changes() -> PathBuf {
  PathBuf::from("CHANGES.md")
}

fn default_readme() -> PathBuf {
  PathBuf::from("README.md")
}

fn default_artifact() -> PathBuf {
  PathBuf::from("WebRTC.xcframework.zip")
}

fn default_build_info_entry() -> String {
  "WebRTC.xcframework/build_info.json".to_string()
}

fn default_download_url() -> String {
  "https://github.com/shiguredo-webrtc-build/webrtc-build/releases/download/{version}/WebRTC.xcframework.zip"
    .to_string()
}

impl LibwebrtcConfig {
  /// Build the download URL for a version
  pub fn download_url_for(&self, version: &str) -> String {
    self.download_url.replace(VERSION_PLACEHOLDER, version)
  }

  /// Validate the libwebrtc section
  pub fn validate(&self) -> ReleaseResult<()> {
    if !self.download_url.contains(VERSION_PLACEHOLDER) {
      return Err(ReleaseError::with_help(
        format!("download_url '{}' has no {} placeholder", self.download_url, VERSION_PLACEHOLDER),
        "Use a template like https://host/org/repo/releases/download/{version}/WebRTC.xcframework.zip",
      ));
    }

    if self.build_info_entry.is_empty() {
      return Err(ReleaseError::Config(ConfigError::MissingField {
        field: "libwebrtc.build_info_entry".to_string(),
      }));
    }

    for (name, path) in [
      ("package_swift", &self.package_swift),
      ("package_info", &self.package_info),
      ("changes", &self.changes),
      ("readme", &self.readme),
      ("artifact", &self.artifact),
    ] {
      ensure_relative(name, path)?;
    }

    Ok(())
  }
}

impl CanaryConfig {
  /// Validate the canary section
  pub fn validate(&self) -> ReleaseResult<()> {
    ensure_relative("podspec", &self.podspec)?;
    ensure_relative("package_info", &self.package_info)
  }
}

fn ensure_relative(name: &str, path: &Path) -> ReleaseResult<()> {
  if path.is_absolute() {
    return Err(ReleaseError::with_help(
      format!("Path for '{}' must be relative to the repository root: {}", name, path.display()),
      "Paths in release.toml are resolved against the repository root",
    ));
  }
  Ok(())
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to the defaults when no file exists
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no release.toml found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content).map_err(|e| {
      ReleaseError::Config(ConfigError::Parse {
        path: config_path.clone(),
        message: e.to_string(),
      })
    })?;

    config
      .canary
      .validate()
      .with_context(|| format!("Invalid [canary] configuration in {}", config_path.display()))?;
    config
      .libwebrtc
      .validate()
      .with_context(|| format!("Invalid [libwebrtc] configuration in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded release configuration");
    Ok(config)
  }
}
