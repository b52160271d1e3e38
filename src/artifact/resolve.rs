use super::build_info::BuildInfo;
use super::source::ArtifactSource;
use crate::core::config::LibwebrtcConfig;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::release::version::LibwebrtcVersion;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Where a resolved artifact came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOrigin {
  /// The zip already present at the repository root
  Cached,
  /// Freshly downloaded into a temporary file
  Downloaded,
}

/// An artifact ready to be hashed and inspected
///
/// A downloaded artifact lives in a temporary file that is removed when this
/// value is dropped.
#[derive(Debug)]
pub struct ResolvedArtifact {
  pub path: PathBuf,
  pub origin: ArtifactOrigin,
  _temp: Option<TempPath>,
}

/// Picks the cached artifact when it matches the requested version, downloads otherwise
pub struct ArtifactResolver<'a, S: ArtifactSource> {
  source: &'a S,
  root: &'a Path,
  config: &'a LibwebrtcConfig,
  dry_run: bool,
}

impl<'a, S: ArtifactSource> ArtifactResolver<'a, S> {
  pub fn new(source: &'a S, root: &'a Path, config: &'a LibwebrtcConfig, dry_run: bool) -> Self {
    Self {
      source,
      root,
      config,
      dry_run,
    }
  }

  fn prefix(&self) -> &'static str {
    if self.dry_run { "[dry-run] " } else { "" }
  }

  pub fn resolve(&self, version: &LibwebrtcVersion) -> ReleaseResult<ResolvedArtifact> {
    let local = self.root.join(&self.config.artifact);
    let display = self.config.artifact.display();

    if local.is_file() {
      match self.read_build_info(&local) {
        Ok(info) if info.matches(version) => {
          println!("{}Using existing artifact at {}", self.prefix(), display);
          return Ok(ResolvedArtifact {
            path: local,
            origin: ArtifactOrigin::Cached,
            _temp: None,
          });
        }
        Ok(info) => {
          tracing::debug!(mismatched = ?info.mismatches(version), "cached artifact is for another version");
        }
        Err(err) => {
          tracing::debug!(error = %err, "cached artifact is unreadable");
        }
      }
      println!(
        "{}Local {} does not match requested version; downloading correct artifact.",
        self.prefix(),
        display
      );
    } else {
      tracing::debug!(path = %local.display(), "no cached artifact");
    }

    self.download(version)
  }

  fn download(&self, version: &LibwebrtcVersion) -> ReleaseResult<ResolvedArtifact> {
    let url = self.config.download_url_for(version.as_str());
    let temp = tempfile::Builder::new()
      .prefix("webrtc_")
      .suffix(".zip")
      .tempfile()
      .context("Failed to create a temporary file for the artifact")?
      .into_temp_path();

    println!("{}Downloading {}", self.prefix(), url);
    self.source.fetch(&url, &temp)?;
    println!("{}Saved artifact to {}", self.prefix(), temp.display());

    Ok(ResolvedArtifact {
      path: temp.to_path_buf(),
      origin: ArtifactOrigin::Downloaded,
      _temp: Some(temp),
    })
  }

  /// Parse the build info document inside the artifact at `path`
  pub fn read_build_info(&self, path: &Path) -> ReleaseResult<BuildInfo> {
    let entry = &self.config.build_info_entry;
    let bytes = self.source.read_entry(path, entry)?.ok_or_else(|| {
      ReleaseError::Config(ConfigError::ArchiveEntryMissing {
        entry: entry.clone(),
        archive: path.to_path_buf(),
      })
    })?;
    BuildInfo::from_slice(&bytes)
  }
}
