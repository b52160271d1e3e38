//! Error types for sora-release with contextual messages and exit codes
//!
//! Every failure the tools can hit is routed through [`ReleaseError`]. Each
//! variant knows how to render itself and, where it helps, suggests what to
//! fix before rerunning. Reruns are safe: unchanged files are detected and
//! skipped.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for sora-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Any reported failure (bad input, missing marker, git, network, I/O)
  Failure = 1,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for sora-release
#[derive(Debug)]
pub enum ReleaseError {
  /// A required marker/field was not found, or input had the wrong shape
  Config(ConfigError),

  /// The artifact's embedded build info disagrees with the requested version
  ArtifactMismatch {
    path: PathBuf,
    version: String,
    mismatched: Vec<String>,
  },

  /// Git operation errors
  Git(GitError),

  /// Download / archive errors
  Artifact(ArtifactError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: ctx_str,
        context: Some(format!("I/O error: {}", err)),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    ExitCode::Failure
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::ArtifactMismatch { .. } => Some(
        "Delete the cached WebRTC.xcframework.zip or check that the release tag points at the expected build."
          .to_string(),
      ),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::ArtifactMismatch {
        path,
        version,
        mismatched,
      } => {
        write!(
          f,
          "Artifact at {} does not match requested version {}.",
          path.display(),
          version
        )?;
        if !mismatched.is_empty() {
          write!(f, "\nMismatched fields: {}", mismatched.join(", "))?;
        }
        Ok(())
      }
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Artifact(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<GitError> for ReleaseError {
  fn from(err: GitError) -> Self {
    ReleaseError::Git(err)
  }
}

impl From<ArtifactError> for ReleaseError {
  fn from(err: ArtifactError) -> Self {
    ReleaseError::Artifact(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<regex::Error> for ReleaseError {
  fn from(err: regex::Error) -> Self {
    ReleaseError::message(format!("Invalid pattern: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<reqwest::Error> for ReleaseError {
  fn from(err: reqwest::Error) -> Self {
    let url = err.url().map(|u| u.to_string()).unwrap_or_default();
    ReleaseError::Artifact(ArtifactError::Download {
      url,
      reason: err.to_string(),
    })
  }
}

impl From<zip::result::ZipError> for ReleaseError {
  fn from(err: zip::result::ZipError) -> Self {
    ReleaseError::message(format!("Zip archive error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ReleaseError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ReleaseError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Convert anyhow::Error to ReleaseError
impl From<anyhow::Error> for ReleaseError {
  fn from(err: anyhow::Error) -> Self {
    ReleaseError::message(err.to_string())
  }
}

/// Configuration-related errors
///
/// All of these mean "fix the inputs and rerun": a marker moved upstream, the
/// version argument has the wrong shape, or a config/build-info file is off.
#[derive(Debug)]
pub enum ConfigError {
  /// A field's anchoring regex matched nothing
  MarkerNotFound { file: PathBuf, field: String },

  /// A field's anchoring regex matched more than once
  AmbiguousMarker { file: PathBuf, field: String, count: usize },

  /// Version argument does not match the expected shape
  InvalidVersion { input: String, expected: String },

  /// Required entry missing from the artifact archive
  ArchiveEntryMissing { entry: String, archive: PathBuf },

  /// Missing required field
  MissingField { field: String },

  /// Markdown section heading not found
  SectionNotFound { file: PathBuf, heading: String },

  /// Malformed configuration file
  Parse { path: PathBuf, message: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MarkerNotFound { file, .. } | ConfigError::AmbiguousMarker { file, .. } => Some(format!(
        "The marker in {} may have been renamed or duplicated upstream. Fix the file and rerun.",
        file.display()
      )),
      ConfigError::SectionNotFound { heading, .. } => {
        Some(format!("Add a '{}' heading to the changelog and rerun.", heading))
      }
      ConfigError::InvalidVersion { expected, .. } => Some(format!("Expected something like {}", expected)),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MarkerNotFound { file, field } => {
        write!(f, "Failed to update {} in {}: marker not found", field, file.display())
      }
      ConfigError::AmbiguousMarker { file, field, count } => {
        write!(
          f,
          "Failed to update {} in {}: marker matched {} times (expected exactly once)",
          field,
          file.display(),
          count
        )
      }
      ConfigError::InvalidVersion { input, expected } => {
        write!(f, "Invalid version '{}': must look like {}", input, expected)
      }
      ConfigError::ArchiveEntryMissing { entry, archive } => {
        write!(f, "{} not found in {}", entry, archive.display())
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field: {}", field)
      }
      ConfigError::SectionNotFound { file, heading } => {
        write!(f, "{} section not found in {}", heading, file.display())
      }
      ConfigError::Parse { path, message } => {
        write!(f, "Failed to parse {}: {}", path.display(), message)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Push failed
  PushFailed {
    remote: String,
    refname: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") || reason.contains("rejected") {
          Some("The remote has commits you don't have. Pull, then rerun; the local commit and tag already exist.".to_string())
        } else if reason.contains("Permission denied") || reason.contains("403") {
          Some("Check your SSH key permissions and repository access.".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!("Run the command from inside the SDK checkout: {}", path.display())),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::PushFailed { remote, refname, reason } => {
        write!(f, "Push of {} to {} failed: {}", refname, remote, reason)
      }
    }
  }
}

/// Artifact download and archive errors
#[derive(Debug)]
pub enum ArtifactError {
  /// Transport-level failure
  Download { url: String, reason: String },

  /// Server answered with a non-success status
  HttpStatus { url: String, status: u16 },

  /// The archive could not be opened or read
  Archive { path: PathBuf, reason: String },
}

impl fmt::Display for ArtifactError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArtifactError::Download { url, reason } => write!(f, "Failed to download {}: {}", url, reason),
      ArtifactError::HttpStatus { url, status } => {
        write!(f, "Download of {} failed with HTTP status {}", url, status)
      }
      ArtifactError::Archive { path, reason } => {
        write!(f, "Failed to read artifact {}: {}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for sora-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
