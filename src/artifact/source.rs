use super::archive::read_zip_entry;
use super::checksum::CHUNK_SIZE;
use crate::core::error::{ArtifactError, ReleaseError, ReleaseResult, ResultExt};
use crate::ui::progress::DownloadProgress;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

/// Where artifacts come from: fetch by URL, read an entry by path
pub trait ArtifactSource {
  /// Download `url` into `dest`, returning the number of bytes written
  fn fetch(&self, url: &str, dest: &Path) -> ReleaseResult<u64>;

  /// Bytes of `entry` in the zip at `archive`, `None` when absent
  fn read_entry(&self, archive: &Path, entry: &str) -> ReleaseResult<Option<Vec<u8>>> {
    read_zip_entry(archive, entry)
  }
}

/// Blocking HTTP download with no timeout
pub struct HttpSource {
  client: reqwest::blocking::Client,
  show_progress: bool,
}

impl HttpSource {
  pub fn new(show_progress: bool) -> ReleaseResult<Self> {
    let client = reqwest::blocking::Client::builder()
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .timeout(None::<Duration>)
      .build()?;
    Ok(Self { client, show_progress })
  }
}

impl ArtifactSource for HttpSource {
  fn fetch(&self, url: &str, dest: &Path) -> ReleaseResult<u64> {
    tracing::debug!(url, dest = %dest.display(), "starting download");
    let mut response = self.client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
      return Err(ReleaseError::Artifact(ArtifactError::HttpStatus {
        url: url.to_string(),
        status: status.as_u16(),
      }));
    }

    let mut progress = if self.show_progress {
      DownloadProgress::new(response.content_length(), "WebRTC.xcframework.zip")
    } else {
      DownloadProgress::hidden()
    };

    let file = File::create(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
    let mut writer = BufWriter::new(file);
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
      let n = response.read(&mut buf).map_err(|e| {
        ReleaseError::Artifact(ArtifactError::Download {
          url: url.to_string(),
          reason: e.to_string(),
        })
      })?;
      if n == 0 {
        break;
      }
      writer
        .write_all(&buf[..n])
        .with_context(|| format!("Failed to write {}", dest.display()))?;
      progress.advance(n);
    }
    writer
      .flush()
      .with_context(|| format!("Failed to write {}", dest.display()))?;

    tracing::debug!(url, bytes = progress.received(), "download finished");
    Ok(progress.received())
  }
}
