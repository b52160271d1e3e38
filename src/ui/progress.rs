//! Download progress
//!
//! Uses `linya` for allocation-free progress bars on stderr

use linya::{Bar, Progress};

/// Bytes between debug log lines when the total size is unknown
const LOG_EVERY: u64 = 8 * 1024 * 1024;

/// Progress for one artifact download
///
/// Draws a bar when the server reports a length; otherwise logs a running
/// byte count at debug level.
pub struct DownloadProgress {
  bar: Option<(Progress, Bar)>,
  received: u64,
  last_logged: u64,
}

impl DownloadProgress {
  pub fn new(total: Option<u64>, label: impl Into<String>) -> Self {
    let bar = total.filter(|&t| t > 0).map(|t| {
      let mut progress = Progress::new();
      let bar = progress.bar(t as usize, label.into());
      (progress, bar)
    });
    Self {
      bar,
      received: 0,
      last_logged: 0,
    }
  }

  /// Disabled progress: only debug logging
  pub fn hidden() -> Self {
    Self::new(None, "")
  }

  /// Record `n` more bytes
  pub fn advance(&mut self, n: usize) {
    self.received += n as u64;
    match &mut self.bar {
      Some((progress, bar)) => progress.inc_and_draw(bar, n),
      None => {
        if self.received - self.last_logged >= LOG_EVERY {
          tracing::debug!(bytes = self.received, "download in progress");
          self.last_logged = self.received;
        }
      }
    }
  }

  pub fn received(&self) -> u64 {
    self.received
  }
}
