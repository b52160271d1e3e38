use crate::core::error::{ReleaseResult, ResultExt};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read size for hashing and downloads
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Lowercase hex SHA-256 of the file at `path`, read in [`CHUNK_SIZE`] blocks
pub fn sha256_file(path: &Path) -> ReleaseResult<String> {
  let mut file = File::open(path).with_context(|| format!("Failed to open {} for hashing", path.display()))?;
  let mut hasher = Sha256::new();
  let mut buf = vec![0u8; CHUNK_SIZE];

  loop {
    let n = file
      .read(&mut buf)
      .with_context(|| format!("Failed to read {}", path.display()))?;
    if n == 0 {
      break;
    }
    hasher.update(&buf[..n]);
  }

  Ok(format!("{:x}", hasher.finalize()))
}
