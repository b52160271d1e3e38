use crate::core::error::{ArtifactError, ReleaseError, ReleaseResult, ResultExt};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Bytes of `entry` inside the zip at `archive`; `Ok(None)` when the entry is absent
pub fn read_zip_entry(archive: &Path, entry: &str) -> ReleaseResult<Option<Vec<u8>>> {
  let file = File::open(archive).with_context(|| format!("Failed to open {}", archive.display()))?;
  let mut zip = ZipArchive::new(file).map_err(|e| archive_error(archive, e))?;

  let mut member = match zip.by_name(entry) {
    Ok(member) => member,
    Err(ZipError::FileNotFound) => return Ok(None),
    Err(e) => return Err(archive_error(archive, e)),
  };

  let mut bytes = Vec::with_capacity(member.size() as usize);
  member
    .read_to_end(&mut bytes)
    .with_context(|| format!("Failed to read {} from {}", entry, archive.display()))?;
  Ok(Some(bytes))
}

fn archive_error(archive: &Path, err: ZipError) -> ReleaseError {
  ReleaseError::Artifact(ArtifactError::Archive {
    path: archive.to_path_buf(),
    reason: err.to_string(),
  })
}
