use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::fs::try_exists;

use crate::error::StartupError;

/// Creates `path` (and parents) if missing. Returns `true` when it had to be created.
pub async fn ensure_output_dir(path: &Path) -> Result<bool, StartupError> {
    let to_startup_error = |source: io::Error| StartupError::OutputDir {
        path: path.to_path_buf(),
        source,
    };

    if try_exists(path).await.map_err(to_startup_error)? {
        return Ok(false);
    }

    fs::create_dir_all(path).await.map_err(to_startup_error)?;
    Ok(true)
}

/// An unreadable location counts as absent so the entry is attempted and its
/// error surfaces through the normal failure path.
pub async fn artifact_exists(path: &Path) -> bool {
    match try_exists(path).await {
        Ok(exists) => exists,
        Err(err) => {
            tracing::debug!("Failed to verify file existence for {}: {}", path.display(), err);
            false
        }
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(destination.file_name().unwrap_or_default());
    name.push(".partial");
    destination.with_file_name(name)
}

/// Writes the full image next to `destination`, then renames it into place, so
/// readers never observe a truncated file.
pub async fn write_image_atomic(destination: &Path, bytes: &[u8]) -> io::Result<u64> {
    let staging = partial_path(destination);

    if let Err(err) = fs::write(&staging, bytes).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err);
    }
    if let Err(err) = fs::rename(&staging, destination).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err);
    }

    Ok(bytes.len() as u64)
}

pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
