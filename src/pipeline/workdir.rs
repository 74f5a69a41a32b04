//! Per-run scratch directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Unique working directory for one run, holding the transcoded
/// intermediates and the concat manifest.
///
/// The name embeds a timestamp, the process id, and a per-process
/// sequence number, so concurrent runs sharing a temp root cannot
/// collide.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create a fresh directory under `temp_root`.
    pub fn create(temp_root: &Path) -> io::Result<Self> {
        let name = format!(
            "tagwrap-{}-{}-{}",
            chrono::Utc::now().format("%Y%m%d-%H%M%S"),
            std::process::id(),
            SEQUENCE.fetch_add(1, Ordering::Relaxed)
        );
        let path = temp_root.join(name);
        fs::create_dir_all(temp_root)?;
        fs::create_dir(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything in it. Idempotent: a
    /// directory that is already gone is not an error.
    pub fn cleanup(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
