//! Ordered segment list for the concatenation step.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Playback-ordered list of segments, rendered as a concat-demuxer
/// manifest (one `file '<path>'` line per segment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    entries: Vec<PathBuf>,
}

impl Playlist {
    /// Wrap a main segment with a tag on both sides: tag, main, tag.
    pub fn wrap(tag: &Path, main: &Path) -> Self {
        Self {
            entries: vec![tag.to_path_buf(), main.to_path_buf(), tag.to_path_buf()],
        }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Render the manifest text consumed by the external tool.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("file '{}'\n", escape_entry(entry)))
            .collect()
    }
}

/// Escape a path for a single-quoted manifest entry. The demuxer has no
/// in-string escape for `'`: the quote is closed, a literal quote
/// emitted, and the quoting reopened.
fn escape_entry(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}
