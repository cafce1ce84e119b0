// Snapshot grammar error

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub struct SnapshotError {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid database snapshot {}: {}",
            self.path.display(),
            self.reason
        )
    }
}

impl std::error::Error for SnapshotError {}
