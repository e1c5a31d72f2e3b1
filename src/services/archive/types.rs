use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extension of packed XFL projects.
pub const PROJECT_EXTENSION: &str = "fla";

/// Detect a packed project from its file extension.
pub fn is_project_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(PROJECT_EXTENSION))
        .unwrap_or(false)
}

/// `<dir>.fla` next to the project directory.
pub fn archive_path_for(project_dir: &Path) -> PathBuf {
    let mut path = project_dir.as_os_str().to_owned();
    path.push(".");
    path.push(PROJECT_EXTENSION);
    PathBuf::from(path)
}

/// Result of an extraction operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub dest_path: PathBuf,
    pub files_extracted: usize,
    /// The end-of-central-directory record had to be patched.
    pub repaired: bool,
}
