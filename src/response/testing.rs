use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Fresh, empty directory removed when the handle drops
pub fn scratch_dir(tag: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("responder-{tag}-"))
        .tempdir()
        .expect("create scratch dir")
}

/// Write `content` at `dir/relative`, creating parent directories
pub fn write_file(dir: &Path, relative: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(&path, content).expect("write scratch file");
    path
}
