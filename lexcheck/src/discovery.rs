use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub const SOURCE_EXTENSION: &str = "dzl";

pub fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_source_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) && !is_excluded(path)
}

fn is_excluded(path: &Path) -> bool {
    path.components().any(|part| {
        let text = part.as_os_str().to_string_lossy();
        text == "target" || (text.starts_with('.') && text != "." && text != "..")
    })
}
