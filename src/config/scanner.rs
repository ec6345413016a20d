//! Collecting image files from command line inputs.
//!
//! Directories are walked recursively for files with an image extension;
//! files named directly are always kept, whatever their extension.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions of files the importer understands.
pub const IMAGE_EXTENSIONS: [&str; 2] = ["xqst", "hex"];

/// Check whether a path has an importable extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Expand inputs into a sorted, de-duplicated list of image files.
pub fn collect_images(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_image_file(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("art/sprite.xqst")));
        assert!(is_image_file(Path::new("sprite.HEX")));
        assert!(!is_image_file(Path::new("sprite.svg")));
        assert!(!is_image_file(Path::new("xqst")));
    }

    #[test]
    fn test_collect_walks_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("one.xqst"), b"").unwrap();
        fs::write(nested.join("two.hex"), b"").unwrap();
        fs::write(nested.join("notes.txt"), b"").unwrap();

        let files = collect_images(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| is_image_file(f)));
    }

    #[test]
    fn test_collect_keeps_explicit_files() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("image.bin");
        fs::write(&odd, b"").unwrap();

        let files = collect_images(&[odd.clone(), odd.clone()]);
        assert_eq!(files, vec![odd]);
    }
}
