//! Configuration and input discovery for the xqc command line.
//!
//! # Example
//!
//! ```ignore
//! use xqc::config::discover;
//!
//! let config = discover(".")?;
//! let canvas = config.new_canvas()?;
//! ```

mod manifest;
mod scanner;

use std::path::Path;

use crate::error::Result;

pub use manifest::Config;
pub use scanner::{collect_images, is_image_file, IMAGE_EXTENSIONS};

/// The name of the configuration file.
pub const CONFIG_FILENAME: &str = "xqc.yaml";

/// Load `xqc.yaml` from `root`, or the defaults if there is none.
pub fn discover(root: impl AsRef<Path>) -> Result<Config> {
    let path = root.as_ref().join(CONFIG_FILENAME);
    if path.exists() {
        Config::load(&path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_without_config() {
        let dir = tempdir().unwrap();
        assert_eq!(discover(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_discover_with_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "height: 9\n").unwrap();
        assert_eq!(discover(dir.path()).unwrap().height, 9);
    }

    #[test]
    fn test_discover_invalid_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "height: [\n").unwrap();
        assert!(discover(dir.path()).is_err());
    }
}
