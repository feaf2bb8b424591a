//! Shared test utilities for the walldocs test suite.
//!
//! Builds throwaway wallpaper repositories in temp directories. Picture
//! files hold the string "fake image" — nothing in the pipeline decodes
//! image data, so any bytes work.

use std::collections::BTreeMap;
use std::fs;

use tempfile::TempDir;

use crate::config::GenConfig;

/// Build a repository with the given categories and picture names.
///
/// ```rust
/// let tmp = repo_with_categories(&[
///     ("abstract", &["circuit.png", "gradient.jpg"]),
///     ("nature", &["mountains.png"]),
/// ]);
/// ```
pub fn repo_with_categories(layout: &[(&str, &[&str])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (category, pictures) in layout {
        let dir = tmp.path().join(category);
        fs::create_dir_all(&dir).unwrap();
        for picture in *pictures {
            fs::write(dir.join(picture), "fake image").unwrap();
        }
    }
    tmp
}

/// A config with the given knobs, empty `exclude`, and no extra vars.
pub fn config_with(choose: usize, spacing: usize, browse: bool) -> GenConfig {
    GenConfig {
        choose,
        exclude: Vec::new(),
        spacing,
        browse,
        vars: BTreeMap::new(),
    }
}
