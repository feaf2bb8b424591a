//! Category discovery.
//!
//! walldocs treats the repository root as the data source: every top-level
//! directory is a category, and every entry inside a category directory is
//! a picture. There is no recursion and no extension filtering; the single
//! reserved name is `README.md`, which is what this tool generates into
//! each category and must never list as a picture.
//!
//! ```text
//! wallpapers/                    # Repository root
//! ├── .github/                   # Hidden, skipped (config + templates)
//! ├── abstract/                  # Category
//! │   ├── README.md              # Generated output, not a picture
//! │   ├── circuit.png
//! │   └── gradient.jpg
//! └── nature/                    # Category
//!     └── mountains.png
//! ```
//!
//! Scans are taken fresh from the filesystem on every call. The two
//! priming strategies each scan independently, so a tree that changes
//! mid-run can legitimately produce different views; callers tolerate
//! that rather than guard against it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Name reserved for generated documents; never listed as a picture.
pub const CATEGORY_README: &str = "README.md";

/// Categories mapped to their picture entries, in name order.
pub type Categories = BTreeMap<String, Vec<Picture>>;

/// A picture entry: the bare file name within its category directory.
///
/// Both substitution forms come from here. The string form is the name as
/// stored (`mountains.png`), the stem drops the final extension
/// (`mountains`). Templates combine them with `{category}` to build
/// whatever path shape they need.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Picture {
    name: String,
}

impl Picture {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The file name as stored, relative to its category directory.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// File name without the final extension.
    ///
    /// `archive.tar.gz` keeps its inner extension (`archive.tar`), and a
    /// name without any extension is returned whole.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }
}

/// Discover categories directly under `root`.
///
/// A directory is a category iff its name does not start with `.` and is
/// not listed in `exclude`. Plain files at the root are ignored. Each
/// category's pictures are every entry except [`CATEGORY_README`], sorted
/// by name; random order, where wanted, is the sampler's job.
pub fn scan_categories(root: &Path, exclude: &[String]) -> Result<Categories, ScanError> {
    let mut categories = Categories::new();
    for entry in fs::read_dir(root)?.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || exclude.contains(&name) {
            continue;
        }
        let pictures = list_pictures(&path)?;
        categories.insert(name, pictures);
    }
    Ok(categories)
}

fn list_pictures(dir: &Path) -> Result<Vec<Picture>, ScanError> {
    let mut pictures: Vec<Picture> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name != CATEGORY_README)
        .map(Picture::new)
        .collect();
    pictures.sort();
    Ok(pictures)
}
