//! Template storage: bootstrap from a manifest, then load from disk.
//!
//! Templates live as plain files under `.github/templates/` so users can
//! edit them directly. The manifest (`.github/templates.json`) only seeds
//! that directory: on every run each manifest entry missing from disk is
//! written out, and entries that already exist are left untouched, even
//! when the manifest has since changed. Disk is the source of truth.
//!
//! Manifest values are either a string or a list of lines:
//!
//! ```json
//! {
//!     "heading.md": "# {title}\n",
//!     "sources.md": ["## Sources", "", "Collected by {author}."]
//! }
//! ```
//!
//! A list is joined with `\n`, which keeps multi-line templates readable
//! in JSON. A missing or unreadable manifest is a warning, not an error;
//! whatever is already on disk still loads.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One manifest value: a complete template or its lines.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    Text(String),
    Lines(Vec<String>),
}

impl ManifestEntry {
    fn into_content(self) -> String {
        match self {
            ManifestEntry::Text(text) => text,
            ManifestEntry::Lines(lines) => lines.join("\n"),
        }
    }
}

/// Every template found on disk, keyed by file name, plus any warnings
/// produced while bootstrapping.
#[derive(Debug, Default)]
pub struct TemplateSet {
    pub templates: BTreeMap<String, String>,
    pub warnings: Vec<String>,
}

impl TemplateSet {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }
}

/// Bootstrap `templates_dir` from the manifest, then load every file in it.
///
/// The directory is created if absent. Manifest problems (missing file,
/// invalid JSON, an entry that is neither string nor list) degrade to
/// warnings on the returned set; only real IO failures are errors.
pub fn load_templates(
    templates_dir: &Path,
    manifest_path: &Path,
) -> Result<TemplateSet, StoreError> {
    let mut set = TemplateSet::default();
    fs::create_dir_all(templates_dir)?;

    if let Some(entries) = read_manifest(manifest_path, &mut set.warnings)? {
        for (name, content) in entries {
            let target = templates_dir.join(&name);
            if !target.exists() {
                fs::write(&target, content)?;
            }
        }
    }

    for entry in fs::read_dir(templates_dir)?.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path)?;
        set.templates.insert(name, content);
    }

    Ok(set)
}

fn read_manifest(
    path: &Path,
    warnings: &mut Vec<String>,
) -> Result<Option<BTreeMap<String, String>>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warnings.push(format!(
                "no template manifest at {}; skipping bootstrap",
                path.display()
            ));
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let manifest: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&text) {
        Ok(manifest) => manifest,
        Err(err) => {
            warnings.push(format!(
                "template manifest {} is not a JSON object ({err}); skipping bootstrap",
                path.display()
            ));
            return Ok(None);
        }
    };

    let mut entries = BTreeMap::new();
    for (name, value) in manifest {
        match serde_json::from_value::<ManifestEntry>(value) {
            Ok(entry) => {
                entries.insert(name, entry.into_content());
            }
            Err(_) => warnings.push(format!(
                "manifest entry '{name}' is neither a string nor a list of lines; skipping"
            )),
        }
    }
    Ok(Some(entries))
}
