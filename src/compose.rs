//! Assembles primed templates into the final documents.
//!
//! The root README is always the same four templates in the same order;
//! there is no configuration for the sequence. Every category README
//! comes from the `category.md` documents. Composition is pure; the two
//! sinks on [`Generation`] are the only places walldocs writes output.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::prime::{CATEGORY_TEMPLATE, Primed};

/// Root README sections, in order.
pub const ROOT_SEQUENCE: [&str; 4] = [
    "heading.md",
    "body.heading.md",
    "body.category.md",
    "sources.md",
];

/// The root document's file name.
pub const ROOT_README: &str = "README.md";

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("required template '{0}' was not primed")]
    MissingTemplate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything one run produces: the ordered root sections and the
/// per-category bodies keyed by output path. Serializes as the dry-run
/// payload.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Generation {
    pub full: Vec<String>,
    pub partial: BTreeMap<String, String>,
}

/// Pick the root sequence and the category documents out of `rendered`.
///
/// Each sequence entry must be present and text; `category.md` must be
/// present and documents. Anything else in `rendered` is ignored here.
pub fn compose(rendered: &BTreeMap<String, Primed>) -> Result<Generation, ComposeError> {
    let mut full = Vec::with_capacity(ROOT_SEQUENCE.len());
    for name in ROOT_SEQUENCE {
        let text = rendered
            .get(name)
            .and_then(Primed::as_text)
            .ok_or_else(|| ComposeError::MissingTemplate(name.to_string()))?;
        full.push(text.to_string());
    }
    let partial = rendered
        .get(CATEGORY_TEMPLATE)
        .and_then(Primed::as_documents)
        .ok_or_else(|| ComposeError::MissingTemplate(CATEGORY_TEMPLATE.to_string()))?
        .clone();
    Ok(Generation { full, partial })
}

impl Generation {
    /// The dry-run payload: one JSON object, keys `full` and `partial`.
    pub fn to_json(&self) -> Result<String, ComposeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the root README and every category README under `root`.
    ///
    /// Root sections are joined by `spacing` newlines. No directories are
    /// created: partial paths point into directories the scan just saw.
    pub fn write(&self, root: &Path, spacing: usize) -> Result<(), ComposeError> {
        let separator = "\n".repeat(spacing);
        fs::write(root.join(ROOT_README), self.full.join(separator.as_str()))?;
        for (rel_path, body) in &self.partial {
            fs::write(root.join(rel_path), body)?;
        }
        Ok(())
    }
}
