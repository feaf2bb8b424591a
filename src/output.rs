//! CLI output formatting for the scan and write summaries.
//!
//! Each summary has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Warnings are not
//! handled here; the CLI prints those to stderr as they surface.
//!
//! ## Scan
//!
//! ```text
//! Categories
//!     001 abstract (12 pictures)
//!     002 nature (31 pictures)
//! 2 categories, 43 pictures
//! ```
//!
//! ## Generate
//!
//! ```text
//! README.md (4 sections)
//!     001 abstract → abstract/README.md
//!     002 nature → nature/README.md
//! Wrote 3 files
//! ```

use crate::compose::Generation;
use crate::scan::Categories;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format the category inventory a `scan` run discovered.
pub fn format_scan_summary(categories: &Categories) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Categories".to_string());
    let mut total = 0;
    for (i, (name, pictures)) in categories.iter().enumerate() {
        total += pictures.len();
        lines.push(format!(
            "    {} {} ({} pictures)",
            format_index(i + 1),
            name,
            pictures.len()
        ));
    }
    lines.push(format!(
        "{} categories, {} pictures",
        categories.len(),
        total
    ));
    lines
}

/// Format what a `generate` run wrote: the root README and each
/// category README with its output path.
pub fn format_write_summary(generation: &Generation) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("README.md ({} sections)", generation.full.len()));
    for (i, path) in generation.partial.keys().enumerate() {
        let category = path.split('/').next().unwrap_or(path);
        lines.push(format!(
            "    {} {} \u{2192} {}",
            format_index(i + 1),
            category,
            path
        ));
    }
    lines.push(format!("Wrote {} files", generation.partial.len() + 1));
    lines
}

/// Print the scan summary to stdout.
pub fn print_scan_summary(categories: &Categories) {
    for line in format_scan_summary(categories) {
        println!("{}", line);
    }
}

/// Print the write summary to stdout.
pub fn print_write_summary(generation: &Generation) {
    for line in format_write_summary(generation) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
