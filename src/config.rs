//! Run configuration from a flat INI file.
//!
//! walldocs reads a single `config.ini` (by default at
//! `<root>/.github/config.ini`) whose `[DEFAULT]` section is a flat
//! key/value mapping. Four keys are recognized and parsed into typed
//! fields once, at load time; every key, recognized or not, is also kept
//! in raw string form as a template variable.
//!
//! ```ini
//! [DEFAULT]
//! choose = 4        # max pictures sampled per category in the root README
//! exclude = wip     # colon-separated category names kept out of the root
//! spacing = 2       # newlines between document pieces
//! browse = true     # append a [Browse] link per category
//! title = My Walls  # any extra key becomes a {title} template variable
//! ```
//!
//! ## Reader subset
//!
//! The reader covers the flat-file subset this tool needs: `key = value`
//! or `key: value` assignments, `#`/`;` full-line comments, blank lines,
//! and section headers. Keys are lower-cased. Only the `[DEFAULT]`
//! section (and any assignments before the first header) contribute to
//! the mapping; other sections are ignored. Inline comments are not
//! stripped, so `color = #fff` keeps its value. Later assignments to the
//! same key win.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config line {line}: expected 'key = value', got '{text}'")]
    Malformed { line: usize, text: String },
    #[error("missing required config key '{0}'")]
    MissingKey(&'static str),
    #[error("config key '{key}' must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

/// Section whose assignments make up the configuration mapping.
const DEFAULT_SECTION: &str = "DEFAULT";

/// Typed run configuration plus the open raw mapping.
///
/// The four recognized keys are parsed exactly once, here at the load
/// boundary; a malformed number is a load error, not a mid-run surprise.
/// `vars` retains the complete raw mapping (recognized keys included) and
/// is the variable source for all template substitution. The caller
/// inserts the run date under key `date` before priming.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Maximum pictures sampled per category for the root document.
    pub choose: usize,
    /// Category names left out of the root document's body.
    pub exclude: Vec<String>,
    /// Number of newline characters in the piece separator.
    pub spacing: usize,
    /// Whether the root document gets a `[Browse]` link per category.
    pub browse: bool,
    /// Full raw key/value mapping, used for placeholder substitution.
    pub vars: BTreeMap<String, String>,
}

impl GenConfig {
    /// Build the typed config from a raw key/value mapping.
    ///
    /// `choose`, `exclude`, `spacing`, and `browse` must all be present.
    /// `exclude` is colon-split with empty segments dropped; `browse` is
    /// true iff the raw value equals `true` ignoring case.
    pub fn from_vars(vars: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let choose = parse_count(&vars, "choose")?;
        let spacing = parse_count(&vars, "spacing")?;
        let exclude = split_exclude(require(&vars, "exclude")?);
        let browse = require(&vars, "browse")?.eq_ignore_ascii_case("true");
        Ok(Self {
            choose,
            exclude,
            spacing,
            browse,
            vars,
        })
    }
}

fn require<'a>(
    vars: &'a BTreeMap<String, String>,
    key: &'static str,
) -> Result<&'a str, ConfigError> {
    vars.get(key)
        .map(String::as_str)
        .ok_or(ConfigError::MissingKey(key))
}

fn parse_count(vars: &BTreeMap<String, String>, key: &'static str) -> Result<usize, ConfigError> {
    let raw = require(vars, key)?;
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}

/// Split a colon-delimited exclude list, dropping empty segments.
///
/// An empty value excludes nothing, and stray colons are harmless:
/// `":a::b:"` yields `["a", "b"]`.
pub fn split_exclude(raw: &str) -> Vec<String> {
    raw.split(':')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load and type-check the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<GenConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    GenConfig::from_vars(parse_ini(&content)?)
}

/// Parse the flat INI subset into a raw key/value mapping.
fn parse_ini(text: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut vars = BTreeMap::new();
    // Assignments before the first header also count as DEFAULT.
    let mut in_default = true;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            let Some(section) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
                return Err(ConfigError::Malformed {
                    line: idx + 1,
                    text: line.to_string(),
                });
            };
            in_default = section.trim() == DEFAULT_SECTION;
            continue;
        }
        if !in_default {
            continue;
        }
        let Some((key, value)) = split_assignment(line) else {
            return Err(ConfigError::Malformed {
                line: idx + 1,
                text: line.to_string(),
            });
        };
        vars.insert(key.trim().to_lowercase(), value.trim().to_string());
    }

    Ok(vars)
}

/// Split on the earliest `=` or `:` in the line.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let sep = match (line.find('='), line.find(':')) {
        (Some(eq), Some(colon)) => eq.min(colon),
        (Some(eq), None) => eq,
        (None, Some(colon)) => colon,
        (None, None) => return None,
    };
    Some((&line[..sep], &line[sep + 1..]))
}

/// Returns a fully-commented sample `config.ini` with every recognized key.
///
/// Used by the `print-config` CLI command. The output parses back through
/// [`load_config`] unchanged.
pub fn sample_config_ini() -> &'static str {
    r#"# walldocs configuration
# ======================
# Flat key = value pairs in the [DEFAULT] section. The four keys below
# are required; keys are lower-cased when read. Any additional key
# becomes a {name} placeholder variable available to every template.
# The current date is injected automatically under the key 'date'.

[DEFAULT]

# Maximum number of pictures sampled per category for the root README.
# A category with fewer pictures contributes all of them.
choose = 4

# Colon-separated category names to leave out of the root README.
# Excluded categories still get their own per-category README.
exclude =

# Number of newline characters between document pieces.
spacing = 2

# Append a [Browse](../<category>/README.md) link after each category
# in the root README. Case-insensitive; anything but 'true' means no.
browse = true

# Free-form template variables. Reference them as {title}, {author}.
title = Wallpapers
author = anonymous
"#
}
