//! # Walldocs
//!
//! A README generator for wallpaper collection repositories. Your
//! filesystem is the data source: top-level directories are categories,
//! the files inside them are wallpapers, and a handful of markdown
//! templates decide what the generated documents say.
//!
//! # Architecture: Five-Stage Pipeline
//!
//! Every `generate` run flows through five small stages:
//!
//! ```text
//! 1. Scan     <root>/          →  categories      (directories → picture lists)
//! 2. Sample   categories       →  random subsets  (root README only)
//! 3. Prime    templates + data →  rendered bodies (strategy per template name)
//! 4. Compose  rendered bodies  →  Generation      (fixed root sequence + per-category)
//! 5. Write    Generation       →  README.md + <category>/README.md   (or JSON)
//! ```
//!
//! Stages 1–4 are pure functions over owned data; only stage 5 (and the
//! template bootstrap before stage 3) touches the filesystem for writing.
//! This split exists for two reasons:
//!
//! - **Dry runs are the same run**: `--dry-run` executes stages 1–4
//!   unchanged and serializes the [`compose::Generation`] instead of
//!   writing it, so the preview is exactly what a real run would write
//!   (modulo the next run's random sample).
//! - **Testability**: every stage is exercised directly in unit tests
//!   with plain values; only the thin CLI layer needs process-level tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — discovers categories and their pictures |
//! | [`sample`] | Stage 2 — shuffles and bounds each category's pictures |
//! | [`template`] | `{name}` placeholder substitution with `{{`/`}}` escapes |
//! | [`store`] | Template bootstrap from the JSON manifest + loading from disk |
//! | [`prime`] | Stage 3 — renders each template through its strategy |
//! | [`compose`] | Stage 4/5 — assembles the `Generation` and writes or serializes it |
//! | [`config`] | `config.ini` loading: four typed knobs plus open substitution vars |
//! | [`output`] | CLI summary formatting for `scan` and `generate` |
//!
//! # Design Decisions
//!
//! ## Templates Live on Disk
//!
//! The JSON manifest only *seeds* `.github/templates/`; it never
//! overwrites. Users edit the template files directly, and edits survive
//! every later run. A template whose name matches no built-in strategy is
//! still rendered (generic substitution), so extra files are harmless.
//!
//! ## Sampled Front Page, Exhaustive Category Pages
//!
//! The root README shows `choose` random pictures per category and is
//! expected to churn on every run — that rotation is the product, not a
//! stability bug. Category READMEs list every picture, in name order, so
//! deep pages stay complete and diff-friendly.
//!
//! ## Unseeded Randomness
//!
//! Sampling draws from the process-wide RNG with no seed knob. The tool
//! regenerates documents; reproducing a specific front page has no use
//! case, and a seed option would only suggest one.
//!
//! ## Typed Config with an Open Tail
//!
//! `choose`, `exclude`, `spacing`, and `browse` are parsed into a typed
//! struct once, at load. Every other key rides along untyped and becomes
//! a substitution variable, which is how template authors add their own
//! `{title}`-style placeholders without touching this crate.

pub mod compose;
pub mod config;
pub mod output;
pub mod prime;
pub mod sample;
pub mod scan;
pub mod store;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
