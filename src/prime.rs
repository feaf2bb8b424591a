//! Turns loaded templates into document bodies.
//!
//! Every template in the set is primed, and the template's *name* picks
//! the strategy:
//!
//! | name               | strategy           | produces                      |
//! |--------------------|--------------------|-------------------------------|
//! | `body.category.md` | body sample        | one text block per run        |
//! | `category.md`      | category documents | one body per category README  |
//! | anything else      | generic            | config-substituted text       |
//!
//! The two named strategies scan the repository themselves and substitute
//! per picture, so their placeholder sets go beyond the config keys:
//!
//! - body sample: `{category}`, `{random}` (picture name), `{random_stem}`
//!   on top of the config mapping. A `category` key in the config shadows
//!   the implicit one; `random`/`random_stem` always refer to the picture.
//! - category documents: `{category}`, `{filepath}`, `{filename}` on top
//!   of the config mapping, and here the implicit keys win over config.
//!
//! Only the generic strategy tolerates a missing variable (warning, raw
//! text kept). In the named strategies a missing variable means the
//! per-picture template cannot do its one job, so it is a hard error.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::config::GenConfig;
use crate::sample::sample;
use crate::scan::{ScanError, scan_categories};
use crate::store::TemplateSet;
use crate::template::{SubstituteError, substitute};

/// Template rendered once per sampled picture into the root document.
pub const BODY_TEMPLATE: &str = "body.category.md";
/// Template rendered once per picture into each category README.
pub const CATEGORY_TEMPLATE: &str = "category.md";
/// Optional heading template for category READMEs.
pub const CATEGORY_HEADER_TEMPLATE: &str = "category.header.md";

/// Heading used when no `category.header.md` template exists.
pub const DEFAULT_CATEGORY_HEADER: &str = "# {category}\n\n";

#[derive(Error, Debug)]
pub enum PrimeError {
    #[error("could not scan categories: {0}")]
    Scan(#[from] ScanError),
    #[error("template {template}: {source}")]
    Substitute {
        template: String,
        source: SubstituteError,
    },
}

/// A primed template: plain text, or one body per output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primed {
    Text(String),
    Documents(BTreeMap<String, String>),
}

impl Primed {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Primed::Text(text) => Some(text),
            Primed::Documents(_) => None,
        }
    }

    pub fn as_documents(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Primed::Text(_) => None,
            Primed::Documents(documents) => Some(documents),
        }
    }
}

/// Every template primed, keyed by template name, plus accumulated
/// warnings in priming order.
#[derive(Debug)]
pub struct PrimeOutcome {
    pub rendered: BTreeMap<String, Primed>,
    pub warnings: Vec<String>,
}

/// Prime every template in `templates` against the repository at `root`.
pub fn prime(
    root: &Path,
    config: &GenConfig,
    templates: &TemplateSet,
) -> Result<PrimeOutcome, PrimeError> {
    let mut ctx = RenderContext {
        root,
        config,
        templates,
        warnings: Vec::new(),
    };
    let mut rendered = BTreeMap::new();
    for (name, content) in &templates.templates {
        let primed = strategy_for(name).render(name, content, &mut ctx)?;
        rendered.insert(name.clone(), primed);
    }
    Ok(PrimeOutcome {
        rendered,
        warnings: ctx.warnings,
    })
}

/// Shared inputs for one priming run.
struct RenderContext<'a> {
    root: &'a Path,
    config: &'a GenConfig,
    templates: &'a TemplateSet,
    warnings: Vec<String>,
}

trait Render {
    fn render(
        &self,
        name: &str,
        content: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Primed, PrimeError>;
}

fn strategy_for(name: &str) -> &'static dyn Render {
    match name {
        BODY_TEMPLATE => &BodySample,
        CATEGORY_TEMPLATE => &CategoryDocuments,
        _ => &Generic,
    }
}

fn substitute_in(
    template_name: &str,
    content: &str,
    vars: &BTreeMap<String, String>,
) -> Result<String, PrimeError> {
    substitute(content, vars).map_err(|source| PrimeError::Substitute {
        template: template_name.to_string(),
        source,
    })
}

/// Root-document body: a random sample of each non-excluded category.
struct BodySample;

impl Render for BodySample {
    fn render(
        &self,
        name: &str,
        content: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Primed, PrimeError> {
        let categories = sample(
            scan_categories(ctx.root, &ctx.config.exclude)?,
            ctx.config.choose,
        );
        let spacing = "\n".repeat(ctx.config.spacing);
        let mut pieces = Vec::new();
        for (category, pictures) in &categories {
            let mut vars = ctx.config.vars.clone();
            // Config wins here: an explicit `category` value overrides the
            // directory name for substitution (never for the heading).
            vars.entry("category".to_string())
                .or_insert_with(|| category.clone());
            pieces.push(format!("## {category}{spacing}"));
            for picture in pictures {
                vars.insert("random".to_string(), picture.as_str().to_string());
                vars.insert("random_stem".to_string(), picture.stem().to_string());
                pieces.push(substitute_in(name, content, &vars)?);
            }
            if ctx.config.browse {
                pieces.push(format!("[Browse](../{category}/README.md){spacing}"));
            }
        }
        Ok(Primed::Text(pieces.join(spacing.as_str())))
    }
}

/// One README body per category, covering every picture.
///
/// Unlike the body sample this never filters by `exclude`: a category
/// kept off the front page still gets its own README.
struct CategoryDocuments;

impl Render for CategoryDocuments {
    fn render(
        &self,
        name: &str,
        content: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Primed, PrimeError> {
        let categories = scan_categories(ctx.root, &[])?;
        let header = ctx
            .templates
            .get(CATEGORY_HEADER_TEMPLATE)
            .unwrap_or(DEFAULT_CATEGORY_HEADER);
        let spacing = "\n".repeat(ctx.config.spacing);
        let mut documents = BTreeMap::new();
        for (category, pictures) in &categories {
            let mut vars = ctx.config.vars.clone();
            // Implicit keys win here, the mirror image of the body rules.
            vars.insert("category".to_string(), category.clone());
            let mut body = substitute_in(CATEGORY_HEADER_TEMPLATE, header, &vars)?;
            for picture in pictures {
                vars.insert("filepath".to_string(), picture.as_str().to_string());
                vars.insert("filename".to_string(), picture.stem().to_string());
                body.push_str(&substitute_in(name, content, &vars)?);
                body.push_str(&spacing);
            }
            documents.insert(format!("{category}/README.md"), body);
        }
        Ok(Primed::Documents(documents))
    }
}

/// Plain substitution against the config mapping.
struct Generic;

impl Render for Generic {
    fn render(
        &self,
        name: &str,
        content: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Primed, PrimeError> {
        match substitute(content, &ctx.config.vars) {
            Ok(rendered) => Ok(Primed::Text(rendered)),
            Err(SubstituteError::MissingVariable { name: variable, .. }) => {
                ctx.warnings.push(format!(
                    "template {name} needs variable '{variable}' that's not in config; using it as-is"
                ));
                Ok(Primed::Text(content.to_string()))
            }
            Err(source) => Err(PrimeError::Substitute {
                template: name.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{config_with, repo_with_categories};

    fn template_set(entries: &[(&str, &str)]) -> TemplateSet {
        let mut set = TemplateSet::default();
        for (name, content) in entries {
            set.templates.insert(name.to_string(), content.to_string());
        }
        set
    }

    // =========================================================================
    // Generic strategy
    // =========================================================================

    #[test]
    fn generic_substitutes_config_vars() {
        let tmp = repo_with_categories(&[]);
        let mut config = config_with(1, 1, false);
        config.vars.insert("title".to_string(), "Walls".to_string());
        let set = template_set(&[("heading.md", "# {title}\n")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(outcome.rendered["heading.md"].as_text(), Some("# Walls\n"));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn generic_missing_variable_keeps_raw_text_with_one_warning() {
        let tmp = repo_with_categories(&[]);
        let config = config_with(1, 1, false);
        let set = template_set(&[("heading.md", "# {title}\n")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(outcome.rendered["heading.md"].as_text(), Some("# {title}\n"));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("heading.md"));
        assert!(outcome.warnings[0].contains("'title'"));
    }

    #[test]
    fn generic_syntax_error_is_fatal() {
        let tmp = repo_with_categories(&[]);
        let config = config_with(1, 1, false);
        let set = template_set(&[("heading.md", "broken {tail")]);

        let err = prime(tmp.path(), &config, &set).unwrap_err();
        assert!(matches!(
            err,
            PrimeError::Substitute { template, .. } if template == "heading.md"
        ));
    }

    #[test]
    fn template_without_placeholders_passes_through() {
        let tmp = repo_with_categories(&[]);
        let config = config_with(1, 1, false);
        let set = template_set(&[("sources.md", "## Sources\n")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(
            outcome.rendered["sources.md"].as_text(),
            Some("## Sources\n")
        );
        assert!(outcome.warnings.is_empty());
    }

    // =========================================================================
    // Body strategy
    // =========================================================================

    #[test]
    fn body_samples_one_picture_per_category() {
        let tmp = repo_with_categories(&[("a", &["x.png", "y.png"]), ("b", &["z.png"])]);
        let config = config_with(1, 1, false);
        let set = template_set(&[(BODY_TEMPLATE, "- {random}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        let text = outcome.rendered[BODY_TEMPLATE].as_text().unwrap();
        assert!(text.starts_with("## a\n\n- "));
        assert!(text.contains("\n## b\n\n- z.png"));
        let picked_x = text.contains("x.png");
        let picked_y = text.contains("y.png");
        assert!(picked_x ^ picked_y, "exactly one of x/y expected: {text:?}");
        assert!(!text.contains("[Browse]"));
    }

    #[test]
    fn body_appends_browse_links_when_enabled() {
        let tmp = repo_with_categories(&[("a", &["x.png"])]);
        let config = config_with(1, 1, true);
        let set = template_set(&[(BODY_TEMPLATE, "- {random}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(
            outcome.rendered[BODY_TEMPLATE].as_text(),
            Some("## a\n\n- x.png\n[Browse](../a/README.md)\n")
        );
    }

    #[test]
    fn body_with_choose_zero_is_headings_only() {
        let tmp = repo_with_categories(&[("a", &["x.png"]), ("b", &["y.png"])]);
        let config = config_with(0, 1, false);
        let set = template_set(&[(BODY_TEMPLATE, "- {random}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(
            outcome.rendered[BODY_TEMPLATE].as_text(),
            Some("## a\n\n## b\n")
        );
    }

    #[test]
    fn body_with_zero_spacing_concatenates_pieces() {
        let tmp = repo_with_categories(&[("a", &["x.png"])]);
        let config = config_with(1, 0, true);
        let set = template_set(&[(BODY_TEMPLATE, "- {random}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(
            outcome.rendered[BODY_TEMPLATE].as_text(),
            Some("## a- x.png[Browse](../a/README.md)")
        );
    }

    #[test]
    fn body_skips_excluded_categories() {
        let tmp = repo_with_categories(&[("nature", &["n.png"]), ("wip", &["w.png"])]);
        let mut config = config_with(5, 1, false);
        config.exclude = vec!["wip".to_string()];
        let set = template_set(&[(BODY_TEMPLATE, "- {random}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        let text = outcome.rendered[BODY_TEMPLATE].as_text().unwrap();
        assert!(text.contains("## nature"));
        assert!(!text.contains("## wip"));
    }

    #[test]
    fn body_config_category_overrides_implicit() {
        let tmp = repo_with_categories(&[("a", &["x.png"])]);
        let mut config = config_with(1, 1, false);
        config
            .vars
            .insert("category".to_string(), "shared".to_string());
        let set = template_set(&[(BODY_TEMPLATE, "{category} {random}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        // The heading still uses the directory name.
        assert_eq!(
            outcome.rendered[BODY_TEMPLATE].as_text(),
            Some("## a\n\nshared x.png")
        );
    }

    #[test]
    fn body_random_keys_always_name_the_picture() {
        let tmp = repo_with_categories(&[("a", &["x.png"])]);
        let mut config = config_with(1, 1, false);
        config
            .vars
            .insert("random".to_string(), "decoy.png".to_string());
        config
            .vars
            .insert("random_stem".to_string(), "decoy".to_string());
        let set = template_set(&[(BODY_TEMPLATE, "{random} {random_stem}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        let text = outcome.rendered[BODY_TEMPLATE].as_text().unwrap();
        assert!(text.contains("x.png x"));
        assert!(!text.contains("decoy"));
    }

    #[test]
    fn body_missing_variable_is_fatal() {
        let tmp = repo_with_categories(&[("a", &["x.png"])]);
        let config = config_with(1, 1, false);
        let set = template_set(&[(BODY_TEMPLATE, "- {snake}")]);

        let err = prime(tmp.path(), &config, &set).unwrap_err();
        assert!(matches!(
            err,
            PrimeError::Substitute { template, .. } if template == BODY_TEMPLATE
        ));
    }

    #[test]
    fn body_browse_link_follows_empty_category() {
        let tmp = repo_with_categories(&[("a", &[])]);
        let config = config_with(3, 1, true);
        let set = template_set(&[(BODY_TEMPLATE, "- {random}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(
            outcome.rendered[BODY_TEMPLATE].as_text(),
            Some("## a\n\n[Browse](../a/README.md)\n")
        );
    }

    #[test]
    fn missing_root_is_fatal() {
        let tmp = repo_with_categories(&[]);
        let config = config_with(1, 1, false);
        let set = template_set(&[(BODY_TEMPLATE, "- {random}")]);

        let err = prime(&tmp.path().join("gone"), &config, &set).unwrap_err();
        assert!(matches!(err, PrimeError::Scan(_)));
    }

    // =========================================================================
    // Category strategy
    // =========================================================================

    #[test]
    fn category_documents_cover_every_picture_in_order() {
        let tmp = repo_with_categories(&[("nature", &["a.png", "b.png"])]);
        let config = config_with(0, 2, false);
        let set = template_set(&[(CATEGORY_TEMPLATE, "- {filepath} as {filename}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        let documents = outcome.rendered[CATEGORY_TEMPLATE].as_documents().unwrap();
        // choose=0 on purpose: the category strategy never samples.
        assert_eq!(
            documents["nature/README.md"],
            "# nature\n\n- a.png as a\n\n- b.png as b\n\n"
        );
    }

    #[test]
    fn category_documents_keyed_by_output_path() {
        let tmp = repo_with_categories(&[("a", &["x.png"]), ("b", &["y.png"])]);
        let config = config_with(1, 1, false);
        let set = template_set(&[(CATEGORY_TEMPLATE, "- {filename}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        let documents = outcome.rendered[CATEGORY_TEMPLATE].as_documents().unwrap();
        let paths: Vec<&str> = documents.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["a/README.md", "b/README.md"]);
    }

    #[test]
    fn category_ignores_exclude() {
        let tmp = repo_with_categories(&[("nature", &["n.png"]), ("wip", &["w.png"])]);
        let mut config = config_with(1, 1, false);
        config.exclude = vec!["wip".to_string()];
        let set = template_set(&[(CATEGORY_TEMPLATE, "- {filename}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        let documents = outcome.rendered[CATEGORY_TEMPLATE].as_documents().unwrap();
        assert!(documents.contains_key("wip/README.md"));
    }

    #[test]
    fn category_header_template_overrides_default() {
        let tmp = repo_with_categories(&[("nature", &["a.png"])]);
        let config = config_with(1, 1, false);
        let set = template_set(&[
            (CATEGORY_TEMPLATE, "- {filename}"),
            (CATEGORY_HEADER_TEMPLATE, "Gallery {category}\n"),
        ]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        let documents = outcome.rendered[CATEGORY_TEMPLATE].as_documents().unwrap();
        assert_eq!(documents["nature/README.md"], "Gallery nature\n- a\n");
    }

    #[test]
    fn category_implicit_keys_override_config() {
        let tmp = repo_with_categories(&[("nature", &["x.png"])]);
        let mut config = config_with(1, 1, false);
        config
            .vars
            .insert("category".to_string(), "shared".to_string());
        let set = template_set(&[(CATEGORY_TEMPLATE, "- {category}/{filepath}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        let documents = outcome.rendered[CATEGORY_TEMPLATE].as_documents().unwrap();
        assert_eq!(
            documents["nature/README.md"],
            "# nature\n\n- nature/x.png\n"
        );
    }

    #[test]
    fn category_bad_header_syntax_is_fatal() {
        let tmp = repo_with_categories(&[("nature", &["a.png"])]);
        let config = config_with(1, 1, false);
        let set = template_set(&[
            (CATEGORY_TEMPLATE, "- {filename}"),
            (CATEGORY_HEADER_TEMPLATE, "# {category"),
        ]);

        let err = prime(tmp.path(), &config, &set).unwrap_err();
        assert!(matches!(
            err,
            PrimeError::Substitute { template, .. } if template == CATEGORY_HEADER_TEMPLATE
        ));
    }

    // =========================================================================
    // Whole-set behavior
    // =========================================================================

    #[test]
    fn every_template_is_primed() {
        let tmp = repo_with_categories(&[("a", &["x.png"])]);
        let config = config_with(1, 1, false);
        let set = template_set(&[
            ("sources.md", "## Sources\n"),
            (BODY_TEMPLATE, "- {random}"),
            (CATEGORY_TEMPLATE, "- {filename}"),
        ]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(outcome.rendered.len(), 3);
        assert!(outcome.rendered["sources.md"].as_text().is_some());
        assert!(outcome.rendered[BODY_TEMPLATE].as_text().is_some());
        assert!(outcome.rendered[CATEGORY_TEMPLATE].as_documents().is_some());
    }

    #[test]
    fn header_template_primes_standalone_with_warning() {
        // category.header.md is itself a file in the set, so the generic
        // strategy sees it too; its {category} is per-category data, not
        // config, hence the warning. Long-standing behavior worth pinning.
        let tmp = repo_with_categories(&[("nature", &["a.png"])]);
        let config = config_with(1, 1, false);
        let set = template_set(&[
            (CATEGORY_TEMPLATE, "- {filename}"),
            (CATEGORY_HEADER_TEMPLATE, "# {category}\n\n"),
        ]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(
            outcome.rendered[CATEGORY_HEADER_TEMPLATE].as_text(),
            Some("# {category}\n\n")
        );
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains(CATEGORY_HEADER_TEMPLATE));
    }

    #[test]
    fn warnings_accumulate_across_templates() {
        let tmp = repo_with_categories(&[]);
        let config = config_with(1, 1, false);
        let set = template_set(&[("a.md", "{one}"), ("b.md", "{two}")]);

        let outcome = prime(tmp.path(), &config, &set).unwrap();
        assert_eq!(outcome.warnings.len(), 2);
    }
}
