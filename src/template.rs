//! `{name}` placeholder substitution.
//!
//! Templates are plain text with `{name}` placeholders resolved against a
//! flat string map. `{{` and `}}` render literal braces. Substitution is
//! all-or-nothing per template: the first unresolvable placeholder stops
//! the walk and becomes an error, and the caller decides what that means —
//! the generic strategy in [`crate::prime`] treats a missing variable as a
//! warn-and-keep-raw fallback, while the built-in strategies treat any
//! failure as fatal.
//!
//! Placeholder names are matched exactly, whitespace included: `{ date }`
//! looks up the key `" date "`.

use std::collections::BTreeMap;
use thiserror::Error;

/// Variable source for substitution.
pub type Vars = BTreeMap<String, String>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstituteError {
    #[error("missing variable '{name}' at offset {offset}")]
    MissingVariable { name: String, offset: usize },
    #[error("unmatched '{{' at offset {offset}")]
    UnmatchedBrace { offset: usize },
    #[error("empty placeholder at offset {offset}")]
    EmptyPlaceholder { offset: usize },
}

/// Substitute every `{name}` in `template` with its value from `vars`.
///
/// Returns the fully-substituted string, or the first error encountered.
/// A lone `}` outside an escape is passed through as-is.
pub fn substitute(template: &str, vars: &Vars) -> Result<String, SubstituteError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(SubstituteError::UnmatchedBrace { offset }),
                    }
                }
                if name.is_empty() {
                    return Err(SubstituteError::EmptyPlaceholder { offset });
                }
                match vars.get(&name) {
                    Some(value) => out.push_str(value),
                    None => return Err(SubstituteError::MissingVariable { name, offset }),
                }
            }
            '}' => {
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}
