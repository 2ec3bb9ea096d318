// src/services/naming_service.rs
//
// Patch Name Formatter
//
// Renders the output filename for a resolved pair from a naming template
// with a closed vocabulary of placeholders.
//
// RULES:
// - Placeholder values come from the parsed releases, sanitized where the
//   variable name has no `raw_` prefix
// - An unknown placeholder is a fatal configuration error, never a
//   per-file skip
// - Sanitized output is only ever used for filenames, identity matching
//   always happens on the raw parsed text

use caseless::Caseless;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::release::ParsedRelease;
use crate::error::{AppError, AppResult};

/// Patch name layout used when no template is configured
pub const DEFAULT_PATCH_NAME_TEMPLATE: &str =
    "{name}{specifier_items[0]}_{ep}_v{v_old}v{v_new}.vcdiff";

/// Converts free text into a filesystem-and-template-safe identifier.
///
/// Unicode is decomposed and combining marks are dropped, so accented
/// letters keep their base letter. The remainder is case-folded (full
/// Unicode folding, so `ß` becomes `ss`), then everything outside `a-z`,
/// `0-9`, `_` and `-` becomes `_`. Idempotent.
pub fn neutralize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .default_case_fold()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect()
}

// ============================================================================
// PATCH NAME TEMPLATE
// ============================================================================

/// Naming template bound to the closed set of substitution variables
///
/// Placeholders use `{name}` syntax with optional `[index]` access for
/// sequence variables; `{{` and `}}` emit literal braces.
#[derive(Debug, Clone)]
pub struct PatchNameTemplate {
    template: String,
}

impl PatchNameTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Renders the patch filename for a (source, target) pair.
    ///
    /// Referencing a variable outside the vocabulary stops the whole run
    /// with a configuration error.
    pub fn render(&self, source: &ParsedRelease, target: &ParsedRelease) -> AppResult<String> {
        let mut out = String::with_capacity(self.template.len());
        let mut chars = self.template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut key = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(inner) => key.push(inner),
                            None => {
                                return Err(AppError::Template(format!(
                                    "unterminated placeholder '{{{key}'"
                                )));
                            }
                        }
                    }
                    out.push_str(&lookup(&key, source, target)?);
                }
                '}' => {
                    return Err(AppError::Template(
                        "single '}' outside a placeholder".to_string(),
                    ));
                }
                literal => out.push(literal),
            }
        }

        Ok(out)
    }
}

fn lookup(key: &str, source: &ParsedRelease, target: &ParsedRelease) -> AppResult<String> {
    let (name, index) = split_indexed_key(key)?;

    if let Some(index) = index {
        return match name {
            "specifier_items" => {
                let items = specifier_items(source);
                items.get(index).cloned().ok_or_else(|| {
                    AppError::Template(format!("index {index} is out of range for '{name}'"))
                })
            }
            _ => Err(AppError::Template(format!(
                "variable '{name}' is not indexable"
            ))),
        };
    }

    let value = match name {
        "raw_group" => source.group.clone().unwrap_or_default(),
        "raw_name" => source.name.clone(),
        "raw_ep" => source.episode.clone().unwrap_or_default(),
        "raw_specifier" => source.specifier_text().to_string(),
        "raw_ext" => source.extension.clone(),
        "group" => neutralize(source.group.as_deref().unwrap_or("")),
        "name" => neutralize(&source.name),
        "ep" => neutralize(source.episode.as_deref().unwrap_or("")),
        "specifier" => neutralize(source.specifier_text()),
        "ext" => neutralize(&source.extension),
        "type" => neutralize(&format!(
            "{}{}",
            source.specifier_text(),
            source.extension
        )),
        "v_old" => source.version.to_string(),
        "v_new" => target.version.to_string(),
        "hash_old" => source.crc.clone().unwrap_or_default(),
        "hash_new" => target.crc.clone().unwrap_or_default(),
        "specifier_items" => {
            return Err(AppError::Template(format!(
                "variable '{name}' requires an index"
            )));
        }
        _ => {
            return Err(AppError::Template(format!("unknown variable '{name}'")));
        }
    };

    Ok(value)
}

/// Splits `name[3]` into the variable name and index; plain names pass
/// through unchanged.
fn split_indexed_key(key: &str) -> AppResult<(&str, Option<usize>)> {
    let Some(open) = key.find('[') else {
        return Ok((key, None));
    };

    let name = &key[..open];
    let rest = &key[open + 1..];
    let close = rest
        .find(']')
        .ok_or_else(|| AppError::Template(format!("missing ']' in placeholder '{key}'")))?;
    if close != rest.len() - 1 {
        return Err(AppError::Template(format!(
            "trailing text after ']' in placeholder '{key}'"
        )));
    }

    let index = rest[..close]
        .parse::<usize>()
        .map_err(|_| AppError::Template(format!("invalid index in placeholder '{key}'")))?;

    Ok((name, Some(index)))
}

/// Specifier split on whitespace with every item sanitized.
/// An empty specifier still yields one empty item so `[0]` is always valid.
fn specifier_items(source: &ParsedRelease) -> Vec<String> {
    let raw = source.specifier_text();
    if raw.is_empty() {
        vec![String::new()]
    } else {
        raw.split_whitespace().map(neutralize).collect()
    }
}
