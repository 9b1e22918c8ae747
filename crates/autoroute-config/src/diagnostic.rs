// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Turns Figment extraction errors and validation failures into miette
//! diagnostics. Unknown keys and unknown routing targets get a "did you
//! mean?" hint based on Jaro-Winkler similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches `sentinal` -> `sentinel` and `claude-3-haiko` -> `claude-3-haiku`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(autoroute::config::unknown_key),
        help("{}", format_suggestion_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(autoroute::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing (only `[[models]]` entries have any).
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(autoroute::config::missing_key),
        help("add `{key} = <value>` to your autoroute.toml")
    )]
    MissingKey { key: String },

    /// A routing target names a model that is not in the capability table.
    #[error("routing.{key} = `{model}` is not in the capability table")]
    #[diagnostic(
        code(autoroute::config::unknown_model),
        help("{}", format_suggestion_help(suggestion.as_deref(), known_models))
    )]
    UnknownRoutingTarget {
        key: String,
        model: String,
        suggestion: Option<String>,
        known_models: String,
    },

    /// A semantic validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(autoroute::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(autoroute::config::other))]
    Other(String),
}

fn format_suggestion_help(suggestion: Option<&str>, candidates: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid values: {candidates}"),
        None => format!("valid values: {candidates}"),
    }
}

impl ConfigError {
    fn from_figment(error: &figment::Error, toml_sources: &[(String, String)]) -> Self {
        use figment::error::Kind;

        match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate_key(error, field, toml_sources).unzip();
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.to_string(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: dotted_path(error).join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.clone(),
            },
            _ => ConfigError::Other(error.to_string()),
        }
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A single figment error may carry several underlying errors; each one is
/// mapped separately.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| ConfigError::from_figment(&error, toml_sources))
        .collect()
}

fn dotted_path(error: &figment::Error) -> Vec<String> {
    error.path.iter().map(ToString::to_string).collect()
}

/// Span of `field` in the TOML file that produced `error`, if we have its text.
fn locate_key(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let figment::Source::File(file) = error.metadata.as_ref()?.source.as_ref()? else {
        return None;
    };
    let file = file.display().to_string();
    let (name, content) = toml_sources.iter().find(|(name, _)| *name == file)?;

    let offset = find_key_offset(content, &dotted_path(error), field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// Only the first path segment is matched against table headers, so
/// `[[models]]` entries are searched as one section.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted = path.first().map(String::as_str);
    let mut section: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        if let Some(header) = trimmed.strip_prefix('[') {
            section = Some(header.trim_matches(|c| c == '[' || c == ']').trim());
        } else if section == wanted
            && trimmed.split_once('=').map(|(key, _)| key.trim()) == Some(field)
        {
            return Some(offset + line.len() - line.trim_start().len());
        }
        offset += line.len();
    }

    None
}

/// Suggest the closest candidate using Jaro-Winkler string similarity.
///
/// Returns `None` when no candidate clears the similarity threshold.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, candidates: &[S]) -> Option<String> {
    candidates
        .iter()
        .map(|c| (strsim::jaro_winkler(unknown, c.as_ref()), c.as_ref()))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use std::fmt::Write as _;

    let handler = miette::GraphicalReportHandler::new();
    let mut out = String::new();
    for error in errors {
        if handler.render_report(&mut out, error).is_err() {
            let _ = writeln!(out, "error: {error}");
        }
    }
    eprint!("{out}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_sentinel_for_sentinal() {
        let valid = &["enabled", "sentinel", "default_model"];
        assert_eq!(suggest_key("sentinal", valid), Some("sentinel".to_string()));
    }

    #[test]
    fn suggest_model_id_for_typo() {
        let known = &["claude-3-haiku", "claude-3-sonnet", "gpt-4"];
        assert_eq!(
            suggest_key("claude-3-haiko", known),
            Some("claude-3-haiku".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["host", "port", "log_level"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[gateway]\nport = 1\n\n[routing]\nsentinal = \"auto\"\n";
        let path = vec!["routing".to_string()];
        let o = find_key_offset(content, &path, "sentinal").unwrap();
        assert_eq!(&content[o..o + 8], "sentinal");
    }

    #[test]
    fn find_key_offset_in_array_of_tables() {
        let content = "[[models]]\nid = \"x\"\ncost = 1.0\n";
        let path = vec!["models".to_string()];
        let o = find_key_offset(content, &path, "cost").unwrap();
        assert_eq!(&content[o..o + 4], "cost");
    }

    #[test]
    fn unknown_target_help_lists_suggestion() {
        let err = ConfigError::UnknownRoutingTarget {
            key: "default_model".into(),
            model: "claude-3-haiko".into(),
            suggestion: Some("claude-3-haiku".into()),
            known_models: "claude-3-haiku, gpt-4".into(),
        };
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("did you mean `claude-3-haiku`"));
        assert!(err.to_string().contains("routing.default_model"));
    }
}
