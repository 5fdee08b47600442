//! Language identifiers and translation direction specs

use crate::error::{I18nError, I18nResult};
use serde_json::Value;
use tracing::debug;

/// Validate a language key taken from a translation spec
///
/// Any non-empty key is accepted, matching the keys stores can hold
/// (`en`, `pt-BR`, `sr@latin`).
///
/// # Errors
///
/// [`I18nError::InvalidLanguageSpec`] if the key is empty.
pub fn validate_language(lang: &str) -> I18nResult<()> {
    if lang.is_empty() {
        return Err(I18nError::InvalidLanguageSpec(
            "language identifier is empty".to_string(),
        ));
    }
    Ok(())
}

/// Which language to translate from, and into which languages.
///
/// Built from caller input through the `From` conversions or
/// [`LangSpec::from_json`]; checked by [`LangSpec::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LangSpec {
    /// Only the origin language; the target is the preferred language
    Origin(String),
    /// Origin → targets entries. Exactly one entry resolves.
    Mapping(Vec<(String, Vec<String>)>),
}

impl LangSpec {
    /// Build a mapping spec from any number of `origin → targets` entries.
    pub fn mapping<I, K, T, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LangSpec::Mapping(
            entries
                .into_iter()
                .map(|(from, to)| (from.into(), to.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// Parse a spec from dynamic input.
    ///
    /// A string is an origin language. An object maps the origin language to
    /// either a target string or an array of target strings.
    ///
    /// # Errors
    ///
    /// - [`I18nError::AmbiguousOriginLanguage`] for an object with more than one entry
    /// - [`I18nError::InvalidLanguageSpec`] for any other shape
    pub fn from_json(value: &Value) -> I18nResult<Self> {
        match value {
            Value::String(from) => Ok(LangSpec::Origin(from.clone())),
            Value::Object(entries) if entries.len() > 1 => {
                Err(I18nError::AmbiguousOriginLanguage {
                    count: entries.len(),
                })
            }
            Value::Object(entries) => {
                let mut mapping = Vec::with_capacity(entries.len());
                for (from, to) in entries {
                    let targets = match to {
                        Value::String(lang) => vec![lang.clone()],
                        Value::Array(langs) => langs
                            .iter()
                            .map(|lang| {
                                lang.as_str().map(str::to_string).ok_or_else(|| {
                                    I18nError::InvalidLanguageSpec(format!(
                                        "target language must be a string, got {}",
                                        lang
                                    ))
                                })
                            })
                            .collect::<I18nResult<Vec<_>>>()?,
                        other => {
                            return Err(I18nError::InvalidLanguageSpec(format!(
                                "targets for '{}' must be a string or an array of strings, got {}",
                                from, other
                            )));
                        }
                    };
                    mapping.push((from.clone(), targets));
                }
                Ok(LangSpec::Mapping(mapping))
            }
            other => Err(I18nError::InvalidLanguageSpec(format!(
                "expected a language or an origin → target mapping, got {}",
                other
            ))),
        }
    }

    /// Normalize into `(from, to)`, taking the target from `preferred` for an
    /// origin-only spec.
    ///
    /// # Errors
    ///
    /// - [`I18nError::NoPreferredLanguageSet`] for an origin-only spec without `preferred`
    /// - [`I18nError::MissingLanguageSpec`] for an empty mapping
    /// - [`I18nError::AmbiguousOriginLanguage`] for more than one mapping entry
    /// - [`I18nError::InvalidLanguageSpec`] for an empty language or an empty target list
    pub fn resolve(self, preferred: Option<&str>) -> I18nResult<(String, Vec<String>)> {
        let (from, to) = match self {
            LangSpec::Origin(from) => {
                let to = preferred.ok_or(I18nError::NoPreferredLanguageSet)?;
                (from, vec![to.to_string()])
            }
            LangSpec::Mapping(mut entries) => match entries.len() {
                0 => return Err(I18nError::MissingLanguageSpec),
                1 => entries.swap_remove(0),
                count => return Err(I18nError::AmbiguousOriginLanguage { count }),
            },
        };

        validate_language(&from)?;
        if to.is_empty() {
            return Err(I18nError::InvalidLanguageSpec(format!(
                "no target language given for '{}'",
                from
            )));
        }
        for lang in &to {
            validate_language(lang)?;
        }

        debug!(from = %from, to = ?to, "Resolved language spec");
        Ok((from, to))
    }
}

impl From<&str> for LangSpec {
    fn from(from: &str) -> Self {
        LangSpec::Origin(from.to_string())
    }
}

impl From<String> for LangSpec {
    fn from(from: String) -> Self {
        LangSpec::Origin(from)
    }
}

impl From<(&str, &str)> for LangSpec {
    fn from((from, to): (&str, &str)) -> Self {
        LangSpec::mapping([(from, [to])])
    }
}

impl From<(&str, &[&str])> for LangSpec {
    fn from((from, to): (&str, &[&str])) -> Self {
        LangSpec::mapping([(from, to.iter().copied())])
    }
}

impl<const N: usize> From<(&str, [&str; N])> for LangSpec {
    fn from((from, to): (&str, [&str; N])) -> Self {
        LangSpec::mapping([(from, to)])
    }
}

impl From<(&str, Vec<&str>)> for LangSpec {
    fn from((from, to): (&str, Vec<&str>)) -> Self {
        LangSpec::mapping([(from, to)])
    }
}
