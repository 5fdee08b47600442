//! Message tokens
//!
//! A [`Token`] holds every language variant of one message together with an
//! optional preferred language that unqualified reads fall back to.
//!
//! # Example
//!
//! ```
//! use indexmap::IndexMap;
//! use token_i18n::Token;
//!
//! let mut translations = IndexMap::new();
//! translations.insert("en".to_string(), "Hello {name}".to_string());
//! translations.insert("fr".to_string(), "Bonjour {name}".to_string());
//!
//! let token = Token::new("greeting", translations).unwrap();
//! let greeting = token.interpolate([("name", "Ada")]);
//! assert_eq!(greeting.get(Some("fr")).unwrap(), "Bonjour Ada");
//! ```

use crate::error::{I18nError, I18nResult};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

/// `{key}` placeholder; keys never contain braces
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern is valid"));

/// Translations of a single message in several languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    tag: String,
    translations: IndexMap<String, String>,
    preferred_language: Option<String>,
}

impl Token {
    /// Create a token from its tag and language → message pairs
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::EmptyLanguage`] if any language key is empty.
    pub fn new(tag: impl Into<String>, translations: IndexMap<String, String>) -> I18nResult<Self> {
        let tag = tag.into();
        if translations.keys().any(|lang| lang.is_empty()) {
            return Err(I18nError::EmptyLanguage { tag });
        }
        Ok(Token {
            tag,
            translations,
            preferred_language: None,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn translations(&self) -> &IndexMap<String, String> {
        &self.translations
    }

    /// Languages this token has a variant for, in insertion order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    pub fn preferred_language(&self) -> Option<&str> {
        self.preferred_language.as_deref()
    }

    /// Replace the preferred language, returning the previous one.
    ///
    /// `None` clears the slot.
    pub fn set_preferred_language(&mut self, lang: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.preferred_language, lang)
    }

    /// Whether a variant exists for `lang`
    pub fn has(&self, lang: &str) -> bool {
        self.translations.contains_key(lang)
    }

    /// Whether a variant exists for every language in `langs`.
    ///
    /// An empty list is trivially satisfied.
    pub fn has_all<I, S>(&self, langs: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        langs.into_iter().all(|lang| self.has(lang.as_ref()))
    }

    /// The message in `lang`, or in the preferred language when `lang` is `None`
    ///
    /// # Errors
    ///
    /// - [`I18nError::NoPreferredLanguage`] if neither language is available
    /// - [`I18nError::MissingTranslation`] if the token has no such variant
    pub fn get(&self, lang: Option<&str>) -> I18nResult<&str> {
        let lang = lang
            .or(self.preferred_language.as_deref())
            .ok_or_else(|| I18nError::NoPreferredLanguage {
                tag: self.tag.clone(),
            })?;

        self.translations
            .get(lang)
            .map(String::as_str)
            .ok_or_else(|| I18nError::MissingTranslation {
                tag: self.tag.clone(),
                lang: lang.to_string(),
            })
    }

    /// The message in the preferred language
    pub fn stringify(&self) -> I18nResult<&str> {
        self.get(None)
    }

    /// Substitute `{key}` placeholders in every variant with context values.
    ///
    /// Returns a new token; `self` is left untouched. Placeholders without a
    /// context entry are kept verbatim, and substituted text is not scanned
    /// again.
    pub fn interpolate<I, K, V>(&self, context: I) -> Token
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        let replacements: HashMap<String, String> = context
            .into_iter()
            .map(|(key, value)| (key.as_ref().to_owned(), value.to_string()))
            .collect();
        self.substitute(&replacements)
    }

    /// Like [`Token::interpolate`], for a context given as a JSON object.
    ///
    /// Strings are used verbatim, numbers and booleans by their JSON text.
    ///
    /// # Errors
    ///
    /// [`I18nError::InvalidInterpolationValue`] for `null`, array and object
    /// values, or when `context` itself is not an object.
    pub fn interpolate_json(&self, context: &Value) -> I18nResult<Token> {
        let object = context
            .as_object()
            .ok_or_else(|| I18nError::InvalidInterpolationValue {
                key: context.to_string(),
            })?;

        let mut replacements = HashMap::with_capacity(object.len());
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    return Err(I18nError::InvalidInterpolationValue { key: key.clone() });
                }
            };
            replacements.insert(key.clone(), text);
        }
        Ok(self.substitute(&replacements))
    }

    /// Copy of this token keeping only the variants listed in `langs`, in
    /// the order requested
    pub(crate) fn restricted_to(&self, langs: &[String]) -> Token {
        let translations = langs
            .iter()
            .filter_map(|lang| {
                self.translations
                    .get(lang)
                    .map(|message| (lang.clone(), message.clone()))
            })
            .collect();
        Token {
            tag: self.tag.clone(),
            translations,
            preferred_language: self.preferred_language.clone(),
        }
    }

    fn substitute(&self, replacements: &HashMap<String, String>) -> Token {
        let translations = self
            .translations
            .iter()
            .map(|(lang, message)| {
                let replaced = PLACEHOLDER.replace_all(message, |caps: &Captures<'_>| {
                    match replacements.get(&caps[1]) {
                        Some(value) => value.clone(),
                        None => caps[0].to_string(),
                    }
                });
                (lang.clone(), replaced.into_owned())
            })
            .collect();

        Token {
            tag: self.tag.clone(),
            translations,
            preferred_language: self.preferred_language.clone(),
        }
    }
}
