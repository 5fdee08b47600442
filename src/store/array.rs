use crate::error::{I18nError, I18nResult};
use crate::store::Store;
use crate::token::Token;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Token store backed by an in-memory map of tag → language → message
#[derive(Debug, Clone, Default)]
pub struct ArrayStore {
    tokens: IndexMap<String, Token>,
}

impl ArrayStore {
    /// Create a store from a two-level map where the first key is the tag of
    /// the token and the second key the language of each translation.
    ///
    /// # Errors
    ///
    /// [`I18nError::EmptyLanguage`] if a token has an empty language key.
    pub fn new(tokens: IndexMap<String, IndexMap<String, String>>) -> I18nResult<Self> {
        let tokens = tokens
            .into_iter()
            .map(|(tag, translations)| -> I18nResult<(String, Token)> {
                let token = Token::new(tag.clone(), translations)?;
                Ok((tag, token))
            })
            .collect::<I18nResult<IndexMap<_, _>>>()?;
        debug!(count = tokens.len(), "Created array store");
        Ok(ArrayStore { tokens })
    }

    /// Create a store from JSON of the form
    /// `{"tag": {"lang": "message", ...}, ...}`.
    ///
    /// Equivalent to decoding the JSON and passing the result to
    /// [`ArrayStore::new`].
    pub fn from_json(json: &str) -> I18nResult<Self> {
        let tokens: IndexMap<String, IndexMap<String, String>> = serde_json::from_str(json)?;
        Self::new(tokens)
    }

    /// Load a store from a JSON file in the [`ArrayStore::from_json`] format.
    ///
    /// Top-level keys starting with `@` (such as `@metadata`) are ignored.
    pub fn from_file(path: &Path) -> I18nResult<Self> {
        let content = fs::read_to_string(path)?;
        let raw: IndexMap<String, Value> = serde_json::from_str(&content)?;

        let mut tokens = IndexMap::with_capacity(raw.len());
        for (tag, value) in raw {
            if tag.starts_with('@') {
                continue;
            }
            let translations: IndexMap<String, String> = serde_json::from_value(value)?;
            tokens.insert(tag, translations);
        }

        debug!(path = %path.display(), "Loaded tokens from file");
        Self::new(tokens)
    }

    /// Load a store from a directory of per-language message files.
    ///
    /// Every `*.json` file maps message keys to text; its file stem is the
    /// language (`fr.json` → `fr`). Keys starting with `@` and non-string
    /// values are skipped. Files are read in name order.
    pub fn from_locale_dir(dir: &Path) -> I18nResult<Self> {
        let mut paths = fs::read_dir(dir)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.retain(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"));
        paths.sort();

        let mut tokens: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        for path in &paths {
            let Some(lang) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!(path = %path.display(), "Skipping file with a non UTF-8 name");
                continue;
            };

            let content = fs::read_to_string(path)?;
            let messages: IndexMap<String, Value> = serde_json::from_str(&content)?;
            for (key, value) in messages {
                if key.starts_with('@') {
                    continue;
                }
                match value {
                    Value::String(message) => {
                        tokens
                            .entry(key)
                            .or_default()
                            .insert(lang.to_string(), message);
                    }
                    _ => warn!(key = %key, lang = %lang, "Message is not a string, skipping"),
                }
            }
        }

        if paths.is_empty() {
            warn!(dir = %dir.display(), "No JSON files found in directory");
        }
        Self::new(tokens)
    }

    /// All tokens, in insertion order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Store for ArrayStore {
    fn find(&self, tag: &str) -> I18nResult<Option<Token>> {
        Ok(self.tokens.get(tag).cloned())
    }

    fn has(&self, tag: &str) -> I18nResult<bool> {
        Ok(self.tokens.contains_key(tag))
    }

    fn has_languages(&self, tag: &str, langs: &[&str]) -> I18nResult<bool> {
        Ok(self
            .tokens
            .get(tag)
            .is_some_and(|token| token.has_all(langs.iter().copied())))
    }

    fn translate(&self, message: &str, from: &str, to: &[String]) -> I18nResult<Token> {
        // Entries without a `from` variant cannot match and are passed over
        let matched = self
            .tokens
            .values()
            .find(|token| token.translations().get(from).is_some_and(|m| m == message))
            .ok_or_else(|| I18nError::NoMatchingTranslation {
                message: message.to_string(),
                lang: from.to_string(),
            })?;

        debug!(tag = matched.tag(), from = from, "Matched message");
        Ok(matched.restricted_to(to))
    }
}
