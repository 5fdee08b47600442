//! Translator facade
//!
//! [`Translator`] wraps a [`Store`] and remembers a preferred target
//! language. Every token it hands out carries that language, so callers can
//! render it without naming a language again.
//!
//! # Example
//!
//! ```
//! use token_i18n::{ArrayStore, Translator};
//!
//! let store = ArrayStore::from_json(
//!     r#"{"greeting": {"en": "Hello {name}", "fr": "Bonjour {name}"}}"#,
//! )
//! .unwrap();
//!
//! let mut translator = Translator::new(&store);
//! translator.set_preferred_language(Some("en".to_string()));
//!
//! let token = translator.translate("Bonjour {name}", "fr").unwrap();
//! assert_eq!(token.stringify().unwrap(), "Hello {name}");
//!
//! let token = translator.translate("Hello {name}", ("en", ["fr"])).unwrap();
//! let token = token.interpolate([("name", "Ada")]);
//! assert_eq!(token.get(Some("fr")).unwrap(), "Bonjour Ada");
//! ```

use crate::error::I18nResult;
use crate::lang::LangSpec;
use crate::store::Store;
use crate::token::Token;
use tracing::debug;

/// Front end to a token store with a preferred target language
#[derive(Debug, Clone)]
pub struct Translator<S> {
    store: S,
    preferred_language: Option<String>,
}

impl<S: Store> Translator<S> {
    /// Create a translator without a preferred language
    pub fn new(store: S) -> Self {
        Translator {
            store,
            preferred_language: None,
        }
    }

    /// Create a translator with `lang` as the default target language
    pub fn with_preferred_language(store: S, lang: &str) -> Self {
        Translator {
            store,
            preferred_language: Some(lang.to_string()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
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

    /// Fetch a token in all available languages.
    ///
    /// The token's preferred language is overwritten with the translator's.
    pub fn token(&self, tag: &str) -> I18nResult<Token> {
        let token = self.store.token(tag)?;
        Ok(self.stamp(token))
    }

    /// Translate `message` as described by `spec`.
    ///
    /// `spec` is either the origin language alone (the target is then the
    /// preferred language) or a single `origin → target(s)` mapping; see
    /// [`LangSpec`] for the accepted forms and the errors each raises.
    pub fn translate(&self, message: &str, spec: impl Into<LangSpec>) -> I18nResult<Token> {
        let (from, to) = spec.into().resolve(self.preferred_language())?;
        debug!(from = %from, to = ?to, "Translating message");
        let token = self.store.translate(message, &from, &to)?;
        Ok(self.stamp(token))
    }

    fn stamp(&self, mut token: Token) -> Token {
        token.set_preferred_language(self.preferred_language.clone());
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::I18nError;
    use crate::store::ArrayStore;
    use std::rc::Rc;

    fn store() -> ArrayStore {
        ArrayStore::from_json(
            r#"{
                "greeting": {"en": "Hello {name}", "fr": "Bonjour {name}", "de": "Hallo {name}"},
                "farewell": {"en": "Goodbye", "fr": "Au revoir"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_preferred_language_accessors() {
        let mut translator = Translator::new(store());
        assert_eq!(translator.preferred_language(), None);
        assert_eq!(translator.set_preferred_language(Some("en".to_string())), None);
        assert_eq!(
            translator.set_preferred_language(Some("fr".to_string())),
            Some("en".to_string())
        );
        assert_eq!(translator.preferred_language(), Some("fr"));
    }

    #[test]
    fn test_token_is_stamped() {
        let translator = Translator::with_preferred_language(store(), "fr");
        let token = translator.token("farewell").unwrap();
        assert_eq!(token.preferred_language(), Some("fr"));
        assert_eq!(token.stringify().unwrap(), "Au revoir");
        // The full token is returned, not just the preferred language
        assert!(token.has_all(["en", "fr"]));
    }

    #[test]
    fn test_token_stamp_overwrites_with_none() {
        let translator = Translator::new(store());
        let token = translator.token("farewell").unwrap();
        assert_eq!(token.preferred_language(), None);
        assert!(matches!(
            token.stringify(),
            Err(I18nError::NoPreferredLanguage { .. })
        ));
    }

    #[test]
    fn test_token_unknown() {
        let translator = Translator::new(store());
        assert!(matches!(
            translator.token("missing"),
            Err(I18nError::UnknownToken { .. })
        ));
    }

    #[test]
    fn test_translate_origin_only() {
        let mut translator = Translator::new(store());
        translator.set_preferred_language(Some("en".to_string()));
        let token = translator.translate("Bonjour {name}", "fr").unwrap();
        assert_eq!(token.tag(), "greeting");
        assert_eq!(token.preferred_language(), Some("en"));
        assert_eq!(token.stringify().unwrap(), "Hello {name}");
    }

    #[test]
    fn test_translate_origin_only_without_preferred() {
        let translator = Translator::new(store());
        assert!(matches!(
            translator.translate("Bonjour {name}", "fr"),
            Err(I18nError::NoPreferredLanguageSet)
        ));
    }

    #[test]
    fn test_translate_mapping_single_target() {
        let translator = Translator::new(store());
        let token = translator.translate("Goodbye", ("en", "fr")).unwrap();
        assert_eq!(token.get(Some("fr")).unwrap(), "Au revoir");
        assert_eq!(token.preferred_language(), None);
    }

    #[test]
    fn test_translate_mapping_many_targets() {
        let translator = Translator::with_preferred_language(store(), "de");
        let token = translator
            .translate("Hello {name}", ("en", ["fr", "de"]))
            .unwrap();
        assert_eq!(token.languages().collect::<Vec<_>>(), vec!["fr", "de"]);
        assert_eq!(
            token.interpolate([("name", "Ada")]).stringify().unwrap(),
            "Hallo Ada"
        );
    }

    #[test]
    fn test_translate_spec_errors() {
        let translator = Translator::with_preferred_language(store(), "en");
        assert!(matches!(
            translator.translate("Goodbye", LangSpec::Mapping(Vec::new())),
            Err(I18nError::MissingLanguageSpec)
        ));
        assert!(matches!(
            translator.translate("Goodbye", LangSpec::mapping([("a", ["x"]), ("b", ["y"])])),
            Err(I18nError::AmbiguousOriginLanguage { count: 2 })
        ));
        assert!(matches!(
            translator.translate("Goodbye", ("", "fr")),
            Err(I18nError::InvalidLanguageSpec(_))
        ));
    }

    #[test]
    fn test_translate_no_match() {
        let translator = Translator::with_preferred_language(store(), "en");
        assert!(matches!(
            translator.translate("Salut", "fr"),
            Err(I18nError::NoMatchingTranslation { .. })
        ));
    }

    #[test]
    fn test_shared_store() {
        let shared = Rc::new(store());
        let english = Translator::with_preferred_language(Rc::clone(&shared), "en");
        let french = Translator::with_preferred_language(Rc::clone(&shared), "fr");

        assert_eq!(english.token("farewell").unwrap().stringify().unwrap(), "Goodbye");
        assert_eq!(french.token("farewell").unwrap().stringify().unwrap(), "Au revoir");
        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn test_translate_into_any_served_language() {
        let store = ArrayStore::from_json(r#"{"g": {"en": "Hi", "sr@latin": "Zdravo"}}"#).unwrap();
        let translator = Translator::with_preferred_language(&store, "sr@latin");

        assert_eq!(translator.token("g").unwrap().stringify().unwrap(), "Zdravo");
        let token = translator.translate("Hi", "en").unwrap();
        assert_eq!(token.tag(), "g");
        assert_eq!(token.stringify().unwrap(), "Zdravo");
    }
}
