//! Multilingual message lookup
//!
//! Messages are stored as [`Token`]s: one variant per language under a
//! stable tag. A [`Store`] resolves tokens by tag or by the exact text of a
//! message in a known language, and a [`Translator`] puts a preferred target
//! language in front of a store.
//!
//! ```
//! use token_i18n::{ArrayStore, Store, Translator};
//!
//! let store = ArrayStore::from_json(
//!     r#"{"greeting": {"en": "Hello {name}", "fr": "Bonjour {name}"}}"#,
//! )
//! .unwrap();
//!
//! let greeting = store.token("greeting").unwrap().interpolate([("name", "Ada")]);
//! assert_eq!(greeting.get(Some("en")).unwrap(), "Hello Ada");
//! assert!(!store.has_languages("greeting", &["de"]).unwrap());
//!
//! let translator = Translator::with_preferred_language(&store, "fr");
//! assert_eq!(translator.token("greeting").unwrap().stringify().unwrap(), "Bonjour {name}");
//! ```

pub mod config;
pub mod error;
pub mod lang;
pub mod store;
pub mod token;
pub mod translator;

#[cfg(test)]
mod integration_tests;

pub use config::SqlStoreConfig;
pub use error::{I18nError, I18nResult};
pub use lang::{LangSpec, validate_language};
pub use store::{ArrayStore, Connection, Row, Select, SqlStore, SqlValue, Store};
pub use token::Token;
pub use translator::Translator;
