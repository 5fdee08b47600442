//! Token stores
//!
//! A [`Store`] resolves tokens by tag or by the text of a message in a known
//! language. Two backends are provided:
//!
//! - [`ArrayStore`] keeps every token in memory, loaded from a map or JSON
//! - [`SqlStore`] reads a database table through a [`Connection`]
//!
//! Stores are read-only. They can be shared by reference or behind `Rc`/`Arc`,
//! which implement [`Store`] as well.

pub mod array;
pub mod query;
pub mod sql;
pub mod sqlite;

pub use array::ArrayStore;
pub use query::{Connection, Row, Select, SqlValue};
pub use sql::SqlStore;

use crate::error::{I18nError, I18nResult};
use crate::token::Token;
use std::rc::Rc;
use std::sync::Arc;

/// Common interface for fetching tokens
pub trait Store {
    /// Look up a token by tag with every language it has.
    ///
    /// `Ok(None)` means no such tag; `Err` is reserved for backend failures.
    fn find(&self, tag: &str) -> I18nResult<Option<Token>>;

    /// Translate `message` from language `from` into the languages in `to`.
    ///
    /// Matches the message by exact string equality. The returned token is
    /// tagged with the matched entry's tag and carries only those requested
    /// languages the entry has a variant for.
    ///
    /// # Errors
    ///
    /// [`I18nError::NoMatchingTranslation`] if no entry has `message` in `from`.
    fn translate(&self, message: &str, from: &str, to: &[String]) -> I18nResult<Token>;

    /// Like [`Store::find`], failing with [`I18nError::UnknownToken`] on a miss
    fn token(&self, tag: &str) -> I18nResult<Token> {
        self.find(tag)?.ok_or_else(|| I18nError::UnknownToken {
            tag: tag.to_string(),
        })
    }

    /// Whether a token with this tag exists
    fn has(&self, tag: &str) -> I18nResult<bool> {
        Ok(self.find(tag)?.is_some())
    }

    /// Whether a token with this tag exists and has every language in `langs`
    fn has_languages(&self, tag: &str, langs: &[&str]) -> I18nResult<bool> {
        Ok(self
            .find(tag)?
            .is_some_and(|token| token.has_all(langs.iter().copied())))
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn find(&self, tag: &str) -> I18nResult<Option<Token>> {
        (**self).find(tag)
    }

    fn translate(&self, message: &str, from: &str, to: &[String]) -> I18nResult<Token> {
        (**self).translate(message, from, to)
    }

    fn has(&self, tag: &str) -> I18nResult<bool> {
        (**self).has(tag)
    }

    fn has_languages(&self, tag: &str, langs: &[&str]) -> I18nResult<bool> {
        (**self).has_languages(tag, langs)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn find(&self, tag: &str) -> I18nResult<Option<Token>> {
        (**self).find(tag)
    }

    fn translate(&self, message: &str, from: &str, to: &[String]) -> I18nResult<Token> {
        (**self).translate(message, from, to)
    }

    fn has(&self, tag: &str) -> I18nResult<bool> {
        (**self).has(tag)
    }

    fn has_languages(&self, tag: &str, langs: &[&str]) -> I18nResult<bool> {
        (**self).has_languages(tag, langs)
    }
}

impl<S: Store + ?Sized> Store for Rc<S> {
    fn find(&self, tag: &str) -> I18nResult<Option<Token>> {
        (**self).find(tag)
    }

    fn translate(&self, message: &str, from: &str, to: &[String]) -> I18nResult<Token> {
        (**self).translate(message, from, to)
    }

    fn has(&self, tag: &str) -> I18nResult<bool> {
        (**self).has(tag)
    }

    fn has_languages(&self, tag: &str, langs: &[&str]) -> I18nResult<bool> {
        (**self).has_languages(tag, langs)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn find(&self, tag: &str) -> I18nResult<Option<Token>> {
        (**self).find(tag)
    }

    fn translate(&self, message: &str, from: &str, to: &[String]) -> I18nResult<Token> {
        (**self).translate(message, from, to)
    }

    fn has(&self, tag: &str) -> I18nResult<bool> {
        (**self).has(tag)
    }

    fn has_languages(&self, tag: &str, langs: &[&str]) -> I18nResult<bool> {
        (**self).has_languages(tag, langs)
    }
}
