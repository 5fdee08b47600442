use thiserror::Error;

/// Errors raised by tokens, stores and the translator.
///
/// Every failure is immediate. Nothing in this crate retries, falls back to
/// another language or substitutes an empty string.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Lookup by tag found no entry
    #[error("Unknown token '{tag}'")]
    UnknownToken { tag: String },

    /// Reverse lookup found no entry whose source message matches
    #[error("Could not translate '{message}': no token with a matching message in '{lang}'")]
    NoMatchingTranslation { message: String, lang: String },

    /// The token has no variant for the requested language
    #[error("Token '{tag}' has no translation for language '{lang}'")]
    MissingTranslation { tag: String, lang: String },

    /// No language was given and the token has no preferred language
    #[error("No preferred language has been set for token '{tag}'")]
    NoPreferredLanguage { tag: String },

    /// Origin-only language spec used without a preferred target language
    #[error("No preferred language set on the translator")]
    NoPreferredLanguageSet,

    /// Empty language mapping
    #[error("Must specify origin and target languages")]
    MissingLanguageSpec,

    /// Language mapping with more than one origin language
    #[error("Cannot translate from {count} origin languages at once")]
    AmbiguousOriginLanguage { count: usize },

    #[error("Invalid language specifier: {0}")]
    InvalidLanguageSpec(String),

    /// Interpolation context value without a string form
    #[error("Interpolation value for '{key}' must be a string")]
    InvalidInterpolationValue { key: String },

    /// Token data with an empty language key
    #[error("Token '{tag}' contains an empty language identifier")]
    EmptyLanguage { tag: String },

    #[error("Invalid SQL identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("Failed to parse token JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read token file: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failure reported by a non-SQLite query collaborator
    #[error("Query failed: {0}")]
    Query(String),
}

/// Result type for lookups and translations
pub type I18nResult<T> = Result<T, I18nError>;
