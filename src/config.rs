use crate::error::{I18nError, I18nResult};
use serde::Deserialize;

pub const DEFAULT_TABLE: &str = "tokens";
pub const DEFAULT_ID_COLUMN: &str = "id";
pub const DEFAULT_TAG_COLUMN: &str = "tag";

/// Table layout read by [`crate::SqlStore`]
///
/// The table holds one row per tag: a primary key column, a unique tag
/// column, and one nullable text column per language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqlStoreConfig {
    pub table: String,
    pub id_column: String,
    pub tag_column: String,
}

impl Default for SqlStoreConfig {
    fn default() -> Self {
        SqlStoreConfig {
            table: DEFAULT_TABLE.to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            tag_column: DEFAULT_TAG_COLUMN.to_string(),
        }
    }
}

impl SqlStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read table and column names from `I18N_TOKENS_TABLE`,
    /// `I18N_ID_COLUMN` and `I18N_TAG_COLUMN`, defaulting any that are unset.
    pub fn from_env() -> Self {
        SqlStoreConfig {
            table: std::env::var("I18N_TOKENS_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
            id_column: std::env::var("I18N_ID_COLUMN")
                .unwrap_or_else(|_| DEFAULT_ID_COLUMN.to_string()),
            tag_column: std::env::var("I18N_TAG_COLUMN")
                .unwrap_or_else(|_| DEFAULT_TAG_COLUMN.to_string()),
        }
    }

    pub fn with_table(&mut self, table: &str) -> &mut Self {
        self.table = table.to_string();
        self
    }

    pub fn with_id_column(&mut self, column: &str) -> &mut Self {
        self.id_column = column.to_string();
        self
    }

    pub fn with_tag_column(&mut self, column: &str) -> &mut Self {
        self.tag_column = column.to_string();
        self
    }

    /// Check every configured name with [`validate_identifier`]
    pub fn validate(&self) -> I18nResult<()> {
        validate_identifier(&self.table)?;
        validate_identifier(&self.id_column)?;
        validate_identifier(&self.tag_column)
    }
}

/// Accept table and column names made of ASCII alphanumerics, `_` and `-`.
pub fn validate_identifier(name: &str) -> I18nResult<()> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(I18nError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}
