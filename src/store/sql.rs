use crate::config::SqlStoreConfig;
use crate::error::{I18nError, I18nResult};
use crate::store::Store;
use crate::store::query::{Connection, Row, Select, SqlValue};
use crate::token::Token;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Token store backed by an SQL table
///
/// The table must hold one row per tag: a primary key column, a unique tag
/// column, and one nullable text column per language. Column names come
/// from [`SqlStoreConfig`] (`tokens`, `id` and `tag` by default). The store
/// only ever issues `SELECT` statements.
#[derive(Debug, Clone)]
pub struct SqlStore<C> {
    connection: C,
    config: SqlStoreConfig,
}

impl<C: Connection> SqlStore<C> {
    /// Create a store reading the default `tokens` table
    pub fn new(connection: C) -> Self {
        SqlStore {
            connection,
            config: SqlStoreConfig::default(),
        }
    }

    /// Create a store with custom table and column names
    ///
    /// # Errors
    ///
    /// [`I18nError::InvalidIdentifier`] if a configured name is not a plain
    /// identifier.
    pub fn with_config(connection: C, config: SqlStoreConfig) -> I18nResult<Self> {
        config.validate()?;
        Ok(SqlStore { connection, config })
    }

    pub fn config(&self) -> &SqlStoreConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    fn first_row(&self, select: &Select) -> I18nResult<Option<Row>> {
        Ok(self.connection.query(select)?.into_iter().next())
    }
}

impl<C: Connection> Store for SqlStore<C> {
    fn find(&self, tag: &str) -> I18nResult<Option<Token>> {
        let select = Select::from(&self.config.table).where_eq(&self.config.tag_column, tag);
        let Some(row) = self.first_row(&select)? else {
            debug!(tag = tag, "No row for tag");
            return Ok(None);
        };

        let translations = row
            .into_iter()
            .filter(|(column, _)| {
                !column.eq_ignore_ascii_case(&self.config.id_column)
                    && !column.eq_ignore_ascii_case(&self.config.tag_column)
            })
            .filter_map(|(column, value)| message_text(tag, column, value))
            .collect();

        Token::new(tag, translations).map(Some)
    }

    fn translate(&self, message: &str, from: &str, to: &[String]) -> I18nResult<Token> {
        let mut fields = Vec::with_capacity(to.len() + 1);
        fields.push(self.config.tag_column.clone());
        fields.extend(to.iter().cloned());

        let select = Select::from(&self.config.table)
            .fields(fields)
            .where_eq(from, message);
        let mut row = self
            .first_row(&select)?
            .ok_or_else(|| I18nError::NoMatchingTranslation {
                message: message.to_string(),
                lang: from.to_string(),
            })?;

        let tag = match take_field(&mut row, &self.config.tag_column) {
            Some(SqlValue::Text(tag)) => tag,
            Some(other) => {
                return Err(I18nError::Query(format!(
                    "column '{}' holds {:?}, expected text",
                    self.config.tag_column, other
                )));
            }
            None => {
                return Err(I18nError::Query(format!(
                    "column '{}' missing from result row",
                    self.config.tag_column
                )));
            }
        };

        let translations: IndexMap<String, String> = to
            .iter()
            .filter_map(|lang| {
                let value = take_field(&mut row, lang)?;
                message_text(&tag, lang.clone(), value)
            })
            .collect();

        debug!(tag = %tag, from = from, "Matched message");
        Token::new(tag, translations)
    }
}

/// Remove `name` from `row`, matching the column name case-insensitively as
/// SQL does
fn take_field(row: &mut Row, name: &str) -> Option<SqlValue> {
    let index = row.keys().position(|column| column.eq_ignore_ascii_case(name))?;
    row.shift_remove_index(index).map(|(_, value)| value)
}

/// `NULL` is an absent translation
fn message_text(tag: &str, column: String, value: SqlValue) -> Option<(String, String)> {
    match value {
        SqlValue::Null => None,
        value => match value.as_text() {
            Some(text) => Some((column, text)),
            None => {
                warn!(tag = tag, column = %column, "Skipping non-text column value");
                None
            }
        },
    }
}
