//! Query collaborator boundary for [`crate::SqlStore`]
//!
//! The store describes what it wants as a [`Select`] and hands it to a
//! [`Connection`], which returns rows as ordered field → value maps. Any
//! database can sit behind the trait; [`super::sqlite`] provides the SQLite
//! implementation.

use crate::config::validate_identifier;
use crate::error::I18nResult;
use indexmap::IndexMap;
use std::rc::Rc;
use std::sync::Arc;

/// A single column value as returned by the database
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Text form of the value; `None` for `NULL` and non-UTF-8 blobs
    pub fn as_text(&self) -> Option<String> {
        match self {
            SqlValue::Null => None,
            SqlValue::Integer(i) => Some(i.to_string()),
            SqlValue::Real(r) => Some(r.to_string()),
            SqlValue::Text(s) => Some(s.clone()),
            SqlValue::Blob(bytes) => String::from_utf8(bytes.clone()).ok(),
        }
    }
}

/// One result row, fields in select order
pub type Row = IndexMap<String, SqlValue>;

/// `SELECT fields FROM table WHERE field = value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    table: String,
    fields: Vec<String>,
    filter: Option<(String, String)>,
}

impl Select {
    /// Select every column of `table`
    pub fn from(table: &str) -> Self {
        Select {
            table: table.to_string(),
            fields: Vec::new(),
            filter: None,
        }
    }

    /// Restrict the selected columns. An empty list selects `*`.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Keep rows where `field` equals `value`
    pub fn where_eq(mut self, field: &str, value: &str) -> Self {
        self.filter = Some((field.to_string(), value.to_string()));
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn selected_fields(&self) -> &[String] {
        &self.fields
    }

    pub fn filter(&self) -> Option<(&str, &str)> {
        self.filter
            .as_ref()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Render the statement with `?1` standing for the filter value.
    ///
    /// Identifiers are validated and double-quoted; the filter value is
    /// always bound as a parameter, never spliced into the text.
    pub fn to_sql(&self) -> I18nResult<String> {
        self.to_sql_quoted('"', '"')
    }

    /// Like [`Select::to_sql`] with a dialect-specific identifier quote pair.
    pub fn to_sql_quoted(&self, open: char, close: char) -> I18nResult<String> {
        let quote = |name: &str| -> I18nResult<String> {
            validate_identifier(name)?;
            Ok(format!("{}{}{}", open, name, close))
        };

        let columns = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields
                .iter()
                .map(|field| quote(field.as_str()))
                .collect::<I18nResult<Vec<_>>>()?
                .join(", ")
        };

        let mut sql = format!("SELECT {} FROM {}", columns, quote(self.table.as_str())?);
        if let Some((field, _)) = &self.filter {
            sql.push_str(&format!(" WHERE {} = ?1", quote(field.as_str())?));
        }
        Ok(sql)
    }
}

/// Executes read-only selects
pub trait Connection {
    /// Run `select` and return every matching row
    fn query(&self, select: &Select) -> I18nResult<Vec<Row>>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn query(&self, select: &Select) -> I18nResult<Vec<Row>> {
        (**self).query(select)
    }
}

impl<C: Connection + ?Sized> Connection for Rc<C> {
    fn query(&self, select: &Select) -> I18nResult<Vec<Row>> {
        (**self).query(select)
    }
}

impl<C: Connection + ?Sized> Connection for Arc<C> {
    fn query(&self, select: &Select) -> I18nResult<Vec<Row>> {
        (**self).query(select)
    }
}
