//! [`Connection`] for SQLite databases through `rusqlite`

use crate::error::I18nResult;
use crate::store::query::{Connection, Row, Select, SqlValue};
use rusqlite::params_from_iter;
use rusqlite::types::ValueRef;
use tracing::trace;

impl Connection for rusqlite::Connection {
    fn query(&self, select: &Select) -> I18nResult<Vec<Row>> {
        // Backticks: SQLite reads an unknown double-quoted name as a string literal
        let sql = select.to_sql_quoted('`', '`')?;
        trace!(sql = %sql, "Running select");

        let mut stmt = self.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let params = select.filter().map(|(_, value)| value);

        let rows = stmt.query_map(params_from_iter(params), |row| {
            let mut fields = Row::with_capacity(columns.len());
            for (index, name) in columns.iter().enumerate() {
                fields.insert(name.clone(), to_sql_value(row.get_ref(index)?));
            }
            Ok(fields)
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn to_sql_value(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(i) => SqlValue::Integer(i),
        ValueRef::Real(r) => SqlValue::Real(r),
        // SQLite does not enforce UTF-8; keep malformed text as raw bytes
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => SqlValue::Text(text.to_string()),
            Err(_) => SqlValue::Blob(bytes.to_vec()),
        },
        ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
    }
}
