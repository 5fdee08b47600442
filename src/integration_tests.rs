//! End-to-end tests across tokens, both stores and the translator

use crate::error::{I18nError, I18nResult};
use crate::lang::LangSpec;
use crate::store::{ArrayStore, Connection, Row, Select, SqlStore, SqlValue, Store};
use crate::translator::Translator;
use serde_json::json;
use std::cell::RefCell;

const TOKENS_JSON: &str = r#"{
    "greeting": {"en": "Hello {name}", "fr": "Bonjour {name}"},
    "inbox": {"en": "{count} new messages", "fr": "{count} nouveaux messages", "de": "{count} neue Nachrichten"}
}"#;

fn array_store() -> ArrayStore {
    ArrayStore::from_json(TOKENS_JSON).unwrap()
}

fn sql_store() -> SqlStore<rusqlite::Connection> {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE tokens (id INTEGER PRIMARY KEY, tag TEXT UNIQUE NOT NULL, en TEXT, fr TEXT, de TEXT);
         INSERT INTO tokens (tag, en, fr, de) VALUES ('greeting', 'Hello {name}', 'Bonjour {name}', NULL);
         INSERT INTO tokens (tag, en, fr, de) VALUES ('inbox', '{count} new messages', '{count} nouveaux messages', '{count} neue Nachrichten');",
    )
    .unwrap();
    SqlStore::new(conn)
}

fn langs(langs: &[&str]) -> Vec<String> {
    langs.iter().map(|l| l.to_string()).collect()
}

/// Connection double that records every select and answers with fixed rows
struct RecordingConnection {
    rows: Vec<Row>,
    selects: RefCell<Vec<Select>>,
}

impl RecordingConnection {
    fn new(rows: Vec<Row>) -> Self {
        RecordingConnection {
            rows,
            selects: RefCell::new(Vec::new()),
        }
    }
}

impl Connection for RecordingConnection {
    fn query(&self, select: &Select) -> I18nResult<Vec<Row>> {
        self.selects.borrow_mut().push(select.clone());
        Ok(self.rows.clone())
    }
}

struct FailingConnection;

impl Connection for FailingConnection {
    fn query(&self, _select: &Select) -> I18nResult<Vec<Row>> {
        Err(I18nError::Query("connection lost".to_string()))
    }
}

fn row(fields: &[(&str, SqlValue)]) -> Row {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[test]
fn test_greeting_interpolation() {
    let greeting = array_store()
        .token("greeting")
        .unwrap()
        .interpolate([("name", "Ada")]);
    assert_eq!(greeting.get(Some("en")).unwrap(), "Hello Ada");
}

#[test]
fn test_missing_language_is_not_available() {
    assert!(!array_store().has_languages("greeting", &["de"]).unwrap());
    assert!(!sql_store().has_languages("greeting", &["de"]).unwrap());
}

#[test]
fn test_backends_agree_on_translate() {
    let from_array = array_store()
        .translate("Hello {name}", "en", &langs(&["fr"]))
        .unwrap();
    let from_sql = sql_store()
        .translate("Hello {name}", "en", &langs(&["fr"]))
        .unwrap();
    assert_eq!(from_array, from_sql);
    assert_eq!(from_array.translations().len(), 1);
    assert_eq!(from_array.get(Some("fr")).unwrap(), "Bonjour {name}");
}

#[test]
fn test_backends_agree_on_token() {
    assert_eq!(
        array_store().token("inbox").unwrap(),
        sql_store().token("inbox").unwrap()
    );
}

#[test]
fn test_translator_over_each_backend() {
    let stores: Vec<Box<dyn Store>> = vec![Box::new(array_store()), Box::new(sql_store())];
    for store in stores {
        let mut translator = Translator::new(store);
        translator.set_preferred_language(Some("en".to_string()));
        let token = translator.translate("Bonjour {name}", "fr").unwrap();
        assert_eq!(token.stringify().unwrap(), "Hello {name}");
    }
}

#[test]
fn test_sql_unknown_tag() {
    assert!(matches!(
        sql_store().token("missing-tag"),
        Err(I18nError::UnknownToken { .. })
    ));
}

#[test]
fn test_translator_with_json_inputs() {
    let translator = Translator::with_preferred_language(sql_store(), "de");
    let spec = LangSpec::from_json(&json!({"en": ["fr", "de"]})).unwrap();
    let token = translator
        .translate("{count} new messages", spec)
        .unwrap()
        .interpolate_json(&json!({"count": 4}))
        .unwrap();
    assert_eq!(token.stringify().unwrap(), "4 neue Nachrichten");
    assert_eq!(token.get(Some("fr")).unwrap(), "4 nouveaux messages");
}

#[test]
fn test_sql_store_issues_expected_selects() {
    let conn = RecordingConnection::new(vec![row(&[
        ("id", SqlValue::Integer(9)),
        ("tag", SqlValue::Text("greeting".to_string())),
        ("en", SqlValue::Text("Hello {name}".to_string())),
        ("fr", SqlValue::Text("Bonjour {name}".to_string())),
    ])]);
    let store = SqlStore::new(&conn);

    let token = store.token("greeting").unwrap();
    assert_eq!(token.languages().collect::<Vec<_>>(), vec!["en", "fr"]);

    let token = store.translate("Hello {name}", "en", &langs(&["fr"])).unwrap();
    // Columns outside the requested languages never reach the token
    assert_eq!(token.languages().collect::<Vec<_>>(), vec!["fr"]);
    assert_eq!(token.tag(), "greeting");

    let selects = conn.selects.borrow();
    assert_eq!(
        selects[0].to_sql().unwrap(),
        r#"SELECT * FROM "tokens" WHERE "tag" = ?1"#
    );
    assert_eq!(selects[0].filter(), Some(("tag", "greeting")));
    assert_eq!(
        selects[1].to_sql().unwrap(),
        r#"SELECT "tag", "fr" FROM "tokens" WHERE "en" = ?1"#
    );
    assert_eq!(selects[1].filter(), Some(("en", "Hello {name}")));
}

#[test]
fn test_backend_failure_propagates_from_has() {
    let store = SqlStore::new(FailingConnection);
    assert!(matches!(store.has("greeting"), Err(I18nError::Query(_))));
    assert!(matches!(
        Translator::new(store).token("greeting"),
        Err(I18nError::Query(_))
    ));
}
