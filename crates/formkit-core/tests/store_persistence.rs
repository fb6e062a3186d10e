use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use formkit_core::storage::{FileStore, KeyValueStore, SchemaPersistence, SqliteStore, SCHEMAS_KEY};
use formkit_core::{
    DerivedConfig, FieldType, FieldValue, FormSession, FormStore, NewField, ValidationRule,
};

struct TempPath {
    path: PathBuf,
}

impl TempPath {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be available")
            .as_nanos();
        let name = format!("{}_{}_{}", prefix, std::process::id(), nanos);
        Self {
            path: std::env::temp_dir().join(name),
        }
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        if self.path.is_dir() {
            let _ = fs::remove_dir_all(&self.path);
        } else {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn build_signup<S: KeyValueStore>(store: &mut FormStore<S>) {
    let born = store.add_field(
        NewField::new(FieldType::Date, "Date of birth")
            .with_rule(ValidationRule::required("Date of birth is required")),
    );
    store.add_field(
        NewField::new(FieldType::Number, "Age").derived(DerivedConfig::age_from_dob(born)),
    );
    store.add_field(
        NewField::new(FieldType::Text, "Password")
            .with_rule(ValidationRule::min_length(8, "Too short"))
            .with_rule(ValidationRule::password_policy("Needs a digit")),
    );
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let temp = TempPath::new("formkit_sqlite_reopen");

    let saved = {
        let backend = SqliteStore::open(&temp.path).expect("open should succeed");
        let mut store = FormStore::new(SchemaPersistence::new(backend));
        build_signup(&mut store);
        store.save_form("Signup").expect("save should succeed")
    };

    let backend = SqliteStore::open(&temp.path).expect("reopen should succeed");
    let store = FormStore::new(SchemaPersistence::new(backend));
    assert_eq!(store.saved_forms(), &[saved]);
}

#[test]
fn test_file_store_survives_reopen_and_delete() {
    let temp = TempPath::new("formkit_files_reopen");

    let (first, second) = {
        let backend = FileStore::open(&temp.path).expect("open should succeed");
        let mut store = FormStore::new(SchemaPersistence::new(backend));
        build_signup(&mut store);
        let first = store.save_form("Signup").expect("save should succeed");
        store.add_field(NewField::new(FieldType::Textarea, "Notes"));
        let second = store.save_form("Notes").expect("save should succeed");
        (first, second)
    };

    let backend = FileStore::open(&temp.path).expect("reopen should succeed");
    let mut store = FormStore::new(SchemaPersistence::new(backend));
    assert_eq!(store.saved_forms(), &[first.clone(), second.clone()]);

    store.delete_saved(&first.id).expect("delete should succeed");

    let backend = FileStore::open(&temp.path).expect("reopen should succeed");
    let store = FormStore::new(SchemaPersistence::new(backend));
    assert_eq!(store.saved_forms(), &[second]);
}

#[test]
fn test_unreadable_collection_loads_empty() {
    let temp = TempPath::new("formkit_files_corrupt");
    let mut backend = FileStore::open(&temp.path).expect("open should succeed");
    backend
        .set(SCHEMAS_KEY, "[{\"id\": 1}]")
        .expect("set should succeed");

    let store = FormStore::new(SchemaPersistence::new(backend));
    assert!(store.saved_forms().is_empty());
    assert!(store.persistence().try_load_all().is_err());
}

#[test]
fn test_accepts_previously_stored_layout() {
    let stored = r#"[{
        "id": "1700000000000",
        "name": "Legacy",
        "createdAt": "2024-03-01T10:00:00.000Z",
        "fields": [
            {
                "id": "a",
                "type": "number",
                "label": "A",
                "required": false,
                "defaultValue": "",
                "validationRules": [{"type": "minLength", "value": "3", "message": "short"}],
                "options": [],
                "isDerived": false
            },
            {
                "id": "b",
                "type": "number",
                "label": "B",
                "required": false,
                "defaultValue": "",
                "validationRules": [],
                "isDerived": true,
                "derivedConfig": {
                    "parentFields": ["a"],
                    "formula": "field1 * 2",
                    "computationType": "custom"
                }
            }
        ]
    }]"#;
    let temp = TempPath::new("formkit_legacy_layout");
    let mut backend = FileStore::open(&temp.path).expect("open should succeed");
    backend.set(SCHEMAS_KEY, stored).expect("set should succeed");

    let store = FormStore::new(SchemaPersistence::new(backend));
    let form = store.find_saved("1700000000000").expect("form should load");
    assert_eq!(form.fields[0].validation_rules[0].threshold, Some(3));

    let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    let mut session = FormSession::with_today(form.fields.clone(), today);
    session.set_input("a", "21").expect("set should succeed");
    assert_eq!(session.value("b"), &FieldValue::Number(42.0));
}

#[test]
fn test_saving_does_not_overwrite_unreadable_collection() {
    let stored = r#"[
        {"id": "keep", "name": "Keep", "createdAt": "2024-03-01T10:00:00Z", "fields": []},
        {"id": "odd", "name": "Odd", "createdAt": "2024-03-01T10:00:00Z",
         "fields": [{"id": "e", "type": "email", "label": "Email"}]}
    ]"#;
    let temp = TempPath::new("formkit_unreadable_save");
    let mut backend = SqliteStore::open(&temp.path).expect("open should succeed");
    backend.set(SCHEMAS_KEY, stored).expect("set should succeed");

    let mut store = FormStore::new(SchemaPersistence::new(backend));
    assert!(store.saved_forms().is_empty());
    store.add_field(NewField::new(FieldType::Text, "Name"));
    store.save_form("New").expect("save should succeed");

    let raw = store
        .persistence()
        .store()
        .get(SCHEMAS_KEY)
        .expect("get should succeed");
    assert_eq!(raw.as_deref(), Some(stored));
}
