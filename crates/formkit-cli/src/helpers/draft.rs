//! Form drafts: field lists written by hand in JSON or TOML.
//!
//! A draft names its fields with short `key`s instead of generated ids.
//! Derived fields list their parents by key; the keys are swapped for the
//! store's ids when the draft is built.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use formkit_core::{
    ComputationType, DerivedConfig, FieldType, FieldValue, FormStore, KeyValueStore, NewField,
    ValidationRule,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<DraftField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftField {
    /// Draft-local name; defaults to the label
    #[serde(default)]
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: FieldValue,
    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub derived: Option<DraftDerivation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDerivation {
    pub computation_type: ComputationType,
    /// Parent field keys
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub formula: String,
}

impl DraftField {
    fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.label)
    }
}

/// Read a draft; `.toml` files are TOML, anything else is JSON.
pub fn read_draft(path: &Path) -> anyhow::Result<Draft> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read draft {}: {}", path.display(), e))?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse draft {}: {}", path.display(), e))
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse draft {}: {}", path.display(), e))
    }
}

impl Draft {
    /// Add the draft's fields to the store's working form.
    ///
    /// Plain settings go in first so every field has an id; derivations are
    /// attached afterwards with parent keys replaced by those ids.
    pub fn apply<S: KeyValueStore>(&self, store: &mut FormStore<S>) -> anyhow::Result<()> {
        let mut ids: HashMap<&str, String> = HashMap::with_capacity(self.fields.len());

        for field in &self.fields {
            if ids.contains_key(field.key()) {
                return Err(anyhow::anyhow!(
                    "Duplicate field key \"{}\" in draft",
                    field.key()
                ));
            }
            let mut new_field = NewField::new(field.field_type, field.label.clone())
                .with_default(field.default_value.clone())
                .with_options(field.options.clone());
            new_field.required = field.required;
            new_field.validation_rules = field.validation_rules.clone();
            let id = store.add_field(new_field);
            ids.insert(field.key(), id);
        }

        for field in &self.fields {
            let Some(derivation) = &field.derived else {
                continue;
            };
            let parent_fields = derivation
                .parents
                .iter()
                .map(|key| {
                    ids.get(key.as_str()).cloned().ok_or_else(|| {
                        anyhow::anyhow!(
                            "Field \"{}\" derives from unknown key \"{}\"",
                            field.key(),
                            key
                        )
                    })
                })
                .collect::<anyhow::Result<Vec<String>>>()?;

            let id = &ids[field.key()];
            let mut updated = store
                .current()
                .field(id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Field \"{}\" vanished", field.key()))?;
            let mut config = DerivedConfig::new(derivation.computation_type.clone(), parent_fields);
            config.formula = derivation.formula.clone();
            updated.is_derived = true;
            updated.derived_config = Some(config);
            store.update_field(updated);
        }

        Ok(())
    }
}
