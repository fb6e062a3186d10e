//! Form schema data model.
//!
//! These types serialize to the stored record layout: camelCase keys, rule
//! and computation tags as written by the builder, optional attributes
//! defaulted so older records keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::value::FieldValue;

/// Kind of input a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
        }
    }

    /// Select and radio fields choose from a fixed option list.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

/// Which check a validation rule performs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "minLength")]
    MinLength,
    #[serde(rename = "maxLength")]
    MaxLength,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "customPassword")]
    PasswordPolicy,
    /// Tag this build does not know; never fails. The tag is written back
    /// unchanged.
    #[serde(untagged)]
    Unknown(String),
}

impl RuleKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Email => "email",
            Self::PasswordPolicy => "customPassword",
            Self::Unknown(tag) => tag,
        }
    }

    /// Length rules compare against a threshold.
    pub fn uses_threshold(&self) -> bool {
        matches!(self, Self::MinLength | Self::MaxLength)
    }
}

/// One validation check on a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Check to perform
    #[serde(rename = "type")]
    pub kind: RuleKind,

    /// Length bound for MinLength/MaxLength
    #[serde(
        rename = "value",
        default,
        deserialize_with = "lenient_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub threshold: Option<u64>,

    /// Message reported verbatim when the check fails
    #[serde(default)]
    pub message: String,
}

impl ValidationRule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            threshold: None,
            message: message.into(),
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Required, message)
    }

    pub fn min_length(threshold: u64, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MinLength, message).with_threshold(threshold)
    }

    pub fn max_length(threshold: u64, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MaxLength, message).with_threshold(threshold)
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Email, message)
    }

    pub fn password_policy(message: impl Into<String>) -> Self {
        Self::new(RuleKind::PasswordPolicy, message)
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

/// Accept a number, a numeric string, or null; anything else is no threshold.
fn lenient_threshold<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        serde_json::Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }))
}

/// How a derived field computes its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComputationType {
    #[serde(rename = "sum")]
    Sum,
    #[serde(rename = "age_from_dob")]
    AgeFromDateOfBirth,
    #[serde(rename = "custom")]
    Custom,
    /// Tag this build does not know; computes 0. The tag is written back
    /// unchanged.
    #[serde(untagged)]
    Unknown(String),
}

impl ComputationType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sum => "sum",
            Self::AgeFromDateOfBirth => "age_from_dob",
            Self::Custom => "custom",
            Self::Unknown(tag) => tag,
        }
    }
}

/// Derivation settings for a computed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedConfig {
    /// Ids of the fields this one reads, in placeholder order
    #[serde(default)]
    pub parent_fields: Vec<String>,

    /// Expression template for custom computations (`field1 * 2`)
    #[serde(default)]
    pub formula: String,

    /// Computation to apply
    pub computation_type: ComputationType,
}

impl DerivedConfig {
    pub fn new(computation_type: ComputationType, parent_fields: Vec<String>) -> Self {
        Self {
            parent_fields,
            formula: String::new(),
            computation_type,
        }
    }

    pub fn sum(parent_fields: Vec<String>) -> Self {
        Self::new(ComputationType::Sum, parent_fields)
    }

    pub fn age_from_dob(parent_field: impl Into<String>) -> Self {
        Self::new(ComputationType::AgeFromDateOfBirth, vec![parent_field.into()])
    }

    pub fn custom(parent_fields: Vec<String>, formula: impl Into<String>) -> Self {
        Self {
            parent_fields,
            formula: formula.into(),
            computation_type: ComputationType::Custom,
        }
    }
}

/// One field in a form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Stable identifier assigned when the field is added
    pub id: String,

    /// Input kind
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// User-facing label
    pub label: String,

    /// Marked required in the rendered form
    #[serde(default)]
    pub required: bool,

    /// Initial value shown in the form
    #[serde(default)]
    pub default_value: FieldValue,

    /// Checks applied in order; the first failure wins
    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,

    /// Choices for select and radio fields
    #[serde(default)]
    pub options: Vec<String>,

    /// Value is computed rather than entered
    #[serde(default)]
    pub is_derived: bool,

    /// Derivation settings, present when `is_derived`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_config: Option<DerivedConfig>,
}

impl FormField {
    /// Derivation settings when this field is computed.
    ///
    /// A field flagged derived without settings behaves as a plain field.
    pub fn derivation(&self) -> Option<&DerivedConfig> {
        if self.is_derived {
            self.derived_config.as_ref()
        } else {
            None
        }
    }

    pub fn is_computed(&self) -> bool {
        self.derivation().is_some()
    }
}

/// Builder for fields before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewField {
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    pub default_value: FieldValue,
    pub validation_rules: Vec<ValidationRule>,
    pub options: Vec<String>,
    pub derived_config: Option<DerivedConfig>,
}

impl NewField {
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            required: false,
            default_value: FieldValue::Absent,
            validation_rules: Vec::new(),
            options: Vec::new(),
            derived_config: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation_rules.push(rule);
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn derived(mut self, config: DerivedConfig) -> Self {
        self.derived_config = Some(config);
        self
    }

    /// Finish the field under the given id.
    pub fn into_field(self, id: impl Into<String>) -> FormField {
        FormField {
            id: id.into(),
            field_type: self.field_type,
            label: self.label,
            required: self.required,
            default_value: self.default_value,
            validation_rules: self.validation_rules,
            options: self.options,
            is_derived: self.derived_config.is_some(),
            derived_config: self.derived_config,
        }
    }
}

/// A named, saved snapshot of a form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Unique identifier for this snapshot
    pub id: String,

    /// Name given at save time (not unique)
    pub name: String,

    /// Fields as they were when saved
    pub fields: Vec<FormField>,

    /// When this snapshot was saved
    pub created_at: DateTime<Utc>,
}

/// The form currently being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingForm {
    pub fields: Vec<FormField>,
    pub name: String,
}

impl WorkingForm {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.name.is_empty()
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_builder() {
        let field = NewField::new(FieldType::Text, "Email")
            .required()
            .with_default("me@example.com")
            .with_rule(ValidationRule::required("Email is required"))
            .with_rule(ValidationRule::email("Invalid email"))
            .into_field("f-1");

        assert_eq!(field.id, "f-1");
        assert!(field.required);
        assert!(!field.is_derived);
        assert_eq!(field.validation_rules.len(), 2);
        assert_eq!(field.default_value, FieldValue::text("me@example.com"));
    }

    #[test]
    fn test_derived_builder_sets_flag() {
        let field = NewField::new(FieldType::Number, "Total")
            .derived(DerivedConfig::sum(vec!["a".into(), "b".into()]))
            .into_field("t");
        assert!(field.is_derived);
        assert!(field.is_computed());
    }

    #[test]
    fn test_derived_flag_without_config_is_plain() {
        let mut field = NewField::new(FieldType::Number, "Total").into_field("t");
        field.is_derived = true;
        assert!(field.derivation().is_none());
    }

    #[test]
    fn test_field_decodes_stored_layout() {
        let json = r#"{
            "id": "5f0c",
            "type": "number",
            "label": "Total",
            "required": false,
            "defaultValue": "",
            "validationRules": [
                {"type": "minLength", "value": 3, "message": "short"},
                {"type": "maxLength", "value": "10", "message": "long"},
                {"type": "minLength", "value": null, "message": "nan"}
            ],
            "options": [],
            "isDerived": true,
            "derivedConfig": {
                "parentFields": ["a", "b"],
                "formula": "",
                "computationType": "sum"
            }
        }"#;
        let field: FormField = serde_json::from_str(json).unwrap();

        assert_eq!(field.field_type, FieldType::Number);
        assert_eq!(field.default_value, FieldValue::text(""));
        assert_eq!(field.validation_rules[0].threshold, Some(3));
        assert_eq!(field.validation_rules[1].threshold, Some(10));
        assert_eq!(field.validation_rules[2].threshold, None);
        let config = field.derivation().unwrap();
        assert_eq!(config.computation_type, ComputationType::Sum);
        assert_eq!(config.parent_fields, vec!["a", "b"]);
    }

    #[test]
    fn test_field_decodes_minimal_record() {
        let json = r#"{"id": "x", "type": "checkbox", "label": "Agree"}"#;
        let field: FormField = serde_json::from_str(json).unwrap();
        assert!(!field.required);
        assert!(field.default_value.is_absent());
        assert!(field.validation_rules.is_empty());
        assert!(field.derived_config.is_none());
    }

    #[test]
    fn test_unknown_tags_decode() {
        let rule: ValidationRule =
            serde_json::from_str(r#"{"type": "phone", "message": "bad"}"#).unwrap();
        assert_eq!(rule.kind, RuleKind::Unknown("phone".into()));

        let config: DerivedConfig = serde_json::from_str(
            r#"{"parentFields": [], "formula": "", "computationType": "median"}"#,
        )
        .unwrap();
        assert_eq!(config.computation_type, ComputationType::Unknown("median".into()));
    }

    #[test]
    fn test_unknown_tags_are_written_back_unchanged() {
        let json = r#"{"id": "x", "type": "number", "label": "Mid", "isDerived": true,
            "validationRules": [{"type": "phone", "message": "bad"}],
            "derivedConfig": {"parentFields": ["a"], "formula": "", "computationType": "median"}}"#;
        let field: FormField = serde_json::from_str(json).unwrap();

        let encoded = serde_json::to_value(&field).unwrap();

        assert_eq!(encoded["validationRules"][0]["type"], "phone");
        assert_eq!(encoded["derivedConfig"]["computationType"], "median");
        assert_eq!(field.validation_rules[0].kind.as_str(), "phone");
    }

    #[test]
    fn test_field_encodes_camel_case() {
        let field = NewField::new(FieldType::Date, "Born")
            .with_rule(ValidationRule::min_length(2, "short"))
            .into_field("dob");
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["type"], "date");
        assert_eq!(json["isDerived"], false);
        assert!(json.get("derivedConfig").is_none());
        assert_eq!(json["validationRules"][0]["type"], "minLength");
        assert_eq!(json["validationRules"][0]["value"], 2);
        assert_eq!(json["defaultValue"], serde_json::Value::Null);
    }

    #[test]
    fn test_schema_decodes_iso_timestamp() {
        let json = r#"{
            "id": "s1",
            "name": "Signup",
            "fields": [],
            "createdAt": "2024-03-01T12:30:00.000Z"
        }"#;
        let schema: FormSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.created_at.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }
}
