//! Non-fatal configuration checks for form fields.
//!
//! Stored schemas may contain rules and derivations that can never behave
//! as intended (a length rule without a length, a derived field pointing at
//! a deleted parent). They still load and run; these checks only report.

use std::collections::HashSet;
use std::fmt;

use crate::derive::find_dependency_cycle;
use crate::schema::{ComputationType, FieldType, FormField, RuleKind};

/// What is wrong with a field's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    DuplicateId,
    DerivedWithoutConfig,
    ConfigOnPlainField,
    UnknownParent(String),
    SelfReference,
    AgeParentCount(usize),
    EmptyFormula,
    UnknownComputation,
    MissingThreshold(RuleKind),
    UnknownRuleKind,
    MissingOptions(FieldType),
    DependencyCycle(Vec<String>),
}

/// A configuration problem attached to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field_id: String,
    pub kind: IssueKind,
}

impl FieldIssue {
    fn new(field_id: &str, kind: IssueKind) -> Self {
        Self {
            field_id: field_id.to_string(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.field_id)?;
        match &self.kind {
            IssueKind::DuplicateId => write!(f, "id is used by more than one field"),
            IssueKind::DerivedWithoutConfig => {
                write!(f, "marked derived but has no derivation settings")
            }
            IssueKind::ConfigOnPlainField => {
                write!(f, "has derivation settings but is not marked derived")
            }
            IssueKind::UnknownParent(id) => write!(f, "parent field '{}' does not exist", id),
            IssueKind::SelfReference => write!(f, "derives from itself"),
            IssueKind::AgeParentCount(n) => {
                write!(f, "age needs exactly one parent field, found {}", n)
            }
            IssueKind::EmptyFormula => write!(f, "custom computation has an empty formula"),
            IssueKind::UnknownComputation => write!(f, "unknown computation type computes 0"),
            IssueKind::MissingThreshold(kind) => {
                write!(f, "{} rule has no length and never fails", kind.as_str())
            }
            IssueKind::UnknownRuleKind => write!(f, "unknown rule type never fails"),
            IssueKind::MissingOptions(ty) => write!(f, "{} field has no options", ty.as_str()),
            IssueKind::DependencyCycle(ids) => {
                write!(f, "derivation cycle {}", ids.join(" -> "))
            }
        }
    }
}

/// Report every configuration issue across `fields`, in field order.
pub fn lint_fields(fields: &[FormField]) -> Vec<FieldIssue> {
    let ids: HashSet<&str> = fields.iter().map(|f| f.id.as_str()).collect();
    let mut seen = HashSet::with_capacity(fields.len());
    let mut issues = Vec::new();

    for field in fields {
        let id = field.id.as_str();
        if !seen.insert(id) {
            issues.push(FieldIssue::new(id, IssueKind::DuplicateId));
        }

        match (field.is_derived, &field.derived_config) {
            (true, None) => issues.push(FieldIssue::new(id, IssueKind::DerivedWithoutConfig)),
            (false, Some(_)) => issues.push(FieldIssue::new(id, IssueKind::ConfigOnPlainField)),
            _ => {}
        }

        if let Some(config) = field.derivation() {
            for parent in &config.parent_fields {
                if parent == id {
                    issues.push(FieldIssue::new(id, IssueKind::SelfReference));
                } else if !ids.contains(parent.as_str()) {
                    issues.push(FieldIssue::new(id, IssueKind::UnknownParent(parent.clone())));
                }
            }
            match &config.computation_type {
                ComputationType::AgeFromDateOfBirth if config.parent_fields.len() != 1 => {
                    issues.push(FieldIssue::new(
                        id,
                        IssueKind::AgeParentCount(config.parent_fields.len()),
                    ));
                }
                ComputationType::Custom if config.formula.trim().is_empty() => {
                    issues.push(FieldIssue::new(id, IssueKind::EmptyFormula));
                }
                ComputationType::Unknown(_) => {
                    issues.push(FieldIssue::new(id, IssueKind::UnknownComputation));
                }
                _ => {}
            }
        }

        for rule in &field.validation_rules {
            if rule.kind.uses_threshold() && rule.threshold.is_none() {
                issues.push(FieldIssue::new(id, IssueKind::MissingThreshold(rule.kind.clone())));
            }
            if matches!(rule.kind, RuleKind::Unknown(_)) {
                issues.push(FieldIssue::new(id, IssueKind::UnknownRuleKind));
            }
        }

        if field.field_type.has_options() && field.options.is_empty() {
            issues.push(FieldIssue::new(id, IssueKind::MissingOptions(field.field_type)));
        }
    }

    // Self references were already reported per field.
    let without_self: Vec<FormField> = fields
        .iter()
        .cloned()
        .map(|mut f| {
            if let Some(config) = f.derived_config.as_mut() {
                config.parent_fields.retain(|p| *p != f.id);
            }
            f
        })
        .collect();
    if let Some(cycle) = find_dependency_cycle(&without_self) {
        let first = cycle[0].clone();
        issues.push(FieldIssue::new(&first, IssueKind::DependencyCycle(cycle)));
    }

    issues
}
