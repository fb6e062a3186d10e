//! Fixed-point recomputation of derived fields.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::compute_derived_value_on;
use crate::error::{FormError, Result};
use crate::schema::FormField;
use crate::value::FormValues;

/// Outcome of a recomputation that reached a fixed point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recomputation {
    /// Passes run, including the final pass that changed nothing
    pub passes: usize,

    /// Derived fields whose value changed, in first-change order
    pub changed: Vec<String>,
}

/// Recompute every derived field until no value changes.
///
/// Each pass evaluates all derived fields against a snapshot of `values`
/// and writes back the ones that differ. At most `fields.len() + 1` passes
/// run. Running out of passes, or a loop in the `parentFields` graph, is
/// reported as [`FormError::DependencyCycle`]; values computed so far stay
/// in `values`.
pub fn recompute_derived(
    fields: &[FormField],
    values: &mut FormValues,
    today: NaiveDate,
) -> Result<Recomputation> {
    let max_passes = fields.len() + 1;
    let mut outcome = Recomputation::default();

    loop {
        if outcome.passes == max_passes {
            let cycle = find_dependency_cycle(fields).unwrap_or_else(|| outcome.changed.clone());
            tracing::warn!(passes = outcome.passes, ?cycle, "derived fields did not settle");
            return Err(FormError::DependencyCycle { fields: cycle });
        }
        outcome.passes += 1;

        let snapshot = values.clone();
        let mut changed_this_pass = false;
        for field in fields.iter().filter(|f| f.is_computed()) {
            let next = compute_derived_value_on(field, &snapshot, fields, today);
            if snapshot.get(&field.id) != Some(&next) {
                values.insert(field.id.clone(), next);
                changed_this_pass = true;
                if !outcome.changed.contains(&field.id) {
                    outcome.changed.push(field.id.clone());
                }
            }
        }

        if !changed_this_pass {
            break;
        }
    }

    // Mutually dependent fields can still settle (two sums of each other
    // both sit at zero); the configuration is wrong either way.
    if let Some(cycle) = find_dependency_cycle(fields) {
        tracing::warn!(?cycle, "derived field dependency cycle");
        return Err(FormError::DependencyCycle { fields: cycle });
    }

    Ok(outcome)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Find a loop among derived fields' parent references.
///
/// Returns the ids along the loop with the first id repeated at the end
/// (`["d", "e", "d"]`). Parents that are plain fields end a path.
pub fn find_dependency_cycle(fields: &[FormField]) -> Option<Vec<String>> {
    let graph: HashMap<&str, &[String]> = fields
        .iter()
        .filter_map(|f| {
            f.derivation()
                .map(|config| (f.id.as_str(), config.parent_fields.as_slice()))
        })
        .collect();

    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(graph.len());
    let mut stack: Vec<&str> = Vec::new();

    for field in fields.iter().filter(|f| graph.contains_key(f.id.as_str())) {
        if let Some(cycle) = visit(field.id.as_str(), &graph, &mut marks, &mut stack) {
            return Some(cycle);
        }
    }
    None
}

fn visit<'a>(
    id: &'a str,
    graph: &HashMap<&'a str, &'a [String]>,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    match marks.get(id) {
        Some(Mark::Done) => return None,
        Some(Mark::Visiting) => {
            let start = stack.iter().position(|s| *s == id).unwrap_or(0);
            let mut cycle: Vec<String> = stack[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(id.to_string());
            return Some(cycle);
        }
        None => {}
    }

    marks.insert(id, Mark::Visiting);
    stack.push(id);

    if let Some(&parents) = graph.get(id) {
        for parent in parents {
            if graph.contains_key(parent.as_str()) {
                if let Some(cycle) = visit(parent.as_str(), graph, marks, stack) {
                    return Some(cycle);
                }
            }
        }
    }

    stack.pop();
    marks.insert(id, Mark::Done);
    None
}
