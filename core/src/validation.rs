//! # Input Validation
//!
//! Caller-contract checks run before generation. The generator never repairs
//! its input: colliding names, unsafe identifiers and dangling step
//! conditions are reported as errors.

use crate::error::{AppError, AppResult};
use crate::formatter::check_balance;
use crate::model::{flatten_fields, FormFieldOrGroup, FormStep};
use crate::registry::lookup;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static IDENT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether `name` can be used as-is as a TypeScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let re = IDENT_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid regex"));
    re.is_match(name)
}

/// Whether the field carries a value. Unknown variants count as data so that
/// their names are still checked.
fn is_data_variant(variant: &str) -> bool {
    lookup(variant).map(|rule| rule.is_data()).unwrap_or(true)
}

/// Checks the data fields of one form: identifier-safe, unique names.
///
/// Returns the checked names in field order.
fn check_names<'a>(
    rows: &'a [FormFieldOrGroup],
    seen: &mut HashSet<&'a str>,
) -> AppResult<Vec<&'a str>> {
    let mut names = Vec::new();
    for field in flatten_fields(rows) {
        if !is_data_variant(&field.variant) {
            continue;
        }
        if !is_identifier(&field.name) {
            return Err(AppError::InvalidFieldName(field.name.clone()));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(AppError::DuplicateFieldName(field.name.clone()));
        }
        names.push(field.name.as_str());
    }
    Ok(names)
}

/// Validates a flat field list.
///
/// # Errors
///
/// * `InvalidFieldName` - a data field name is not identifier-safe.
/// * `DuplicateFieldName` - two data fields share a name.
pub fn validate_fields(rows: &[FormFieldOrGroup]) -> AppResult<()> {
    let mut seen = HashSet::new();
    check_names(rows, &mut seen)?;
    Ok(())
}

/// A condition is emitted verbatim, so it must be a non-empty expression with
/// balanced delimiters on its own.
fn check_condition(step: &FormStep, condition: &str) -> AppResult<()> {
    let invalid = |reason: String| AppError::InvalidCondition {
        step: step.id.clone(),
        reason,
    };
    if condition.trim().is_empty() {
        return Err(invalid("expression is empty".to_string()));
    }
    check_balance(condition).map_err(|e| match e {
        AppError::FormatterFailure(reason) => invalid(reason),
        other => other,
    })
}

/// Validates a multi-step form.
///
/// There is at least one step; field names are unique across all steps; step
/// ids are identifier-safe and unique; a step condition may only depend on a
/// field of an earlier step and must balance its delimiters.
pub fn validate_steps(steps: &[FormStep]) -> AppResult<()> {
    if steps.is_empty() {
        return Err(AppError::NoSteps);
    }
    let mut seen_fields = HashSet::new();
    let mut seen_ids = HashSet::new();
    let mut earlier: HashSet<&str> = HashSet::new();

    for step in steps {
        if !is_identifier(&step.id) {
            return Err(AppError::InvalidFieldName(step.id.clone()));
        }
        if !seen_ids.insert(step.id.as_str()) {
            return Err(AppError::DuplicateStepId(step.id.clone()));
        }
        if let Some(cond) = &step.conditional {
            if !earlier.contains(cond.depends_on.as_str()) {
                return Err(AppError::InvalidConditionalReference {
                    step: step.id.clone(),
                    depends_on: cond.depends_on.clone(),
                });
            }
            check_condition(step, &cond.condition)?;
        }
        let names = check_names(&step.fields, &mut seen_fields)?;
        earlier.extend(names);
    }
    Ok(())
}
