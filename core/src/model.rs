#![deny(missing_docs)]

//! # Field Model
//!
//! The caller-owned description of a form: single fields, row groups and steps.
//!
//! Everything here is plain data. The JSON shape matches what the visual editor
//! and the tool endpoint send (camelCase keys, a row is either one field object
//! or an array of field objects).

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A selectable choice for Select, Combobox and Multi Select fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Text shown to the user.
    pub label: String,
    /// Value stored in the form state.
    pub value: String,
}

impl FieldOption {
    /// Creates an option from a label / value pair.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One form input's abstract description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Registry tag of the control (e.g. `"Input"`, `"Date Picker"`).
    pub variant: String,
    /// HTML input type hint (`"email"`, `"number"`, ...). Mostly relevant for `Input`.
    #[serde(rename = "type", default)]
    pub input_type: String,
    /// Schema key and form-library field name.
    pub name: String,
    /// Human readable label.
    #[serde(default)]
    pub label: String,
    /// Placeholder text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Helper text rendered under the control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only `Some(true)` makes the field required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Renders the control disabled.
    #[serde(default)]
    pub disabled: bool,
    /// Lower bound (numeric controls).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound (numeric controls).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Increment (numeric controls).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Default value supplied by the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Default state of Checkbox / Switch.
    #[serde(default)]
    pub checked: bool,
    /// Display hint for list views. The row structure decides the layout.
    #[serde(default)]
    pub row_index: usize,
    /// Locale hint for date controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// 12 hour clock for time controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour12: Option<bool>,
    /// Extra classes for the field wrapper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Choices for selection controls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FormField {
    /// Creates a field with the given variant and name; every other attribute is empty.
    pub fn new(variant: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            input_type: String::new(),
            name: name.into(),
            label: String::new(),
            placeholder: None,
            description: None,
            required: None,
            disabled: false,
            min: None,
            max: None,
            step: None,
            value: None,
            checked: false,
            row_index: 0,
            locale: None,
            hour12: None,
            class_name: None,
            options: Vec::new(),
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the input type hint.
    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    /// Sets the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets numeric bounds.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Sets the default value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the selectable options.
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    /// Whether the field is strictly required.
    pub fn is_required(&self) -> bool {
        self.required == Some(true)
    }

    /// Label text, falling back to the field name when empty.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// One row of a form: a single field or fields rendered side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormFieldOrGroup {
    /// A field occupying the whole row.
    Single(FormField),
    /// Fields sharing one row, each taking a column fraction.
    Group(Vec<FormField>),
}

impl FormFieldOrGroup {
    /// The fields of this row in visual order.
    pub fn fields(&self) -> &[FormField] {
        match self {
            FormFieldOrGroup::Single(field) => std::slice::from_ref(field),
            FormFieldOrGroup::Group(fields) => fields,
        }
    }
}

impl<'de> Deserialize<'de> for FormFieldOrGroup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::from_value::<FormField>(item).map_err(|e| {
                        D::Error::custom(format!("Failed to parse field {} of row group: {}", i, e))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(FormFieldOrGroup::Group),
            value @ Value::Object(_) => serde_json::from_value::<FormField>(value)
                .map(FormFieldOrGroup::Single)
                .map_err(|e| D::Error::custom(format!("Failed to parse field: {}", e))),
            other => Err(D::Error::custom(format!(
                "Expected a field object or an array of field objects, found {}",
                other
            ))),
        }
    }
}

impl From<FormField> for FormFieldOrGroup {
    fn from(field: FormField) -> Self {
        FormFieldOrGroup::Single(field)
    }
}

impl From<Vec<FormField>> for FormFieldOrGroup {
    fn from(fields: Vec<FormField>) -> Self {
        FormFieldOrGroup::Group(fields)
    }
}

/// Flattens rows into a single ordered field list (row order, then in-row order).
pub fn flatten_fields(rows: &[FormFieldOrGroup]) -> Vec<&FormField> {
    rows.iter().flat_map(|row| row.fields().iter()).collect()
}

/// When a step's fields are validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepValidation {
    /// Validate the step's fields before moving to the next step.
    #[default]
    OnNext,
    /// Only validate on final submit.
    OnSubmit,
}

impl StepValidation {
    /// The literal used in generated code.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepValidation::OnNext => "onNext",
            StepValidation::OnSubmit => "onSubmit",
        }
    }
}

/// Visibility predicate of a conditional step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCondition {
    /// Field (from an earlier step) the predicate reads.
    pub depends_on: String,
    /// TypeScript expression over `values`, emitted verbatim.
    pub condition: String,
}

/// One step of a multi-step form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStep {
    /// Unique step id.
    pub id: String,
    /// Heading shown above the step.
    pub title: String,
    /// Optional text under the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rows of this step.
    #[serde(default)]
    pub fields: Vec<FormFieldOrGroup>,
    /// Validation timing.
    #[serde(default)]
    pub validation: StepValidation,
    /// Optional visibility predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<StepCondition>,
}

impl FormStep {
    /// Creates an unconditional step validated on next.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        fields: Vec<FormFieldOrGroup>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields,
            validation: StepValidation::OnNext,
            conditional: None,
        }
    }

    /// Attaches a visibility predicate.
    pub fn with_condition(
        mut self,
        depends_on: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.conditional = Some(StepCondition {
            depends_on: depends_on.into(),
            condition: condition.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_deserializes_as_single_or_group() {
        let rows: Vec<FormFieldOrGroup> = serde_json::from_value(json!([
            { "variant": "Input", "name": "email", "type": "email", "required": true },
            [
                { "variant": "Checkbox", "name": "terms", "required": true },
                { "variant": "Input", "name": "promo", "required": false }
            ]
        ]))
        .unwrap();

        assert!(matches!(rows[0], FormFieldOrGroup::Single(_)));
        match &rows[1] {
            FormFieldOrGroup::Group(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1].name, "promo");
            }
            _ => panic!("Expected a group"),
        }
    }

    #[test]
    fn test_row_errors_name_the_missing_key() {
        let err = serde_json::from_value::<Vec<FormFieldOrGroup>>(json!([
            { "variant": "Input", "label": "Email" }
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("missing field `name`"));

        let err = serde_json::from_value::<Vec<FormFieldOrGroup>>(json!([
            [{ "variant": "Input", "name": "a" }, { "name": "b" }]
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("field 1 of row group"));
        assert!(err.to_string().contains("missing field `variant`"));

        let err = serde_json::from_value::<FormFieldOrGroup>(json!("email")).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Expected a field object or an array of field objects"));
    }

    #[test]
    fn test_row_from_yaml() {
        let rows: Vec<FormFieldOrGroup> =
            serde_yaml::from_str("- variant: Input\n  name: email\n- - variant: Switch\n    name: news\n")
                .unwrap();
        assert!(matches!(rows[0], FormFieldOrGroup::Single(_)));
        assert_eq!(rows[1].fields()[0].name, "news");
    }

    #[test]
    fn test_field_camel_case_keys() {
        let field: FormField = serde_json::from_value(json!({
            "variant": "Input",
            "name": "city",
            "rowIndex": 3,
            "className": "w-full",
            "hour12": true
        }))
        .unwrap();

        assert_eq!(field.row_index, 3);
        assert_eq!(field.class_name.as_deref(), Some("w-full"));
        assert_eq!(field.hour12, Some(true));
        assert!(!field.is_required());
    }

    #[test]
    fn test_flatten_preserves_order() {
        let rows = vec![
            FormFieldOrGroup::from(FormField::new("Input", "a")),
            FormFieldOrGroup::from(vec![
                FormField::new("Input", "b"),
                FormField::new("Input", "c"),
            ]),
            FormFieldOrGroup::from(FormField::new("Input", "d")),
        ];
        let names: Vec<&str> = flatten_fields(&rows)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_required_is_strict() {
        assert!(!FormField::new("Input", "x").is_required());
        assert!(!FormField::new("Input", "x").with_required(false).is_required());
        assert!(FormField::new("Input", "x").with_required(true).is_required());
    }

    #[test]
    fn test_step_defaults() {
        let step: FormStep = serde_json::from_value(json!({
            "id": "details",
            "title": "Details",
            "conditional": { "dependsOn": "newsletter", "condition": "values.newsletter === true" }
        }))
        .unwrap();
        assert_eq!(step.validation, StepValidation::OnNext);
        assert!(step.fields.is_empty());
        assert_eq!(step.conditional.unwrap().depends_on, "newsletter");
    }
}
