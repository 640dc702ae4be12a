#![deny(missing_docs)]

//! # Schema Generator
//!
//! Converts the field list into validation constraints.
//!
//! The constraints are first computed as a language-neutral IR
//! (`SchemaConstraint`), then rendered either as validation-library source
//! through a [`SchemaDialect`] or as a draft-07 JSON Schema document.
//!
//! Unlike markup generation, schema generation never fails: a variant missing
//! from the registry falls back to an optional string so custom variants still
//! yield usable code.

use crate::model::{flatten_fields, FormField, FormFieldOrGroup};
use crate::registry::lookup;
use crate::strategies::{SchemaDialect, SCHEMA_IDENT};
use crate::validation::is_identifier;
use crate::writer::js_string;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};

/// Draft used for exported JSON Schema documents.
pub const JSON_SCHEMA_DIALECT: &str = "http://json-schema.org/draft-07/schema#";

/// Default filename of the JSON Schema download.
pub const JSON_SCHEMA_FILENAME: &str = "form-schema.json";

/// MIME type of the JSON Schema download.
pub const JSON_SCHEMA_MIME: &str = "application/json";

/// Base constraint of a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaBase {
    /// Any string.
    String,
    /// A string in email format.
    Email,
    /// A number coerced from the input value.
    Number {
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
    },
    /// `true` / `false`.
    Boolean,
    /// A `Date` or its string representation.
    DateOrString,
    /// A list of strings.
    StringArray {
        /// Minimum number of entries.
        min_items: usize,
    },
    /// A list of uploaded files.
    Files,
    /// `[country, state?]`
    Location,
}

/// A field's constraint: base type plus optionality.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaConstraint {
    /// Base type.
    pub base: SchemaBase,
    /// Whether the value may be absent.
    pub optional: bool,
}

impl SchemaConstraint {
    /// The lenient constraint used for variants missing from the registry.
    pub fn fallback() -> Self {
        Self {
            base: SchemaBase::String,
            optional: true,
        }
    }
}

/// Options of the JSON Schema export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonSchemaOptions {
    /// Document title.
    pub title: Option<String>,
    /// Document description.
    pub description: Option<String>,
}

/// A JSON Schema document packaged for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSchemaExport {
    /// Suggested filename.
    pub filename: String,
    /// MIME type.
    pub mime: String,
    /// Pretty-printed JSON.
    pub contents: String,
}

/// Flattened data fields paired with their constraint, in declaration order.
fn schema_entries(rows: &[FormFieldOrGroup]) -> Vec<(&FormField, SchemaConstraint)> {
    flatten_fields(rows)
        .into_iter()
        .filter_map(|field| match lookup(&field.variant) {
            Ok(rule) if !rule.is_data() => None,
            Ok(rule) => Some((field, (rule.schema)(field))),
            Err(_) => {
                tracing::debug!(
                    variant = %field.variant,
                    name = %field.name,
                    "unknown variant, using optional string constraint"
                );
                Some((field, SchemaConstraint::fallback()))
            }
        })
        .collect()
}

/// Maps every data field name to its constraint, preserving field order.
///
/// `Label` fields are skipped. When names repeat, the last constraint wins at
/// the position of the first occurrence.
pub fn build_schema_map(rows: &[FormFieldOrGroup]) -> IndexMap<String, SchemaConstraint> {
    schema_entries(rows)
        .into_iter()
        .map(|(field, constraint)| (field.name.clone(), constraint))
        .collect()
}

/// Object key as written in generated source.
pub(crate) fn object_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        js_string(name)
    }
}

/// Renders the `const formSchema = ...` declaration.
///
/// # Arguments
///
/// * `rows` - The form rows.
/// * `dialect` - The validation library to emit.
pub fn build_schema(rows: &[FormFieldOrGroup], dialect: &dyn SchemaDialect) -> String {
    let entries: Vec<(String, String)> = build_schema_map(rows)
        .iter()
        .map(|(name, constraint)| (object_key(name), dialect.constraint(constraint)))
        .collect();
    format!("const {} = {}", SCHEMA_IDENT, dialect.object(&entries))
}

fn json_number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

fn base_json_schema(base: &SchemaBase) -> Map<String, Value> {
    let value = match base {
        SchemaBase::String => json!({ "type": "string" }),
        SchemaBase::Email => json!({ "type": "string", "format": "email" }),
        SchemaBase::Number { min, max } => {
            let mut obj = Map::new();
            obj.insert("type".to_string(), json!("number"));
            if let Some(min) = min {
                obj.insert("minimum".to_string(), json_number(*min));
            }
            if let Some(max) = max {
                obj.insert("maximum".to_string(), json_number(*max));
            }
            Value::Object(obj)
        }
        SchemaBase::Boolean => json!({ "type": "boolean" }),
        SchemaBase::DateOrString => json!({ "type": "string", "format": "date-time" }),
        SchemaBase::StringArray { min_items } => json!({
            "type": "array",
            "items": { "type": "string" },
            "minItems": min_items
        }),
        SchemaBase::Files => json!({
            "type": "array",
            "items": { "type": "string", "format": "binary" }
        }),
        SchemaBase::Location => json!({
            "type": "array",
            "items": [{ "type": "string" }, { "type": "string" }],
            "minItems": 1,
            "maxItems": 2
        }),
    };
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Generates a draft-07 JSON Schema object describing the form values.
///
/// Properties follow field order; `required` lists the strictly required
/// fields; labels, descriptions and editor defaults are carried as
/// `title`, `description` and `default`.
pub fn build_json_schema(rows: &[FormFieldOrGroup], options: &JsonSchemaOptions) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for (field, constraint) in schema_entries(rows) {
        let mut prop = base_json_schema(&constraint.base);
        if !field.label.trim().is_empty() {
            prop.insert("title".to_string(), json!(field.label));
        }
        if let Some(desc) = field.description.as_deref().filter(|d| !d.is_empty()) {
            prop.insert("description".to_string(), json!(desc));
        }
        if let Some(default) = &field.value {
            prop.insert("default".to_string(), default.clone());
        }
        if !constraint.optional && !required.contains(&field.name) {
            required.push(field.name.clone());
        }
        properties.insert(field.name.clone(), Value::Object(prop));
    }

    let mut doc = Map::new();
    doc.insert("$schema".to_string(), json!(JSON_SCHEMA_DIALECT));
    if let Some(title) = &options.title {
        doc.insert("title".to_string(), json!(title));
    }
    if let Some(desc) = &options.description {
        doc.insert("description".to_string(), json!(desc));
    }
    doc.insert("type".to_string(), json!("object"));
    doc.insert("properties".to_string(), Value::Object(properties));
    doc.insert("required".to_string(), json!(required));
    doc.insert("additionalProperties".to_string(), json!(false));
    Value::Object(doc)
}

/// Packages the JSON Schema as a `form-schema.json` download.
pub fn export_json_schema(
    rows: &[FormFieldOrGroup],
    options: &JsonSchemaOptions,
) -> crate::error::AppResult<JsonSchemaExport> {
    let schema = build_json_schema(rows, options);
    let contents = serde_json::to_string_pretty(&schema).map_err(|e| {
        crate::error::AppError::General(format!("JSON serialization failed: {}", e))
    })?;
    Ok(JsonSchemaExport {
        filename: JSON_SCHEMA_FILENAME.to_string(),
        mime: JSON_SCHEMA_MIME.to_string(),
        contents,
    })
}
