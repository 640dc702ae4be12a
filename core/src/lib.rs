#![deny(missing_docs)]

//! # formgen Core
//!
//! Core library of the form-definition-to-source-code generator.
//!
//! Given ordered rows of field definitions and a [`GenerationConfig`], it
//! produces a TSX component (validation schema, default values, markup and
//! submit handler) for `react-hook-form` with shadcn/ui controls. Every entry
//! point is a pure function over its inputs.

/// Shared error types.
pub mod error;

/// Field, row and step definitions.
pub mod model;

/// Per-call generation options.
pub mod config;

/// Variant tag to code-generation rules.
pub mod registry;

/// Validation schema and JSON Schema generation.
pub mod schema_generator;

/// Strategy Pattern Interfaces (validation library dialects).
pub mod strategies;

/// JSX markup generation.
pub mod markup;

/// Import statement collection.
pub mod imports;

/// Module assembly and generator entry points.
pub mod codegen;

/// Source normalization.
pub mod formatter;

/// Caller-contract checks.
pub mod validation;

/// External component notice.
pub mod notice;

/// Tool request / response payloads.
pub mod tool;

/// Indentation-aware writer and escaping helpers.
pub mod writer;

pub use codegen::{
    assemble, build_default_values, generate_form_code, generate_multi_step_form_code,
    SourceParts,
};
pub use config::{FormLibrary, GenerationConfig, ValidationLibrary};
pub use error::{AppError, AppResult};
pub use formatter::format_source;
pub use markup::{build_markup, column_widths, Markup};
pub use model::{
    flatten_fields, FieldOption, FormField, FormFieldOrGroup, FormStep, StepCondition,
    StepValidation,
};
pub use notice::{external_variants_used, external_variants_used_in_steps, ExternalComponent};
pub use registry::{list_external, lookup, Variant, VariantRule};
pub use schema_generator::{
    build_json_schema, build_schema, build_schema_map, export_json_schema, JsonSchemaExport,
    JsonSchemaOptions, SchemaBase, SchemaConstraint,
};
pub use strategies::{dialect_for, SchemaDialect, YupDialect, ZodDialect};
pub use tool::{handle_create_form, tool_definition, CreateFormRequest, ToolContent, ToolResponse};
pub use validation::{validate_fields, validate_steps};
