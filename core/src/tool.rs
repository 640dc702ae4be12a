//! # Tool Payloads
//!
//! Request and response shapes of the "create form from field rows" tool
//! exposed to automation clients. Protocol framing belongs to the caller;
//! this module only deals with the JSON payloads.

use crate::codegen::generate_form_code;
use crate::config::GenerationConfig;
use crate::error::{AppError, AppResult};
use crate::model::FormFieldOrGroup;
use crate::notice::external_variants_used;
use crate::registry::Variant;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Name under which the tool is registered.
pub const TOOL_NAME: &str = "create_form_from_rows";

const TOOL_DESCRIPTION: &str = "Generate a React form component (react-hook-form, shadcn/ui \
and a validation schema) from rows of field definitions. Each row is one field object or \
an array of field objects rendered side by side.";

/// Arguments of a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    /// Rows of the form.
    pub rows: Vec<FormFieldOrGroup>,
    /// Generation options; defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GenerationConfig>,
}

/// One content item of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    /// Result payload.
    pub content: Vec<ToolContent>,
    /// Whether the call failed; `content` then holds the error message.
    pub is_error: bool,
}

impl ToolResponse {
    fn text(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
            is_error: false,
        }
    }

    fn error(err: &AppError) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: err.to_string(),
            }],
            is_error: true,
        }
    }
}

fn field_schema() -> Value {
    let variants: Vec<&str> = Variant::ALL.iter().map(|v| v.name()).collect();
    json!({
        "type": "object",
        "properties": {
            "variant": { "type": "string", "enum": variants },
            "name": { "type": "string", "pattern": "^[A-Za-z_$][A-Za-z0-9_$]*$" },
            "type": { "type": "string" },
            "label": { "type": "string" },
            "placeholder": { "type": "string" },
            "description": { "type": "string" },
            "required": { "type": "boolean" },
            "disabled": { "type": "boolean" },
            "min": { "type": "number" },
            "max": { "type": "number" },
            "step": { "type": "number" },
            "value": {},
            "checked": { "type": "boolean" },
            "rowIndex": { "type": "integer", "minimum": 0 },
            "locale": { "type": "string" },
            "hour12": { "type": "boolean" },
            "className": { "type": "string" },
            "options": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "label": { "type": "string" },
                        "value": { "type": "string" }
                    },
                    "required": ["label", "value"]
                }
            }
        },
        "required": ["variant", "name"]
    })
}

/// The tool's registration record: `{ name, description, inputSchema }`.
pub fn tool_definition() -> Value {
    let field = field_schema();
    json!({
        "name": TOOL_NAME,
        "description": TOOL_DESCRIPTION,
        "inputSchema": {
            "type": "object",
            "properties": {
                "rows": {
                    "type": "array",
                    "description": "Form rows in display order",
                    "items": {
                        "oneOf": [
                            field,
                            { "type": "array", "items": field, "minItems": 1, "maxItems": 12 }
                        ]
                    }
                },
                "config": {
                    "type": "object",
                    "properties": {
                        "formLibrary": { "type": "string", "enum": ["shadcn", "hookForm"] },
                        "validationLibrary": { "type": "string", "enum": ["zod", "yup"] },
                        "isMultiStep": { "type": "boolean" },
                        "includeDescriptions": { "type": "boolean" },
                        "componentName": { "type": "string" }
                    }
                }
            },
            "required": ["rows"]
        }
    })
}

/// Generates the form of a parsed request.
///
/// On success the first content item holds the source; a second one lists the
/// external components to install, when there are any.
pub fn create_form(request: &CreateFormRequest) -> AppResult<ToolResponse> {
    let config = request.config.clone().unwrap_or_default();
    let code = generate_form_code(&request.rows, &config)?;
    let mut response = ToolResponse::text(code);

    let external = external_variants_used(&request.rows);
    if !external.is_empty() {
        let lines: Vec<String> = external
            .iter()
            .map(|c| format!("- {}: {}", c.variant, c.help_url))
            .collect();
        response.content.push(ToolContent::Text {
            text: format!(
                "These components are not part of shadcn/ui and must be added manually:\n{}",
                lines.join("\n")
            ),
        });
    }
    Ok(response)
}

/// Handles raw tool arguments. Failures become `isError` responses.
pub fn handle_create_form(arguments: Value) -> ToolResponse {
    let request: CreateFormRequest = match serde_json::from_value(arguments) {
        Ok(request) => request,
        Err(e) => {
            let err = AppError::General(format!("Invalid arguments: {}", e));
            tracing::warn!(error = %err, tool = TOOL_NAME, "rejected tool call");
            return ToolResponse::error(&err);
        }
    };
    tracing::debug!(rows = request.rows.len(), tool = TOOL_NAME, "tool call");
    create_form(&request).unwrap_or_else(|err| {
        tracing::warn!(error = %err, tool = TOOL_NAME, "tool call failed");
        ToolResponse::error(&err)
    })
}
