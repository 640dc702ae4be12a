#![deny(missing_docs)]

//! # Generation Config
//!
//! Per-call options selecting the form library, the validation library and
//! a few styling hints. A config is an immutable snapshot: the generator never
//! mutates it and never keeps it after a call returns.

use crate::error::{AppError, AppResult};
use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};

/// Target form-library style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormLibrary {
    /// `react-hook-form` nested in the shadcn `<Form>` context provider.
    #[default]
    Shadcn,
    /// Plain `react-hook-form` with manual `register` calls.
    HookForm,
}

impl FormLibrary {
    /// Whether the markup is nested in a form-context provider.
    pub fn uses_wrapper(&self) -> bool {
        matches!(self, FormLibrary::Shadcn)
    }
}

/// Target validation library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationLibrary {
    /// `zod`
    #[default]
    Zod,
    /// `yup`
    Yup,
}

/// Options controlling one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Form-library style.
    pub form_library: FormLibrary,
    /// Validation library.
    pub validation_library: ValidationLibrary,
    /// Emit step containers and navigation.
    pub is_multi_step: bool,
    /// Emit field descriptions.
    pub include_descriptions: bool,
    /// Name of the exported component.
    pub component_name: String,
    /// Classes on the `<form>` element.
    pub form_class_name: String,
    /// Text of the submit button.
    pub submit_label: String,
    /// Prepend the `"use client"` directive.
    pub use_client_directive: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            form_library: FormLibrary::Shadcn,
            validation_library: ValidationLibrary::Zod,
            is_multi_step: false,
            include_descriptions: true,
            component_name: "MyForm".to_string(),
            form_class_name: "space-y-8 max-w-3xl mx-auto py-10".to_string(),
            submit_label: "Submit".to_string(),
            use_client_directive: true,
        }
    }
}

impl GenerationConfig {
    /// Parses a config from JSON. Missing keys take their default.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::General(format!("Failed to parse config JSON: {}", e)))
    }

    /// Parses a config from YAML. Missing keys take their default.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::General(format!("Failed to parse config YAML: {}", e)))
    }

    /// Sets the form library.
    pub fn with_form_library(mut self, form_library: FormLibrary) -> Self {
        self.form_library = form_library;
        self
    }

    /// Sets the validation library.
    pub fn with_validation_library(mut self, validation_library: ValidationLibrary) -> Self {
        self.validation_library = validation_library;
        self
    }

    /// Enables or disables multi-step output.
    pub fn with_multi_step(mut self, is_multi_step: bool) -> Self {
        self.is_multi_step = is_multi_step;
        self
    }

    /// The component name as an UpperCamelCase identifier.
    pub fn component_ident(&self) -> String {
        let ident = self.component_name.to_upper_camel_case();
        match ident.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => ident,
            Some(_) => format!("Form{}", ident),
            None => "MyForm".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_takes_defaults() {
        let config =
            GenerationConfig::from_json_str(r#"{"formLibrary":"hookForm","isMultiStep":true}"#)
                .unwrap();
        assert_eq!(config.form_library, FormLibrary::HookForm);
        assert!(config.is_multi_step);
        assert_eq!(config.validation_library, ValidationLibrary::Zod);
        assert!(config.include_descriptions);
        assert_eq!(config.submit_label, "Submit");
    }

    #[test]
    fn test_yaml_config() {
        let yaml = "validationLibrary: yup\nincludeDescriptions: false\n";
        let config = GenerationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.validation_library, ValidationLibrary::Yup);
        assert!(!config.include_descriptions);
    }

    #[test]
    fn test_invalid_library_rejected() {
        let err = GenerationConfig::from_json_str(r#"{"formLibrary":"formik"}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config JSON"));
    }

    #[test]
    fn test_component_ident() {
        let mut config = GenerationConfig::default();
        config.component_name = "contact form".into();
        assert_eq!(config.component_ident(), "ContactForm");

        config.component_name = "2fa".into();
        assert_eq!(config.component_ident(), "Form2fa");

        config.component_name = String::new();
        assert_eq!(config.component_ident(), "MyForm");
    }
}
