#![deny(missing_docs)]

//! # Input Loading
//!
//! Reads form definitions and generation configs from files or stdin.
//! `.yaml` / `.yml` files are parsed as YAML, everything else as JSON.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use formgen_core::{
    FormFieldOrGroup, FormLibrary, FormStep, GenerationConfig, ValidationLibrary,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// A form definition file: plain rows, or a list of steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormDocument {
    /// Rows of a single-page form.
    Rows(Vec<FormFieldOrGroup>),
    /// Steps of a multi-step form.
    Steps {
        /// The steps in order.
        steps: Vec<FormStep>,
    },
}

impl FormDocument {
    /// All rows, across steps when the document is multi-step.
    pub fn rows(&self) -> Vec<FormFieldOrGroup> {
        match self {
            FormDocument::Rows(rows) => rows.clone(),
            FormDocument::Steps { steps } => steps
                .iter()
                .flat_map(|step| step.fields.iter().cloned())
                .collect(),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reads `path`, or stdin when the path is `-`.
pub fn read_source(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    if !path.exists() {
        return Err(CliError::General(format!("Input file not found: {:?}", path)));
    }
    Ok(fs::read_to_string(path)?)
}

/// Deserializes the contents of `path` by extension.
pub fn parse_file<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = read_source(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read input");
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&text)?)
    } else {
        Ok(serde_json::from_str(&text)?)
    }
}

/// Loads a form definition.
pub fn load_document(path: &Path) -> CliResult<FormDocument> {
    parse_file(path)
}

/// `--form-library` values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormLibraryArg {
    /// shadcn `<Form>` wrapper.
    Shadcn,
    /// Plain react-hook-form.
    HookForm,
}

impl From<FormLibraryArg> for FormLibrary {
    fn from(arg: FormLibraryArg) -> Self {
        match arg {
            FormLibraryArg::Shadcn => FormLibrary::Shadcn,
            FormLibraryArg::HookForm => FormLibrary::HookForm,
        }
    }
}

/// `--validation-library` values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationLibraryArg {
    /// zod
    Zod,
    /// yup
    Yup,
}

impl From<ValidationLibraryArg> for ValidationLibrary {
    fn from(arg: ValidationLibraryArg) -> Self {
        match arg {
            ValidationLibraryArg::Zod => ValidationLibrary::Zod,
            ValidationLibraryArg::Yup => ValidationLibrary::Yup,
        }
    }
}

/// Generation options shared by the commands that emit code.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file (JSON or YAML). Flags below override its values.
    #[clap(long, env = "FORMGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Form-library style.
    #[clap(long, value_enum)]
    pub form_library: Option<FormLibraryArg>,

    /// Validation library.
    #[clap(long, value_enum)]
    pub validation_library: Option<ValidationLibraryArg>,

    /// Render flat rows as a multi-step form.
    #[clap(long)]
    pub multi_step: bool,

    /// Leave field descriptions out of the markup.
    #[clap(long)]
    pub no_descriptions: bool,

    /// Name of the generated component.
    #[clap(long)]
    pub component_name: Option<String>,
}

impl ConfigArgs {
    /// Resolves the config: file values first, then flag overrides.
    pub fn resolve(&self) -> CliResult<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => parse_file(path)?,
            None => GenerationConfig::default(),
        };
        if let Some(lib) = self.form_library {
            config.form_library = lib.into();
        }
        if let Some(lib) = self.validation_library {
            config.validation_library = lib.into();
        }
        if self.multi_step {
            config.is_multi_step = true;
        }
        if self.no_descriptions {
            config.include_descriptions = false;
        }
        if let Some(name) = &self.component_name {
            config.component_name = name.clone();
        }
        Ok(config)
    }
}
