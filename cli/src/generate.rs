#![deny(missing_docs)]

//! # Generate Command
//!
//! Turns a form definition into a TSX component.

use std::fs;
use std::path::PathBuf;

use formgen_core::{
    external_variants_used, generate_form_code, generate_multi_step_form_code,
};

use crate::error::CliResult;
use crate::input::{load_document, ConfigArgs, FormDocument};

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Form definition (JSON or YAML rows, or `{ steps: [...] }`). `-` reads stdin.
    pub input: PathBuf,

    /// Write the component here instead of stdout.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Generation options.
    #[clap(flatten)]
    pub config: ConfigArgs,
}

/// Executes the generation.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let document = load_document(&args.input)?;
    let config = args.config.resolve()?;

    let code = match &document {
        FormDocument::Rows(rows) => generate_form_code(rows, &config)?,
        FormDocument::Steps { steps } => generate_multi_step_form_code(steps, &config)?,
    };

    for component in external_variants_used(&document.rows()) {
        tracing::warn!(
            variant = %component.variant,
            help_url = component.help_url,
            "component must be added to the project manually"
        );
    }

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, &code)?;
            println!("Generated {} at {:?}", config.component_ident(), path);
        }
        None => print!("{}", code),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::input::ValidationLibraryArg;
    use formgen_core::AppError;
    use tempfile::tempdir;

    #[test]
    fn test_execute_writes_component() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("form.json");
        let output = dir.path().join("components/contact-form.tsx");
        fs::write(
            &input,
            r#"[
                {"variant":"Input","name":"email","type":"email","required":true},
                [{"variant":"Checkbox","name":"terms","required":true},
                 {"variant":"Input","name":"promo"}]
            ]"#,
        )
        .unwrap();

        let args = GenerateArgs {
            input,
            output: Some(output.clone()),
            config: ConfigArgs {
                validation_library: Some(ValidationLibraryArg::Yup),
                component_name: Some("contact form".into()),
                ..ConfigArgs::default()
            },
        };
        execute(&args).unwrap();

        let contents = fs::read_to_string(output).unwrap();
        assert!(contents.contains("export default function ContactForm()"));
        assert!(contents.contains("email: yup.string().email().required(),"));
        assert_eq!(contents.matches("col-span-6").count(), 2);
    }

    #[test]
    fn test_execute_steps_document() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("wizard.yaml");
        let output = dir.path().join("wizard.tsx");
        fs::write(
            &input,
            r#"steps:
  - id: account
    title: Account
    fields:
      - variant: Input
        name: email
  - id: company
    title: Company
    conditional:
      dependsOn: email
      condition: values.email !== ""
    fields:
      - variant: Input
        name: companyName
"#,
        )
        .unwrap();

        let args = GenerateArgs {
            input,
            output: Some(output.clone()),
            config: ConfigArgs::default(),
        };
        execute(&args).unwrap();

        let contents = fs::read_to_string(output).unwrap();
        assert!(contents.contains("company: (values) => values.email !== \"\","));
    }

    #[test]
    fn test_execute_reports_unknown_variant() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("form.json");
        fs::write(&input, r#"[{"variant":"Foo","name":"foo"}]"#).unwrap();

        let args = GenerateArgs {
            input,
            output: Some(dir.path().join("out.tsx")),
            config: ConfigArgs::default(),
        };
        let err = execute(&args).unwrap_err();
        assert!(matches!(err, CliError::Core(AppError::UnknownVariant(_))));
    }
}
