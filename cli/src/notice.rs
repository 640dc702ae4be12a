//! # Notice Command
//!
//! Lists the components of a form that must be installed by hand.

use std::path::PathBuf;

use formgen_core::{external_variants_used, external_variants_used_in_steps, ExternalComponent};

use crate::error::CliResult;
use crate::input::{load_document, FormDocument};

/// Arguments for the notice command.
#[derive(clap::Args, Debug, Clone)]
pub struct NoticeArgs {
    /// Form definition. `-` reads stdin.
    pub input: PathBuf,

    /// Print a JSON array instead of text lines.
    #[clap(long)]
    pub json: bool,
}

/// Collects the external components of the document.
pub fn collect(args: &NoticeArgs) -> CliResult<Vec<ExternalComponent>> {
    let components = match load_document(&args.input)? {
        FormDocument::Rows(rows) => external_variants_used(&rows),
        FormDocument::Steps { steps } => external_variants_used_in_steps(&steps),
    };
    Ok(components)
}

/// Executes the listing.
pub fn execute(args: &NoticeArgs) -> CliResult<()> {
    let components = collect(args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&components)?);
        return Ok(());
    }
    if components.is_empty() {
        println!("No external components required.");
    }
    for component in components {
        println!("{}: {}", component.variant, component.help_url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgen_core::Variant;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("form.json");
        fs::write(
            &input,
            r#"[{"variant":"Signature Input","name":"signature"},
                [{"variant":"Input","name":"name"},{"variant":"Signature Input","name":"initials"}]]"#,
        )
        .unwrap();

        let args = NoticeArgs { input, json: true };
        let components = collect(&args).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].variant, Variant::SignatureInput);
        execute(&args).unwrap();
    }
}
