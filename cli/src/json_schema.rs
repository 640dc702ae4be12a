#![deny(missing_docs)]

//! # JSON Schema Command
//!
//! Exports the draft-07 JSON Schema of a form's values.

use std::fs;
use std::path::PathBuf;

use formgen_core::{export_json_schema, JsonSchemaOptions};

use crate::error::CliResult;
use crate::input::load_document;

/// Arguments for the json-schema command.
#[derive(clap::Args, Debug, Clone)]
pub struct JsonSchemaArgs {
    /// Form definition. `-` reads stdin.
    pub input: PathBuf,

    /// Output file.
    #[clap(long, short, default_value = "form-schema.json")]
    pub output: PathBuf,

    /// Print to stdout instead of writing the output file.
    #[clap(long)]
    pub stdout: bool,

    /// Schema title.
    #[clap(long)]
    pub title: Option<String>,

    /// Schema description.
    #[clap(long)]
    pub description: Option<String>,
}

/// Executes the export.
pub fn execute(args: &JsonSchemaArgs) -> CliResult<()> {
    let rows = load_document(&args.input)?.rows();
    let options = JsonSchemaOptions {
        title: args.title.clone(),
        description: args.description.clone(),
    };
    let export = export_json_schema(&rows, &options)?;

    if args.stdout {
        println!("{}", export.contents);
        return Ok(());
    }
    fs::write(&args.output, format!("{}\n", export.contents))?;
    println!("Wrote {} ({}) to {:?}", export.filename, export.mime, args.output);
    Ok(())
}
