#![deny(missing_docs)]

//! # formgen CLI
//!
//! Command Line Interface for the form-definition-to-source-code generator.
//!
//! Supported Commands:
//! - `generate`: Form definition -> TSX component.
//! - `json-schema`: Form definition -> `form-schema.json`.
//! - `notice`: Lists components that must be installed manually.
//! - `tool`: Answers a `create_form_from_rows` tool call.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod generate;
mod input;
mod json_schema;
mod notice;
mod tool;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Form definition to TSX generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a form component from field rows or steps.
    Generate(generate::GenerateArgs),
    /// Export the JSON Schema of the form values.
    JsonSchema(json_schema::JsonSchemaArgs),
    /// List the external components a form needs.
    Notice(notice::NoticeArgs),
    /// Answer a create_form_from_rows tool call.
    Tool(tool::ToolArgs),
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
        Commands::JsonSchema(args) => json_schema::execute(args)?,
        Commands::Notice(args) => notice::execute(args)?,
        Commands::Tool(args) => tool::execute(args)?,
    }

    Ok(())
}
