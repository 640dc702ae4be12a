//! # Tool Command
//!
//! Answers one "create form from field rows" tool call: reads the arguments
//! JSON and prints the tool response JSON.

use std::path::PathBuf;

use formgen_core::{handle_create_form, tool_definition, ToolResponse};

use crate::error::CliResult;
use crate::input::read_source;

/// Arguments for the tool command.
#[derive(clap::Args, Debug, Clone)]
pub struct ToolArgs {
    /// Tool arguments JSON (`{ rows, config? }`). `-` reads stdin.
    #[clap(default_value = "-")]
    pub input: PathBuf,

    /// Print the tool definition and exit.
    #[clap(long)]
    pub definition: bool,
}

/// Runs the tool call on raw JSON text.
pub fn respond(text: &str) -> CliResult<ToolResponse> {
    let arguments: serde_json::Value = serde_json::from_str(text)?;
    Ok(handle_create_form(arguments))
}

/// Executes the tool command.
pub fn execute(args: &ToolArgs) -> CliResult<()> {
    if args.definition {
        println!("{}", serde_json::to_string_pretty(&tool_definition())?);
        return Ok(());
    }
    let response = respond(&read_source(&args.input)?)?;
    if response.is_error {
        tracing::warn!("tool call returned an error response");
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_respond() {
        let response =
            respond(r#"{"rows":[{"variant":"Input","name":"email","type":"email"}]}"#).unwrap();
        assert!(!response.is_error);

        let response = respond(r#"{"rows":[{"variant":"Foo","name":"foo"}]}"#).unwrap();
        assert!(response.is_error);
    }

    #[test]
    fn test_respond_rejects_broken_json() {
        assert!(matches!(respond("{rows"), Err(CliError::Json(_))));
    }
}
