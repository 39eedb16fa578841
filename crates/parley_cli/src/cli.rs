//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Chat with hosted language models, with optional file context
#[derive(Parser)]
#[command(name = "parley", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive chat session
    Chat {
        /// Model display name or deployment ID. Uses PARLEY_MODEL if not set.
        #[arg(short, long)]
        model: Option<String>,
        /// File to load as context before the first prompt
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Send a single prompt and print the reply
    Ask {
        /// Prompt text
        #[arg(short, long)]
        prompt: String,
        /// File to use as context (.txt, .pdf, .png, .jpg, ...)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Model display name or deployment ID
        #[arg(short, long)]
        model: Option<String>,
    },
    /// List the configured models
    Models,
    /// Show what context a file would produce
    Extract {
        /// File to extract
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::parse_from([
            "parley", "ask", "-p", "hello", "--file", "notes.txt", "-o", "json",
        ]);
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Command::Ask {
                prompt,
                file,
                model,
            } => {
                assert_eq!(prompt, "hello");
                assert_eq!(file, Some(PathBuf::from("notes.txt")));
                assert!(model.is_none());
            }
            _ => panic!("Expected ask command"),
        }
    }
}
