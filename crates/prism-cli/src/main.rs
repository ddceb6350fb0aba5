use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod logging;
mod prompt;
mod render;
mod session;

use commands::chat::Target;
use config::Overrides;

#[derive(Parser)]
#[command(name = "prism")]
#[command(author, version, about = "PRISM - compare LLM responses side by side", long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send one prompt to a single model (Gemini, falling back to Groq) and print the reply
    Chat {
        /// The message to send
        prompt: String,
    },

    /// Send one prompt to every model with a key and print the replies in order
    Compare {
        /// The message to send
        prompt: String,
    },

    /// Start an interactive session (the default)
    Session,

    /// Print the version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging()?;

    match cli.command.unwrap_or(Command::Session) {
        Command::Chat { prompt } => {
            commands::chat::execute(&prompt, Target::Single, &cli.overrides)
        }
        Command::Compare { prompt } => {
            commands::chat::execute(&prompt, Target::All, &cli.overrides)
        }
        Command::Session => commands::session::execute(&cli.overrides),
        Command::Version => commands::version::execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "prism",
            "compare",
            "hello there",
            "--groq-key",
            "abc",
            "--primary-model",
            "gemini/gemini-1.5-pro",
        ])
        .unwrap();

        assert!(
            matches!(cli.command, Some(Command::Compare { ref prompt }) if prompt == "hello there")
        );
        assert_eq!(cli.overrides.groq_key.as_deref(), Some("abc"));
        assert_eq!(
            cli.overrides.primary_model.as_deref(),
            Some("gemini/gemini-1.5-pro")
        );
    }

    #[test]
    fn test_no_subcommand_defaults_to_session() {
        let cli = Cli::try_parse_from(["prism"]).unwrap();
        assert!(cli.command.is_none());
    }
}
