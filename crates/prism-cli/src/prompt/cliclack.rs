use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::{input, spinner};
use console::style;
use prism::client::Notifier;
use prism::config::ModelSet;
use prism::session::credentials::Credentials;
use prism::session::history::{History, HistoryEntry};

use super::{Input, InputType, Prompt, Theme};
use crate::render::{history_markdown, responses_markdown};

pub struct CliclackPrompt {
    spinner: cliclack::ProgressBar,
    input_mode: InputMode,
    submit_mode: SubmitMode,
    theme: Theme,
}

enum InputMode {
    Singleline,
    Multiline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitMode {
    Chat,
    Compare,
}

impl SubmitMode {
    fn input_type(&self) -> InputType {
        match self {
            SubmitMode::Chat => InputType::Chat,
            SubmitMode::Compare => InputType::Compare,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SubmitMode::Chat => "chat",
            SubmitMode::Compare => "compare",
        }
    }
}

/// What a line typed at the prompt asks for
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Exit,
    Multiline,
    Singleline,
    ToggleTheme,
    Help,
    History,
    Clear,
    Keys,
    System(String),
    /// Switch the submit mode, optionally sending a message right away
    Mode(SubmitMode, Option<String>),
    Message(String),
}

fn parse_command(text: &str) -> Command {
    let text = text.trim();
    let (head, rest) = match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (text, ""),
    };
    let rest = (!rest.is_empty()).then(|| rest.to_string());

    match head.to_ascii_lowercase().as_str() {
        "/exit" | "/quit" => Command::Exit,
        "/m" => Command::Multiline,
        "/s" => Command::Singleline,
        "/t" => Command::ToggleTheme,
        "/?" => Command::Help,
        "/history" => Command::History,
        "/clear" => Command::Clear,
        "/keys" => Command::Keys,
        "/system" => Command::System(rest.unwrap_or_default()),
        "/chat" => Command::Mode(SubmitMode::Chat, rest),
        "/compare" => Command::Mode(SubmitMode::Compare, rest),
        _ => Command::Message(text.to_string()),
    }
}

impl CliclackPrompt {
    pub fn new() -> Self {
        CliclackPrompt {
            spinner: spinner(),
            input_mode: InputMode::Multiline,
            submit_mode: SubmitMode::Compare,
            theme: Theme::Dark,
        }
    }

    fn theme_name(&self) -> &'static str {
        match self.theme {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("/chat [message] - Send messages to a single model (Gemini, or Groq without a Gemini key)");
        println!("/compare [message] - Send messages to every model with a key");
        println!("/history - Show the most recent exchanges, newest first");
        println!("/clear - Clear the session history");
        println!("/keys - Enter API keys for this session");
        println!("/system <prompt> - Replace the system prompt (empty restores the default)");
        println!("/exit - Exit the session");
        println!("/m - Switch to multiline input mode");
        println!("/s - Switch to singleline input mode");
        println!("/t - Toggle Light/Dark theme");
        println!("/? - Display this help message");
    }

    fn ask_for_key(&self, name: &str, current: Option<&str>) -> Result<Option<String>> {
        if current.is_some() {
            let _ = cliclack::log::info(format!("A {} API key is already set", name));
            if !cliclack::confirm(format!("Would you like to replace the {} key?", name))
                .initial_value(false)
                .interact()?
            {
                return Ok(current.map(str::to_string));
            }
        } else if !cliclack::confirm(format!("Would you like to enter a {} API key?", name))
            .initial_value(true)
            .interact()?
        {
            return Ok(None);
        }

        let value = cliclack::password(format!("Enter the {} API key", name))
            .mask('▪')
            .interact()?;
        Ok(Some(value))
    }
}

impl Default for CliclackPrompt {
    fn default() -> Self {
        Self::new()
    }
}

fn print(content: &str, theme: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();
    // Fall back to plain output when the terminal can't be highlighted
    if printed.is_err() {
        println!("{}", content);
    }
}

fn print_newline() {
    println!();
}

fn flush() {
    let _ = io::stdout().flush();
}

impl Prompt for CliclackPrompt {
    fn render_entry(&mut self, entry: &HistoryEntry, models: &ModelSet) {
        print(&responses_markdown(entry, models), self.theme_name());
        print_newline();
        flush();
    }

    fn render_history(&mut self, history: &History, models: &ModelSet) {
        match history_markdown(history, models) {
            Some(markdown) => print(&markdown, self.theme_name()),
            None => {
                let _ = cliclack::log::info("No history yet");
            }
        }
        print_newline();
        flush();
    }

    fn warn(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn info(&mut self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn get_input(&mut self) -> Result<Input> {
        loop {
            let label = format!(
                "PRISM [{}]: ( ◇ )>         [Help: /?]",
                self.submit_mode.label()
            );
            let mut input = input(label).placeholder("");
            match self.input_mode {
                InputMode::Multiline => input = input.multiline(),
                InputMode::Singleline => (),
            }
            let message_text: String = input.interact()?;

            match parse_command(&message_text) {
                Command::Exit => return Ok(Input::new(InputType::Exit)),
                Command::Multiline => self.input_mode = InputMode::Multiline,
                Command::Singleline => self.input_mode = InputMode::Singleline,
                Command::ToggleTheme => {
                    self.theme = match self.theme {
                        Theme::Light => {
                            println!("Switching to Dark theme");
                            Theme::Dark
                        }
                        Theme::Dark => {
                            println!("Switching to Light theme");
                            Theme::Light
                        }
                    };
                }
                Command::Help => self.print_help(),
                Command::History => return Ok(Input::new(InputType::History)),
                Command::Clear => return Ok(Input::new(InputType::ClearHistory)),
                Command::Keys => return Ok(Input::new(InputType::Keys)),
                Command::System(prompt) => {
                    return Ok(Input::with_content(InputType::SystemPrompt, prompt))
                }
                Command::Mode(mode, message) => {
                    self.submit_mode = mode;
                    if let Some(message) = message {
                        return Ok(Input::with_content(mode.input_type(), message));
                    }
                    println!("Sending to {} from now on", style(mode.label()).cyan());
                }
                Command::Message(message) => {
                    return Ok(Input::with_content(self.submit_mode.input_type(), message))
                }
            }
        }
    }

    fn get_credentials(&mut self, current: &Credentials) -> Result<Credentials> {
        let primary = self.ask_for_key("Gemini", current.primary())?;
        let secondary = self.ask_for_key("Groq", current.secondary())?;
        Ok(Credentials::new(primary, secondary))
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner.start("awaiting replies");
    }

    fn hide_busy(&mut self) {
        self.spinner.stop("");
    }

    fn close(&self) {
        let _ = cliclack::outro("Session ended, history discarded");
    }
}

/// Shows retry notices from the completion client as terminal warnings
pub struct CliclackNotifier;

impl Notifier for CliclackNotifier {
    fn notify(&self, notice: &str) {
        let _ = cliclack::log::warning(notice);
    }
}
