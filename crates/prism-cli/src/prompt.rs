use anyhow::Result;
use prism::config::ModelSet;
use prism::session::credentials::Credentials;
use prism::session::history::{History, HistoryEntry};

pub mod cliclack;

/// The rendering surface: shows results and turns user input into actions
pub trait Prompt {
    fn render_entry(&mut self, entry: &HistoryEntry, models: &ModelSet);
    fn render_history(&mut self, history: &History, models: &ModelSet);
    fn warn(&mut self, message: &str);
    fn info(&mut self, message: &str);
    fn get_input(&mut self) -> Result<Input>;
    /// Ask for new keys, starting from the ones currently in use
    fn get_credentials(&mut self, current: &Credentials) -> Result<Credentials>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn close(&self);
    fn prism_ready(&self, credentials: &Credentials, models: &ModelSet) {
        println!("\n");
        println!("PRISM is ready! Compare models side-by-side, type /? for help.");
        println!(
            "Keys loaded: Gemini {}, Groq {}  ·  Models: {}, {}, {}",
            yes_no(credentials.primary().is_some()),
            yes_no(credentials.secondary().is_some()),
            models.primary,
            models.secondary_high,
            models.secondary_fast
        );
        println!("\n");
    }
}

fn yes_no(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "no"
    }
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Optional content as sometimes the user may be issuing a command eg. (Exit)
}

impl Input {
    pub fn new(input_type: InputType) -> Self {
        Input {
            input_type,
            content: None,
        }
    }

    pub fn with_content<S: Into<String>>(input_type: InputType, content: S) -> Self {
        Input {
            input_type,
            content: Some(content.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Chat,         // Send the message to a single model
    Compare,      // Send the message to every model with a key
    History,      // Show the session history
    ClearHistory, // Drop the session history
    Keys,         // Enter new API keys
    SystemPrompt, // Replace the system prompt with the content
    Exit,         // User wants to exit the session
}

pub enum Theme {
    Light,
    Dark,
}
