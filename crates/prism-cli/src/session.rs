use anyhow::Result;

use prism::providers::base::Provider;
use prism::session::orchestrator::Session as Playground;

use crate::prompt::{InputType, Prompt};

/// Interactive loop: reads actions from the prompt and runs them against the playground
pub struct Session<'a, P> {
    playground: Playground<P>,
    prompt: Box<dyn Prompt + 'a>,
}

impl<'a, P: Provider> Session<'a, P> {
    pub fn new(playground: Playground<P>, prompt: Box<dyn Prompt + 'a>) -> Self {
        Session { playground, prompt }
    }

    pub fn start(&mut self) -> Result<()> {
        self.prompt.prism_ready(
            self.playground.credentials(),
            &self.playground.config().models,
        );
        if self.playground.credentials().is_empty() {
            self.prompt
                .warn("No API keys loaded. Use /keys to enter a Gemini or Groq key.");
        }

        loop {
            let input = self.prompt.get_input()?;
            match input.input_type {
                InputType::Exit => break,
                InputType::Chat | InputType::Compare => {
                    let content = input.content.unwrap_or_default();
                    self.submit(input.input_type, &content);
                }
                InputType::History => {
                    self.prompt.render_history(
                        self.playground.history(),
                        &self.playground.config().models,
                    );
                }
                InputType::ClearHistory => {
                    self.playground.clear_history();
                    self.prompt.info("History cleared");
                }
                InputType::Keys => {
                    let credentials = self
                        .prompt
                        .get_credentials(self.playground.credentials())?;
                    self.playground.set_credentials(credentials);
                    let summary = describe_keys(self.playground.credentials());
                    self.prompt.info(&summary);
                }
                InputType::SystemPrompt => {
                    self.playground
                        .set_system_prompt(input.content.unwrap_or_default());
                    let message = format!(
                        "System prompt set to: {}",
                        self.playground.config().system_prompt
                    );
                    self.prompt.info(&message);
                }
            }
        }

        self.prompt.close();
        Ok(())
    }

    #[cfg(test)]
    pub fn playground(&self) -> &Playground<P> {
        &self.playground
    }

    fn submit(&mut self, input_type: InputType, content: &str) {
        let credentials = self.playground.credentials().clone();

        self.prompt.show_busy();
        let result = match input_type {
            InputType::Chat => self.playground.send_chat(content, &credentials),
            _ => self.playground.compare_all(content, &credentials),
        };
        self.prompt.hide_busy();

        match result {
            Ok(entry) => self
                .prompt
                .render_entry(&entry, &self.playground.config().models),
            Err(e) => self.prompt.warn(&e.to_string()),
        }
    }
}

fn describe_keys(credentials: &prism::session::credentials::Credentials) -> String {
    let state = |key: Option<&str>| if key.is_some() { "set" } else { "not set" };
    format!(
        "Gemini key {}, Groq key {}",
        state(credentials.primary()),
        state(credentials.secondary())
    )
}
