use strum::IntoEnumIterator;

use super::credentials::Credentials;
use super::history::{History, HistoryEntry};
use crate::client::CompletionClient;
use crate::config::PlaygroundConfig;
use crate::errors::{SessionError, SessionResult};
use crate::models::completion::CompletionResult;
use crate::models::slot::ModelSlot;
use crate::providers::base::Provider;

/// Ephemeral state of one playground session, and the actions a user can take on it.
///
/// Every action runs to completion before returning. Nothing here outlives the process.
pub struct Session<P> {
    client: CompletionClient<P>,
    config: PlaygroundConfig,
    credentials: Credentials,
    history: History,
}

impl<P: Provider> Session<P> {
    pub fn new(client: CompletionClient<P>, config: PlaygroundConfig) -> Self {
        let credentials = config.credentials.clone();
        Session {
            client,
            config,
            credentials,
            history: History::new(),
        }
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The credentials the user entered last, seeded from the configuration
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    pub fn set_system_prompt<S: Into<String>>(&mut self, system_prompt: S) {
        self.config.system_prompt = system_prompt.into();
        self.config = std::mem::take(&mut self.config).with_system_prompt_fallback();
    }

    /// Send `prompt` to a single model: the primary one if its key is present,
    /// otherwise the high capability secondary model.
    pub fn send_chat(
        &mut self,
        prompt: &str,
        credentials: &Credentials,
    ) -> SessionResult<HistoryEntry> {
        validate(prompt, credentials)?;

        let (slot, api_key) = [ModelSlot::Primary, ModelSlot::SecondaryHigh]
            .into_iter()
            .find_map(|slot| credentials.for_slot(slot).map(|key| (slot, key)))
            .ok_or(SessionError::NoCredentials)?;

        let result = self.complete(slot, api_key, prompt);
        Ok(self.append(HistoryEntry::new(prompt).with_response(slot, result)))
    }

    /// Send `prompt` to every slot that has a key, one after the other in slot order.
    /// Slots without a key are skipped and leave no trace in the entry.
    pub fn compare_all(
        &mut self,
        prompt: &str,
        credentials: &Credentials,
    ) -> SessionResult<HistoryEntry> {
        validate(prompt, credentials)?;

        let mut entry = HistoryEntry::new(prompt);
        for slot in ModelSlot::iter() {
            match credentials.for_slot(slot) {
                Some(api_key) => {
                    let result = self.complete(slot, api_key, prompt);
                    entry = entry.with_response(slot, result);
                }
                None => tracing::debug!(?slot, "no credential, skipping"),
            }
        }

        Ok(self.append(entry))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::info!("history cleared");
    }

    fn complete(&self, slot: ModelSlot, api_key: &str, prompt: &str) -> CompletionResult {
        let model = self.config.models.model(slot);
        self.client
            .request(model, api_key, &self.config.system_prompt, prompt)
    }

    fn append(&mut self, entry: HistoryEntry) -> HistoryEntry {
        tracing::info!(
            responses = entry.responses.len(),
            history_len = self.history.len() + 1,
            "appending history entry"
        );
        self.history.push(entry.clone());
        entry
    }
}

fn validate(prompt: &str, credentials: &Credentials) -> SessionResult<()> {
    if prompt.trim().is_empty() {
        return Err(SessionError::EmptyPrompt);
    }
    if credentials.is_empty() {
        return Err(SessionError::NoCredentials);
    }
    Ok(())
}
