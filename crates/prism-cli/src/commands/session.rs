use anyhow::Result;
use prism::client::CompletionClient;
use prism::providers::base::Provider;
use prism::providers::factory::get_provider;
use prism::session::orchestrator::Session as Playground;

use crate::config::{load_config, Overrides};
use crate::prompt::cliclack::{CliclackNotifier, CliclackPrompt};
use crate::session::Session;

pub type BoxedProvider = Box<dyn Provider + Send + Sync>;

/// Load configuration and wire the playground to the HTTP providers
pub fn build_playground(overrides: &Overrides) -> Result<Playground<BoxedProvider>> {
    let config = load_config(overrides)?;
    tracing::debug!(
        credentials = ?config.credentials,
        models = ?config.models,
        "loaded configuration"
    );

    let provider = get_provider(config.hosts.clone())?;
    let client = CompletionClient::new(provider).with_notifier(CliclackNotifier);
    Ok(Playground::new(client, config))
}

pub fn execute(overrides: &Overrides) -> Result<()> {
    let playground = build_playground(overrides)?;
    let mut session = Session::new(playground, Box::new(CliclackPrompt::new()));
    session.start()
}
