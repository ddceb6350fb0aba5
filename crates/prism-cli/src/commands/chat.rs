use anyhow::Result;
use cliclack::spinner;

use super::session::build_playground;
use crate::config::Overrides;
use crate::render::responses_markdown;

/// Which orchestrator action a one-shot command runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Single,
    All,
}

/// Send one prompt, print the responses as markdown on stdout and exit
pub fn execute(prompt: &str, target: Target, overrides: &Overrides) -> Result<()> {
    let mut playground = build_playground(overrides)?;
    let credentials = playground.credentials().clone();

    let spin = spinner();
    spin.start("awaiting replies");
    let result = match target {
        Target::Single => playground.send_chat(prompt, &credentials),
        Target::All => playground.compare_all(prompt, &credentials),
    };
    spin.stop("");

    let entry = result?;
    println!("{}", responses_markdown(&entry, &playground.config().models));
    Ok(())
}
