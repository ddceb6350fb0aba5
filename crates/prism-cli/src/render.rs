use prism::config::ModelSet;
use prism::session::history::{History, HistoryEntry};

/// Markdown for the responses of one entry, one section per model in slot order
pub fn responses_markdown(entry: &HistoryEntry, models: &ModelSet) -> String {
    entry
        .responses
        .iter()
        .map(|(slot, result)| {
            format!(
                "### {} · `{}`\n\n{}\n",
                slot.label(),
                models.model(*slot),
                result
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown for a whole entry, prompt and submission time first
pub fn entry_markdown(entry: &HistoryEntry, models: &ModelSet) -> String {
    format!(
        "**Prompt:** {}\n_{}_\n\n{}",
        entry.prompt,
        entry.submitted_at(),
        responses_markdown(entry, models)
    )
}

/// Markdown for the history view, or None when there is nothing to show
pub fn history_markdown(history: &History, models: &ModelSet) -> Option<String> {
    if history.is_empty() {
        return None;
    }
    let sections: Vec<String> = history
        .display()
        .map(|entry| entry_markdown(entry, models))
        .collect();
    Some(sections.join("\n---\n\n"))
}
