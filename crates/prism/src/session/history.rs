use chrono::{DateTime, Local, Utc};
use std::collections::BTreeMap;

use crate::models::completion::CompletionResult;
use crate::models::slot::ModelSlot;

/// How many entries the history view shows
pub const DISPLAY_LIMIT: usize = 50;

/// One submitted prompt and the responses of every model that was called for it
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub prompt: String,
    pub created: DateTime<Utc>,
    /// Keyed by slot so iteration always follows the slot order, whatever order calls finished in
    pub responses: BTreeMap<ModelSlot, CompletionResult>,
}

impl HistoryEntry {
    pub fn new<S: Into<String>>(prompt: S) -> Self {
        HistoryEntry {
            prompt: prompt.into(),
            created: Utc::now(),
            responses: BTreeMap::new(),
        }
    }

    pub fn with_response(mut self, slot: ModelSlot, result: CompletionResult) -> Self {
        self.responses.insert(slot, result);
        self
    }

    pub fn response(&self, slot: ModelSlot) -> Option<&CompletionResult> {
        self.responses.get(&slot)
    }

    /// When the prompt was submitted, in local time
    pub fn submitted_at(&self) -> String {
        self.created
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Append-only transcript of a session, most recent last
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The `limit` most recent entries, newest first
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        let start = self.entries.len().saturating_sub(limit);
        self.entries[start..].iter().rev()
    }

    /// What the history view shows
    pub fn display(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.recent(DISPLAY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("prompt {}", n))
            .with_response(ModelSlot::Primary, CompletionResult::text(format!("answer {}", n)))
    }

    #[test]
    fn test_display_is_bounded_and_newest_first() {
        let mut history = History::new();
        for n in 0..60 {
            history.push(entry(n));
        }

        let shown: Vec<&str> = history.display().map(|e| e.prompt.as_str()).collect();
        assert_eq!(shown.len(), DISPLAY_LIMIT);
        assert_eq!(shown[0], "prompt 59");
        assert_eq!(shown[DISPLAY_LIMIT - 1], "prompt 10");

        // Older entries stay retrievable
        assert_eq!(history.len(), 60);
        assert_eq!(history.entries()[0].prompt, "prompt 0");
    }

    #[test]
    fn test_recent_with_fewer_entries() {
        let mut history = History::new();
        history.push(entry(1));
        history.push(entry(2));

        let shown: Vec<&str> = history.recent(10).map(|e| e.prompt.as_str()).collect();
        assert_eq!(shown, vec!["prompt 2", "prompt 1"]);
    }

    #[test]
    fn test_submitted_at_uses_creation_time() {
        let mut entry = HistoryEntry::new("hello");
        entry.created = "2025-03-01T12:30:45Z".parse::<DateTime<Utc>>().unwrap();

        let expected = entry
            .created
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(entry.submitted_at(), expected);
        assert!(entry.submitted_at().ends_with(":45"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut history = History::new();
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_responses_follow_slot_order() {
        let entry = HistoryEntry::new("hello")
            .with_response(ModelSlot::SecondaryFast, CompletionResult::text("fast"))
            .with_response(ModelSlot::Primary, CompletionResult::text("primary"))
            .with_response(ModelSlot::SecondaryHigh, CompletionResult::error("boom"));

        let slots: Vec<ModelSlot> = entry.responses.keys().copied().collect();
        assert_eq!(
            slots,
            vec![
                ModelSlot::Primary,
                ModelSlot::SecondaryHigh,
                ModelSlot::SecondaryFast
            ]
        );
        assert_eq!(
            entry.response(ModelSlot::SecondaryHigh),
            Some(&CompletionResult::error("boom"))
        );
    }
}
