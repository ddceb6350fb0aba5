use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Which credential a slot needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Primary,
    Secondary,
}

/// One of the configured model positions
///
/// The derive order is the comparison order: Primary, then SecondaryHigh, then SecondaryFast.
#[derive(
    EnumIter, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelSlot {
    Primary,
    SecondaryHigh,
    SecondaryFast,
}

impl ModelSlot {
    pub fn label(&self) -> &'static str {
        match self {
            ModelSlot::Primary => "Gemini 2.0 Flash",
            ModelSlot::SecondaryHigh => "Llama 3.3 70B (Groq)",
            ModelSlot::SecondaryFast => "Llama 3.1 8B Instant (Groq)",
        }
    }

    pub fn credential(&self) -> CredentialKind {
        match self {
            ModelSlot::Primary => CredentialKind::Primary,
            ModelSlot::SecondaryHigh | ModelSlot::SecondaryFast => CredentialKind::Secondary,
        }
    }
}
