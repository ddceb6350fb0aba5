use std::fmt;

use crate::models::slot::{CredentialKind, ModelSlot};

/// API keys for the primary (Gemini) and secondary (Groq) providers.
/// Blank values are treated as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    primary: Option<String>,
    secondary: Option<String>,
}

impl Credentials {
    pub fn new(primary: Option<String>, secondary: Option<String>) -> Self {
        Self {
            primary: normalize(primary),
            secondary: normalize(secondary),
        }
    }

    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    pub fn for_slot(&self, slot: ModelSlot) -> Option<&str> {
        match slot.credential() {
            CredentialKind::Primary => self.primary(),
            CredentialKind::Secondary => self.secondary(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }

    /// Keys from `overrides` win where present
    pub fn overridden_by(&self, overrides: &Credentials) -> Credentials {
        Credentials {
            primary: overrides.primary.clone().or_else(|| self.primary.clone()),
            secondary: overrides
                .secondary
                .clone()
                .or_else(|| self.secondary.clone()),
        }
    }
}

// Keys never end up in logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("primary", &self.primary.as_ref().map(|_| "<set>"))
            .field("secondary", &self.secondary.as_ref().map(|_| "<set>"))
            .finish()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
