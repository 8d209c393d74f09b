//! Status suggestions from a text-generation model.
//!
//! DESIGN
//! ======
//! One chat request per click: the slot's recent statuses go into the
//! prompt and the cleaned reply comes back as a single short string. There
//! is no retry. [`SuggestionGate`] refuses a second request for a slot
//! while the first is still outstanding.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::types::{LlmChat, LlmError, Message};
use crate::model::Slot;

pub const FALLBACK_SUGGESTION: &str = "Thinking of something new...";
pub const RECENT_STATUS_LIMIT: usize = 5;

/// Gemini 2.5 spends part of this budget on thinking before it answers.
const SUGGESTION_MAX_TOKENS: u32 = 1024;

const SYSTEM_PROMPT: &str = "You suggest status updates for a two-person status sharing app. \
Reply with the text of one suggestion and nothing else.";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("suggestion unavailable: {0}")]
    Unavailable(#[from] LlmError),
    #[error("suggestions are not configured")]
    NotConfigured,
    #[error("a suggestion for {0} is already in flight")]
    InFlight(Slot),
}

impl ErrorCode for SuggestionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "E_SUGGESTION_UNAVAILABLE",
            Self::NotConfigured => "E_SUGGESTION_NOT_CONFIGURED",
            Self::InFlight(_) => "E_SUGGESTION_IN_FLIGHT",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Unavailable(e) => e.retryable(),
            Self::InFlight(_) => true,
            Self::NotConfigured => false,
        }
    }
}

// =============================================================================
// PROMPT
// =============================================================================

#[must_use]
pub fn build_prompt(recent_texts: &[String]) -> String {
    format!(
        "Based on these recent activities: \"{}\".\n\
         Suggest a short, creative and fun status update, 2-5 words long, without emojis.\n\
         Examples: 'Conquering virtual worlds', 'Brewing the perfect coffee', 'Deep in thought', \
         'Crafting some code', 'Chasing deadlines'.\n\
         Suggest a new activity, not a variation of the last one. Return only the suggestion text.",
        recent_texts.join(", ")
    )
}

/// Trim whitespace and surrounding quote characters.
#[must_use]
pub fn clean_suggestion(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
        .to_string()
}

// =============================================================================
// SUGGEST
// =============================================================================

/// Ask the model for a new status given the most recent ones.
///
/// # Errors
///
/// Returns [`SuggestionError::Unavailable`] wrapping any transport or
/// provider error.
pub async fn suggest(llm: &dyn LlmChat, recent_texts: &[String]) -> Result<String, SuggestionError> {
    let messages = [Message::user(build_prompt(recent_texts))];
    let response = llm
        .chat(SUGGESTION_MAX_TOKENS, SYSTEM_PROMPT, &messages)
        .await
        .inspect_err(|e| warn!(error = %e, "suggestion request failed"))?;

    info!(
        model = %response.model,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        stop_reason = %response.stop_reason,
        "suggestion generated"
    );

    let cleaned = clean_suggestion(&response.text());
    if cleaned.is_empty() {
        return Ok(FALLBACK_SUGGESTION.to_string());
    }
    Ok(cleaned)
}

// =============================================================================
// IN-FLIGHT GATE
// =============================================================================

/// Per-slot in-flight flag for suggestion requests.
#[derive(Clone, Default)]
pub struct SuggestionGate {
    in_flight: Arc<Mutex<HashSet<Slot>>>,
}

/// Held while a suggestion request runs; releases the slot on drop.
pub struct SuggestionPermit {
    in_flight: Arc<Mutex<HashSet<Slot>>>,
    slot: Slot,
}

impl SuggestionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `slot` as in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::InFlight`] if a request for `slot` is
    /// already outstanding.
    pub fn try_acquire(&self, slot: Slot) -> Result<SuggestionPermit, SuggestionError> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(slot) {
            return Err(SuggestionError::InFlight(slot));
        }
        Ok(SuggestionPermit { in_flight: Arc::clone(&self.in_flight), slot })
    }

    #[cfg(test)]
    pub fn is_in_flight(&self, slot: Slot) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&slot)
    }
}

impl Drop for SuggestionPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.slot);
    }
}

#[cfg(test)]
#[path = "suggestion_test.rs"]
mod tests;
