//! History-driven recommendations.
//!
//! This is a batch-facing entry point: it degrades to an empty result
//! instead of aborting when the model never produces valid output.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::history;
use crate::llm::{call_validated, ChatMessage, ModelClient};
use crate::models::{HistoryEntry, RecommendationEnvelope, RecommendationItem};
use crate::MuseError;

pub struct RecommendationService {
    client: Option<Arc<dyn ModelClient>>,
    model: String,
    max_retries: u32,
}

impl RecommendationService {
    /// `client: None` means no model is configured; `recommend` then
    /// always returns an empty list without a network call.
    pub fn new(
        client: Option<Arc<dyn ModelClient>>,
        model: impl Into<String>,
        max_retries: u32,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            max_retries,
        }
    }

    /// Ask the model for up to `max_results` titles not present in
    /// `watched_history`, then drop anything the history already covers.
    ///
    /// Exhausted validation is swallowed with a warning — a scheduled
    /// batch run must keep going. Everything else propagates.
    pub async fn recommend(
        &self,
        watched_history: &[HistoryEntry],
        max_results: usize,
    ) -> Result<Vec<RecommendationItem>, MuseError> {
        let Some(client) = &self.client else {
            debug!("no model client configured, skipping recommendations");
            return Ok(Vec::new());
        };
        if watched_history.is_empty() {
            debug!("empty watch history, nothing to recommend from");
            return Ok(Vec::new());
        }

        let deduped = history::deduplicate(watched_history);
        let watched: HashSet<String> = history::normalized_titles(&deduped);
        let messages = build_messages(&deduped, max_results);

        let envelope: RecommendationEnvelope = match call_validated(
            client.as_ref(),
            &self.model,
            &messages,
            &RecommendationEnvelope::schema(),
            self.max_retries,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(MuseError::ValidationExhausted {
                attempts, reason, ..
            }) => {
                warn!(
                    attempts,
                    %reason,
                    "model never produced a valid recommendation payload, returning none"
                );
                return Ok(Vec::new());
            }
            Err(other) => return Err(other),
        };

        let total = envelope.recommendations.len();
        let fresh: Vec<RecommendationItem> = envelope
            .recommendations
            .into_iter()
            .filter(|item| !history::is_duplicate_of(&item.title, &watched))
            .collect();
        debug!(
            kept = fresh.len(),
            dropped = total - fresh.len(),
            "filtered recommendations against watch history"
        );
        Ok(fresh)
    }
}

fn build_messages(watched: &[HistoryEntry], max_results: usize) -> Vec<ChatMessage> {
    let watched_list = watched
        .iter()
        .filter_map(|entry| {
            entry.display_title().map(|title| match entry.year {
                Some(year) => format!("- {title} ({year})"),
                None => format!("- {title}"),
            })
        })
        .collect::<Vec<_>>()
        .join("\n");

    let system = "You are a film and television recommendation engine. Respond with a single \
JSON object of the form {\"recommendations\": [{\"title\": string, \"year\": integer, \
\"rationale\": string, \"source_title\": string (optional)}]}. No markdown fences, no prose \
outside the JSON object, no extra fields.";

    let user = format!(
        "I have already watched:\n{watched_list}\n\nRecommend up to {max_results} movies or \
shows I have NOT watched yet. Do not repeat anything from the list above, including other \
seasons or editions of the same title. For each recommendation, set source_title to the \
watched title that motivated it when there is one."
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
