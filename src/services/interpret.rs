//! Natural-language search query interpretation.
//!
//! Interactive entry point: unlike recommendations, a model that never
//! produces valid output is surfaced to the caller as
//! `ValidationExhausted` so the UI can show an error.

use std::sync::Arc;

use tracing::debug;

use crate::llm::{call_validated, ChatMessage, ModelClient};
use crate::models::SearchInterpretation;
use crate::MuseError;

pub struct QueryInterpreterService {
    client: Option<Arc<dyn ModelClient>>,
    model: String,
    max_retries: u32,
}

impl QueryInterpreterService {
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

    /// Turn a free-text query into discovery filters plus suggested
    /// titles. `context` is optional extra hinting (e.g. which library
    /// the user is browsing).
    ///
    /// Returns an empty interpretation (not an error) only when no
    /// model client is configured.
    pub async fn interpret(
        &self,
        query: &str,
        context: Option<&str>,
    ) -> Result<SearchInterpretation, MuseError> {
        let Some(client) = &self.client else {
            debug!("no model client configured, returning empty interpretation");
            return Ok(SearchInterpretation::default());
        };

        let messages = build_messages(query, context);
        call_validated(
            client.as_ref(),
            &self.model,
            &messages,
            &SearchInterpretation::schema(),
            self.max_retries,
        )
        .await
    }
}

fn build_messages(query: &str, context: Option<&str>) -> Vec<ChatMessage> {
    let system = "You translate natural-language media searches into structured filters. \
Respond with a single JSON object: {\"discover_params\": {\"genres\": [string], \
\"year_from\": integer, \"year_to\": integer, \"original_language\": string, \
\"sort_by\": string, \"min_rating\": number}, \"suggested_titles\": [{\"title\": string, \
\"year\": integer (optional), \"rationale\": string}]}. Omit discover_params keys you cannot \
infer. No markdown fences, no prose outside the JSON object.";

    let user = match context {
        Some(context) => format!("Query: {query}\nContext: {context}"),
        None => format!("Query: {query}"),
    };

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
