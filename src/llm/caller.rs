//! Generic "call, validate, retry with a corrective instruction" loop.
//!
//! The loop knows nothing about what a schema means — it only runs the
//! repair-parse-validate pipeline and manages retries. With
//! `max_retries = R` it makes at most `R + 1` model calls, strictly
//! sequentially.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::llm::client::{ChatMessage, ModelClient};
use crate::llm::repair::{repair_title_qualifiers, strip_markdown_fences};
use crate::llm::schema::SchemaDef;
use crate::MuseError;

/// Injected on retry. Must mention "schema" so callers can tell these
/// retries apart from other retry traffic in logs.
const CORRECTIVE_INSTRUCTION: &str = "Your previous response did not conform to the required \
JSON schema. Respond again with a single JSON object that matches the schema exactly. Do not \
include markdown fences, commentary, or any field the schema does not declare.";

/// Call the model until its output parses and validates, or the retry
/// budget is spent.
///
/// Every retry rebuilds the message sequence as the original messages
/// plus exactly one corrective system message at the front — corrective
/// messages never stack across attempts. Transport errors are not
/// retried here; they indicate a broken transport assumption, not model
/// misbehavior, and propagate immediately.
pub async fn call_validated<T: DeserializeOwned>(
    client: &dyn ModelClient,
    model: &str,
    messages: &[ChatMessage],
    schema: &SchemaDef,
    max_retries: u32,
) -> Result<T, MuseError> {
    let mut last_raw = String::new();
    let mut last_reason = String::new();

    for attempt in 0..=max_retries {
        let attempt_messages: Vec<ChatMessage> = if attempt == 0 {
            messages.to_vec()
        } else {
            let mut corrected = Vec::with_capacity(messages.len() + 1);
            corrected.push(ChatMessage::system(CORRECTIVE_INSTRUCTION));
            corrected.extend_from_slice(messages);
            corrected
        };

        let completion = client.complete(model, &attempt_messages).await?;

        let stripped = strip_markdown_fences(&completion.text);
        let repaired = repair_title_qualifiers(&stripped);

        let reason = match serde_json::from_str::<serde_json::Value>(&repaired) {
            Err(parse_err) => format!("invalid JSON: {parse_err}"),
            Ok(value) => match schema.validate(&value) {
                Ok(()) => return Ok(serde_json::from_value(value)?),
                Err(reason) => reason,
            },
        };

        debug!(attempt, %reason, "model output rejected, will retry if budget allows");
        last_raw = completion.text;
        last_reason = reason;
    }

    Err(MuseError::ValidationExhausted {
        attempts: max_retries + 1,
        reason: last_reason,
        raw: last_raw,
    })
}
