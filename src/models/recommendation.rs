use serde::{Deserialize, Serialize};

use crate::llm::schema::{FieldDef, FieldKind, SchemaDef};

/// A single validated model recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub title: String,
    pub year: i32,
    /// Why the model picked this title.
    pub rationale: String,
    /// The watched title that prompted this recommendation, when the
    /// model names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
}

/// The only accepted top-level shape for recommendation output.
///
/// Structured-output APIs require a JSON object at the root, so a bare
/// array is never valid even though it would carry the same data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationEnvelope {
    pub recommendations: Vec<RecommendationItem>,
}

impl RecommendationEnvelope {
    /// Closed schema: unknown keys at any level are rejected.
    pub fn schema() -> SchemaDef {
        SchemaDef::closed(vec![FieldDef::required(
            "recommendations",
            FieldKind::Array(item_schema()),
        )])
    }
}

fn item_schema() -> SchemaDef {
    SchemaDef::closed(vec![
        FieldDef::required("title", FieldKind::String),
        FieldDef::required("year", FieldKind::Integer),
        FieldDef::required("rationale", FieldKind::String),
        FieldDef::optional("source_title", FieldKind::String),
    ])
}
