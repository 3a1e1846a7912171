use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::llm::schema::{FieldDef, FieldKind, SchemaDef};

/// Structured discovery filters extracted from a natural-language query.
///
/// This is the one deliberately OPEN schema: the downstream discovery
/// endpoint only reads known keys, so unexpected fields from the model
/// are dropped silently instead of failing the whole interpretation.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoverParams {
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub min_rating: Option<f64>,
}

/// A concrete title the model suggests for the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTitle {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub rationale: String,
}

/// Full interpretation of a natural-language search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchInterpretation {
    #[serde(default)]
    pub discover_params: DiscoverParams,
    #[serde(default)]
    pub suggested_titles: Vec<SuggestedTitle>,
}

impl SearchInterpretation {
    /// Strict at the top level; only `discover_params` is open.
    pub fn schema() -> SchemaDef {
        SchemaDef::closed(vec![
            FieldDef::required("discover_params", FieldKind::Object(discover_schema())),
            FieldDef::required("suggested_titles", FieldKind::Array(suggested_title_schema())),
        ])
    }
}

fn discover_schema() -> SchemaDef {
    SchemaDef::open(vec![
        FieldDef::optional("genres", FieldKind::StringArray),
        FieldDef::optional("year_from", FieldKind::Integer),
        FieldDef::optional("year_to", FieldKind::Integer),
        FieldDef::optional("original_language", FieldKind::String),
        FieldDef::optional("sort_by", FieldKind::String),
        FieldDef::optional("min_rating", FieldKind::Float),
    ])
}

fn suggested_title_schema() -> SchemaDef {
    SchemaDef::closed(vec![
        FieldDef::required("title", FieldKind::String),
        FieldDef::optional("year", FieldKind::Integer),
        FieldDef::required("rationale", FieldKind::String),
    ])
}
