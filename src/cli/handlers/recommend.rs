//! Recommend handler: history file in, recommendations out.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{output_json, print_note, print_table, OutputMode};
use crate::init::AppContext;
use crate::models::HistoryEntry;

pub async fn handle_recommend(
    ctx: &AppContext,
    history_path: &Path,
    max: Option<usize>,
    mode: OutputMode,
) -> Result<()> {
    let contents = std::fs::read_to_string(history_path)
        .with_context(|| format!("cannot read history file {}", history_path.display()))?;
    let history: Vec<HistoryEntry> = serde_json::from_str(&contents)
        .with_context(|| format!("cannot parse history file {}", history_path.display()))?;

    let max_results = max.unwrap_or(ctx.config.recommend.max_results);
    let recommendations = ctx.recommender.recommend(&history, max_results).await?;

    if mode == OutputMode::Json {
        output_json(&recommendations);
        return Ok(());
    }

    if recommendations.is_empty() {
        print_note("No recommendations. Check that a model endpoint is configured and the history file is not empty.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = recommendations
        .iter()
        .map(|rec| {
            vec![
                rec.title.clone(),
                rec.year.to_string(),
                rec.source_title.clone().unwrap_or_default(),
                rec.rationale.clone(),
            ]
        })
        .collect();
    print_table(vec!["Title", "Year", "Because of", "Why"], rows);
    Ok(())
}
