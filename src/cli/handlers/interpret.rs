//! Interpret handler: natural-language query to structured filters.

use anyhow::Result;

use crate::cli::output::{output_json, print_note, print_table, OutputMode};
use crate::init::AppContext;

pub async fn handle_interpret(
    ctx: &AppContext,
    query: &str,
    context: Option<&str>,
    mode: OutputMode,
) -> Result<()> {
    // ValidationExhausted intentionally propagates here: this is the
    // interactive path and the user should see the failure.
    let interpretation = ctx.interpreter.interpret(query, context).await?;

    if mode == OutputMode::Json {
        output_json(&interpretation);
        return Ok(());
    }

    println!("Filters:");
    output_json(&interpretation.discover_params);

    if interpretation.suggested_titles.is_empty() {
        print_note("No suggested titles.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = interpretation
        .suggested_titles
        .iter()
        .map(|title| {
            vec![
                title.title.clone(),
                title.year.map(|y| y.to_string()).unwrap_or_default(),
                title.rationale.clone(),
            ]
        })
        .collect();
    print_table(vec!["Title", "Year", "Why"], rows);
    Ok(())
}
