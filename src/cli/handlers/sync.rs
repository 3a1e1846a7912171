//! Sync handler: pull the owned corpus from the library server.

use anyhow::{bail, Result};

use crate::cli::output::{output_json, print_note, print_table, OutputMode};
use crate::init::AppContext;
use crate::models::{MediaKind, Section};

pub async fn handle_sync(ctx: &AppContext, sections: &[String], mode: OutputMode) -> Result<()> {
    let Some(sync) = &ctx.sync else {
        bail!("no library server configured; set [library] url and token in the config file");
    };

    let explicit = (!sections.is_empty()).then(|| {
        sections
            .iter()
            .map(|id| Section::new(id.clone(), None))
            .collect::<Vec<_>>()
    });

    let synced = sync.sync_all(explicit).await?;

    if mode == OutputMode::Json {
        output_json(&synced);
        return Ok(());
    }

    if synced.is_empty() {
        print_note("No items synced.");
        return Ok(());
    }

    for (kind, items) in &synced {
        let label = match kind {
            MediaKind::Movie => "Movies",
            MediaKind::Tv => "TV Shows",
        };
        println!("\n{} ({} items)", label, items.len());
        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|item| {
                vec![
                    item.title.clone(),
                    item.year.map(|y| y.to_string()).unwrap_or_default(),
                    item.provider_id.clone().unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        print_table(vec!["Title", "Year", "Provider id"], rows);
    }
    Ok(())
}
