//! Concurrent sync of the "already owned" corpus from the library server.
//!
//! Sections are fetched as a bounded fan-out; each task pages through
//! one section into its own buffer, and buffers merge into the per-kind
//! map at a single point after the fan-out completes. A failed section
//! is logged and skipped without disturbing its siblings.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::library::{LibraryLister, ProviderIdResolver};
use crate::models::{LibraryItem, MediaKind, Section};
use crate::MuseError;

const DEFAULT_PAGE_SIZE: usize = 200;
const DEFAULT_MAX_CONCURRENT_SECTIONS: usize = 4;

pub struct LibrarySyncService {
    lister: Arc<dyn LibraryLister>,
    resolver: Arc<dyn ProviderIdResolver>,
    page_size: usize,
    max_concurrent_sections: usize,
}

impl LibrarySyncService {
    pub fn new(lister: Arc<dyn LibraryLister>, resolver: Arc<dyn ProviderIdResolver>) -> Self {
        Self {
            lister,
            resolver,
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrent_sections: DEFAULT_MAX_CONCURRENT_SECTIONS,
        }
    }

    pub fn with_limits(mut self, page_size: usize, max_concurrent_sections: usize) -> Self {
        self.page_size = page_size.max(1);
        self.max_concurrent_sections = max_concurrent_sections.max(1);
        self
    }

    /// Sync every section into a kind-keyed map of items.
    ///
    /// An explicit `sections` list is used as-is; otherwise sections are
    /// discovered from the server first (a failure there propagates —
    /// there is nothing to degrade to). Zero items overall is an empty
    /// map, not an error.
    pub async fn sync_all(
        &self,
        sections: Option<Vec<Section>>,
    ) -> Result<HashMap<MediaKind, Vec<LibraryItem>>, MuseError> {
        let sections = match sections {
            Some(sections) => sections,
            None => self.lister.list_sections().await?,
        };

        let outcomes: Vec<(Section, Result<Vec<LibraryItem>, MuseError>)> =
            stream::iter(sections)
                .map(|section| async move {
                    let items = self.sync_section(&section).await;
                    (section, items)
                })
                .buffer_unordered(self.max_concurrent_sections)
                .collect()
                .await;

        // Single synchronized merge point: no task ever touches the map.
        let mut merged: HashMap<MediaKind, Vec<LibraryItem>> = HashMap::new();
        for (section, outcome) in outcomes {
            match outcome {
                Ok(items) => {
                    debug!(section = %section.id, count = items.len(), "section synced");
                    for item in items {
                        merged.entry(item.kind).or_default().push(item);
                    }
                }
                Err(error) => {
                    warn!(
                        section = %section.id,
                        title = section.title.as_deref().unwrap_or("?"),
                        %error,
                        "library section sync failed, omitting its items"
                    );
                }
            }
        }

        info!(
            movies = merged.get(&MediaKind::Movie).map_or(0, Vec::len),
            shows = merged.get(&MediaKind::Tv).map_or(0, Vec::len),
            "library sync complete"
        );
        Ok(merged)
    }

    /// Page through one section, resolving provider ids item by item.
    /// A failed resolution leaves the id absent; it never fails the
    /// section.
    async fn sync_section(&self, section: &Section) -> Result<Vec<LibraryItem>, MuseError> {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .lister
                .list_items(&section.id, offset, self.page_size)
                .await?;
            let page_len = page.len();

            for entry in page {
                let kind = MediaKind::from_media_type(&entry.media_type);
                let provider_id = match self.resolver.resolve(&entry.internal_id).await {
                    Ok(found) => found,
                    Err(error) => {
                        debug!(item = %entry.internal_id, %error, "provider id lookup failed");
                        None
                    }
                };
                items.push(LibraryItem {
                    title: entry.title,
                    year: entry.year,
                    kind,
                    internal_id: entry.internal_id,
                    provider_id,
                });
            }

            if page_len < self.page_size {
                break;
            }
            offset += page_len;
        }

        Ok(items)
    }
}
