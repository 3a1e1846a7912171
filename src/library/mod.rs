//! Library-server seam: paged listing and external-id resolution.

pub mod http;

use async_trait::async_trait;

use crate::models::{RawLibraryEntry, Section};
use crate::MuseError;

pub use http::HttpLibraryClient;

/// Paged access to the library server's sections.
#[async_trait]
pub trait LibraryLister: Send + Sync {
    /// List every configured library section.
    ///
    /// A connection failure is an error; a server with no sections is an
    /// empty `Ok`.
    async fn list_sections(&self) -> Result<Vec<Section>, MuseError>;

    /// One page of a section's contents. A page shorter than
    /// `page_size` means the section is exhausted.
    async fn list_items(
        &self,
        section_id: &str,
        offset: usize,
        page_size: usize,
    ) -> Result<Vec<RawLibraryEntry>, MuseError>;
}

/// Lookup of an item's external provider id (e.g. a movie-database id)
/// from its server-internal id.
#[async_trait]
pub trait ProviderIdResolver: Send + Sync {
    /// `Ok(None)` when the server has no provider id for the item.
    async fn resolve(&self, internal_id: &str) -> Result<Option<String>, MuseError>;
}
