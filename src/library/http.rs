//! Plex-style HTTP implementation of the library seam.
//!
//! Sections come from `/library/sections`, pages from
//! `/library/sections/{id}/all` with container-paging parameters, and
//! provider ids from the per-item metadata endpoint's Guid list.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::library::{LibraryLister, ProviderIdResolver};
use crate::models::{RawLibraryEntry, Section};
use crate::MuseError;

/// Provider-id URI scheme we extract from the Guid list.
const PROVIDER_SCHEME: &str = "tmdb://";

pub struct HttpLibraryClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpLibraryClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MuseError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MuseError> {
        let response = self
            .http
            .get(self.url(path))
            .header("Accept", "application/json")
            .header("X-Plex-Token", &self.token)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[derive(Deserialize)]
struct SectionsResponse {
    #[serde(rename = "MediaContainer")]
    container: SectionsContainer,
}

#[derive(Deserialize)]
struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    directories: Vec<Directory>,
}

#[derive(Deserialize)]
struct Directory {
    key: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct ItemsResponse {
    #[serde(rename = "MediaContainer")]
    container: ItemsContainer,
}

#[derive(Deserialize)]
struct ItemsContainer {
    #[serde(rename = "Metadata", default)]
    metadata: Vec<Metadata>,
}

#[derive(Deserialize)]
struct Metadata {
    #[serde(rename = "ratingKey")]
    rating_key: String,
    title: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(rename = "type")]
    media_type: String,
    #[serde(rename = "Guid", default)]
    guids: Vec<GuidRef>,
}

#[derive(Deserialize)]
struct GuidRef {
    id: String,
}

#[async_trait]
impl LibraryLister for HttpLibraryClient {
    async fn list_sections(&self) -> Result<Vec<Section>, MuseError> {
        let response: SectionsResponse = self.get_json("/library/sections", &[]).await?;
        Ok(response
            .container
            .directories
            .into_iter()
            .map(|dir| Section::new(dir.key, dir.title))
            .collect())
    }

    async fn list_items(
        &self,
        section_id: &str,
        offset: usize,
        page_size: usize,
    ) -> Result<Vec<RawLibraryEntry>, MuseError> {
        let path = format!("/library/sections/{section_id}/all");
        let query = [
            ("X-Plex-Container-Start", offset.to_string()),
            ("X-Plex-Container-Size", page_size.to_string()),
        ];
        let response: ItemsResponse = self.get_json(&path, &query).await?;
        Ok(response
            .container
            .metadata
            .into_iter()
            .map(|item| RawLibraryEntry {
                internal_id: item.rating_key,
                title: item.title,
                year: item.year,
                media_type: item.media_type,
            })
            .collect())
    }
}

#[async_trait]
impl ProviderIdResolver for HttpLibraryClient {
    async fn resolve(&self, internal_id: &str) -> Result<Option<String>, MuseError> {
        let path = format!("/library/metadata/{internal_id}");
        let response: ItemsResponse = self.get_json(&path, &[]).await?;
        let provider_id = response
            .container
            .metadata
            .into_iter()
            .next()
            .and_then(|item| {
                item.guids
                    .into_iter()
                    .find_map(|guid| guid.id.strip_prefix(PROVIDER_SCHEME).map(str::to_string))
            });
        Ok(provider_id)
    }
}
