//! Shared initialization: build services from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::AppConfig;
use crate::library::{HttpLibraryClient, LibraryLister, ProviderIdResolver};
use crate::llm::{HttpModelClient, ModelClient};
use crate::services::{LibrarySyncService, QueryInterpreterService, RecommendationService};
use crate::MuseError;

/// Application context holding the wired-up services.
pub struct AppContext {
    pub config: AppConfig,
    pub recommender: RecommendationService,
    pub interpreter: QueryInterpreterService,
    /// Absent when no library server is configured.
    pub sync: Option<LibrarySyncService>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self, MuseError> {
        let model_client: Option<Arc<dyn ModelClient>> = match &config.model.endpoint {
            Some(endpoint) => {
                info!(endpoint = %endpoint, model = %config.model.name, "model endpoint configured");
                Some(Arc::new(HttpModelClient::new(
                    endpoint.clone(),
                    config.model.api_key.clone(),
                    Duration::from_secs(config.model.timeout_secs),
                )?))
            }
            None => {
                info!("no model endpoint configured; recommend/interpret will return empty results");
                None
            }
        };

        let sync = match (&config.library.url, &config.library.token) {
            (Some(url), Some(token)) => {
                let client = Arc::new(HttpLibraryClient::new(
                    url.clone(),
                    token.clone(),
                    Duration::from_secs(config.library.timeout_secs),
                )?);
                let lister: Arc<dyn LibraryLister> = client.clone();
                let resolver: Arc<dyn ProviderIdResolver> = client;
                Some(
                    LibrarySyncService::new(lister, resolver)
                        .with_limits(config.sync.page_size, config.sync.max_concurrent_sections),
                )
            }
            _ => None,
        };

        let recommender = RecommendationService::new(
            model_client.clone(),
            config.model.name.clone(),
            config.recommend.max_retries,
        );
        let interpreter = QueryInterpreterService::new(
            model_client,
            config.model.name.clone(),
            config.recommend.max_retries,
        );

        Ok(Self {
            config,
            recommender,
            interpreter,
            sync,
        })
    }
}
