//! Item sources
//!
//! This module provides a unified trait for fetching gallery items from a
//! remote service. Two wire shapes are supported behind the same interface:
//!
//! - [`picsum::PicsumSource`]: a list endpoint only; single items are found by
//!   fetching a large first page and filtering by id.
//! - [`catalog::CatalogSource`]: a list of entries pointing at per-entry
//!   detail endpoints, plus a direct `/item/{id}` endpoint.
//!
//! Mapping from each wire schema to [`GalleryImage`] is a pure function kept
//! apart from the transport so it can be tested without a network.
//!
//! # Examples
//!
//! ```no_run
//! use libgallery::api::{source_from_config, ItemSource};
//! use libgallery::config::Config;
//!
//! # async fn example() -> libgallery::error::Result<()> {
//! let source = source_from_config(&Config::default_config())?;
//!
//! let page = source.fetch_page(1, 10).await?;
//! if page.is_empty() {
//!     println!("No more items");
//! }
//! # Ok(())
//! # }
//! ```

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::{ApiVariant, Config};
use crate::error::{ApiError, Result};
use crate::types::GalleryImage;

pub mod catalog;
pub mod mock;
pub mod picsum;

/// Source of gallery items
///
/// Sources run on the single-threaded UI runtime, so futures are not `Send`.
#[async_trait(?Send)]
pub trait ItemSource {
    /// Fetch one page of items
    ///
    /// Returns an empty vector once the service has no more items; callers
    /// treat emptiness as the end of pagination.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` on a non-success status or transport failure.
    async fn fetch_page(&self, page: u32, page_size: u32) -> std::result::Result<Vec<GalleryImage>, ApiError>;

    /// Fetch a single item by id
    ///
    /// # Errors
    ///
    /// - `ApiError::NotFound` when no item has this id
    /// - `ApiError::Network` on a non-success status or transport failure
    async fn fetch_by_id(&self, id: &str) -> std::result::Result<GalleryImage, ApiError>;

    /// Short identifier for logs ("picsum", "catalog", "mock")
    fn name(&self) -> &str;

    /// Address of `image` rendered at roughly `width` x `height`
    ///
    /// Sources without sized renditions return the original.
    fn media_url(&self, image: &GalleryImage, _width: u32, _height: u32) -> String {
        image.download_url.clone()
    }
}

/// Build the source selected by `api.variant`
pub fn source_from_config(config: &Config) -> Result<Rc<dyn ItemSource>> {
    let http = HttpClient::new(config.request_timeout()?)?;
    let source: Rc<dyn ItemSource> = match config.api.variant {
        ApiVariant::Picsum => Rc::new(picsum::PicsumSource::new(
            http,
            &config.api.base_url,
            &config.api.media_base_url,
        )),
        ApiVariant::Catalog => Rc::new(catalog::CatalogSource::new(
            http,
            &config.api.base_url,
            &config.api.media_base_url,
        )),
    };
    tracing::info!("Using {} item source at {}", source.name(), config.api.base_url);
    Ok(source)
}

/// Thin JSON-over-HTTP client shared by the remote sources
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> std::result::Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: format!("infinite-gallery/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// GET `url` with query `params` and decode the JSON body
    ///
    /// A 404 maps to `ApiError::NotFound` carrying `not_found_id`; any other
    /// non-success status maps to `ApiError::Network`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        not_found_id: Option<&str>,
    ) -> std::result::Result<T, ApiError> {
        let parsed = if params.is_empty() {
            reqwest::Url::parse(url)
        } else {
            reqwest::Url::parse_with_params(url, params)
        };
        let url = parsed.map_err(|e| ApiError::Network(format!("invalid URL {}: {}", url, e)))?;

        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if let Some(error) = classify_status(status, url.as_str(), not_found_id) {
            tracing::warn!(status, %url, "Request failed");
            return Err(error);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Map an HTTP status to an error, `None` for success
pub fn classify_status(status: u16, url: &str, not_found_id: Option<&str>) -> Option<ApiError> {
    match status {
        200..=299 => None,
        404 => Some(match not_found_id {
            Some(id) => ApiError::NotFound(id.to_string()),
            None => ApiError::from_status(status, url),
        }),
        _ => Some(ApiError::from_status(status, url)),
    }
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
