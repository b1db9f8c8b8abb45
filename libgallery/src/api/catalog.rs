//! Item-endpoint service (PokeAPI-like shape)
//!
//! The list endpoint returns named entries that point at per-entry detail
//! endpoints. A page is assembled by fetching every entry's detail
//! concurrently; single items come from `GET {base}/item/{id}`.

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::{join_url, HttpClient, ItemSource};
use crate::error::ApiError;
use crate::types::GalleryImage;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogList {
    #[serde(default)]
    pub results: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

/// Detail record; ids arrive either as numbers or as strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: RawId,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Map a detail record to the internal shape
///
/// `width`/`height` carry the record's weight and height; the detail URL is
/// the service's own item endpoint and the media URL falls back to
/// `{media_base}/{id}.png` when the record has no sprite.
pub fn map_catalog_record(record: CatalogRecord, base_url: &str, media_base_url: &str) -> GalleryImage {
    let id = record.id.to_string();
    let download_url = record
        .sprites
        .front_default
        .filter(|sprite| !sprite.is_empty())
        .unwrap_or_else(|| join_url(media_base_url, &format!("{}.png", id)));

    GalleryImage {
        url: join_url(base_url, &format!("item/{}", id)),
        author: capitalize_first(&record.name),
        width: record.weight,
        height: record.height,
        download_url,
        is_favorite: false,
        tags: Vec::new(),
        id,
    }
}

pub struct CatalogSource {
    http: HttpClient,
    base_url: String,
    media_base_url: String,
}

impl CatalogSource {
    pub fn new(http: HttpClient, base_url: &str, media_base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            media_base_url: media_base_url.to_string(),
        }
    }

    fn map(&self, record: CatalogRecord) -> GalleryImage {
        map_catalog_record(record, &self.base_url, &self.media_base_url)
    }
}

#[async_trait(?Send)]
impl ItemSource for CatalogSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<GalleryImage>, ApiError> {
        let list: CatalogList = self
            .http
            .get_json(
                &join_url(&self.base_url, "list"),
                &[("page", page.to_string()), ("limit", page_size.to_string())],
                None,
            )
            .await?;

        let details = list
            .results
            .iter()
            .map(|entry| self.http.get_json::<CatalogRecord>(&entry.url, &[], Some(&entry.name)));

        // One failed detail fails the page, matching a single list request.
        let records = join_all(details)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(page, count = records.len(), "Fetched catalog page");
        Ok(records.into_iter().map(|record| self.map(record)).collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<GalleryImage, ApiError> {
        let record: CatalogRecord = self
            .http
            .get_json(&join_url(&self.base_url, &format!("item/{}", id)), &[], Some(id))
            .await?;
        Ok(self.map(record))
    }

    fn name(&self) -> &str {
        "catalog"
    }
}
