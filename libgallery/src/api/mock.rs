//! Scripted item source for testing
//!
//! Pages and single items are served from in-memory tables; failures and
//! latency can be injected per page or per id. Call counters let tests verify
//! pagination and reconciliation without network access.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use super::ItemSource;
use crate::error::ApiError;
use crate::types::GalleryImage;

#[derive(Default)]
pub struct MockSource {
    pages: HashMap<u32, Vec<GalleryImage>>,
    items: HashMap<String, GalleryImage>,
    failing_pages: HashSet<u32>,
    failing_ids: HashSet<String>,
    delay: Duration,

    page_calls: Cell<usize>,
    id_calls: Cell<usize>,
    requested_pages: RefCell<Vec<u32>>,
    requested_ids: RefCell<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source whose pages are `pages[0]` for page 1, `pages[1]` for page 2, ...
    ///
    /// Every paged item is also reachable through `fetch_by_id`.
    pub fn with_pages(pages: Vec<Vec<GalleryImage>>) -> Self {
        let mut source = Self::new();
        for (index, page) in pages.into_iter().enumerate() {
            source = source.page(index as u32 + 1, page);
        }
        source
    }

    pub fn page(mut self, number: u32, images: Vec<GalleryImage>) -> Self {
        for image in &images {
            self.items.insert(image.id.clone(), image.clone());
        }
        self.pages.insert(number, images);
        self
    }

    /// Item reachable only by id, not through any page
    pub fn item(mut self, image: GalleryImage) -> Self {
        self.items.insert(image.id.clone(), image);
        self
    }

    pub fn fail_page(mut self, number: u32) -> Self {
        self.failing_pages.insert(number);
        self
    }

    pub fn fail_id(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    /// Simulated latency before every response
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.get()
    }

    pub fn id_calls(&self) -> usize {
        self.id_calls.get()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested_pages.borrow().clone()
    }

    pub fn requested_ids(&self) -> Vec<String> {
        self.requested_ids.borrow().clone()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait(?Send)]
impl ItemSource for MockSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<GalleryImage>, ApiError> {
        self.page_calls.set(self.page_calls.get() + 1);
        self.requested_pages.borrow_mut().push(page);
        self.simulate_latency().await;

        if self.failing_pages.contains(&page) {
            return Err(ApiError::Network(format!("mock failure on page {}", page)));
        }

        Ok(self
            .pages
            .get(&page)
            .map(|images| images.iter().take(page_size as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<GalleryImage, ApiError> {
        self.id_calls.set(self.id_calls.get() + 1);
        self.requested_ids.borrow_mut().push(id.to_string());
        self.simulate_latency().await;

        if self.failing_ids.contains(id) {
            return Err(ApiError::Network(format!("mock failure on item {}", id)));
        }

        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Test fixture image with predictable fields
pub fn sample_image(id: &str) -> GalleryImage {
    GalleryImage {
        id: id.to_string(),
        author: format!("Author {}", id),
        width: 300,
        height: 200,
        url: format!("https://unsplash.com/photos/{}", id),
        download_url: format!("https://picsum.photos/id/{}/300/200", id),
        is_favorite: false,
        tags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_scripted_pages() {
        let source = MockSource::with_pages(vec![vec![sample_image("1"), sample_image("2")]]);

        assert_eq!(source.fetch_page(1, 10).await.unwrap().len(), 2);
        assert!(source.fetch_page(2, 10).await.unwrap().is_empty());
        assert_eq!(source.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_page_size_truncates() {
        let source = MockSource::with_pages(vec![vec![sample_image("1"), sample_image("2")]]);
        assert_eq!(source.fetch_page(1, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let source = MockSource::new()
            .item(sample_image("7"))
            .fail_page(1)
            .fail_id("8");

        assert!(matches!(source.fetch_page(1, 10).await, Err(ApiError::Network(_))));
        assert!(matches!(source.fetch_by_id("8").await, Err(ApiError::Network(_))));
        assert_eq!(source.fetch_by_id("7").await.unwrap().id, "7");
        assert_eq!(
            source.fetch_by_id("9").await,
            Err(ApiError::NotFound("9".to_string()))
        );
        assert_eq!(source.id_calls(), 3);
    }
}
