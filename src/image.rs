use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::content::tables::IMAGE_CATEGORIES;

/// Something that can come up with an illustration for a post.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// `None` means "post without a picture", never an error.
    async fn get_random_image(&self) -> Option<Url>;
}

/// Resolves a random category through the image service redirect.
pub struct ImageFetcher {
    http: Client,
    endpoint: String,
}

impl ImageFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    fn category_url(&self, query: &str) -> String {
        format!("{}?{query}", self.endpoint)
    }
}

#[async_trait]
impl ImageSource for ImageFetcher {
    async fn get_random_image(&self) -> Option<Url> {
        let index = rand::thread_rng().gen_range(0..IMAGE_CATEGORIES.len());
        let (category, query) = IMAGE_CATEGORIES[index];

        let res = match self.http.get(self.category_url(query)).send().await {
            Ok(res) => res,
            Err(e) => {
                warn!(category, error = %e, "Image lookup failed");
                return None;
            }
        };

        if res.status() != StatusCode::OK {
            debug!(category, status = %res.status(), "Image service returned no image");
            return None;
        }

        Some(res.url().clone())
    }
}
