//! Google Books volumes API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{fetch_bytes, BookProvider, BookSummary, SearchError, SearchQuery};

/// Client for `https://www.googleapis.com/books/v1/volumes`
pub struct GoogleBooks {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
    title: Option<String>,
    authors: Vec<String>,
    description: Option<String>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
    info_link: Option<String>,
    preview_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl From<VolumeInfo> for BookSummary {
    fn from(info: VolumeInfo) -> Self {
        let cover_url = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail));

        BookSummary {
            title: info.title.unwrap_or_else(|| "Untitled".to_string()),
            authors: info.authors,
            cover_url,
            description: info.description,
            published: info.published_date,
            link: info.info_link.or(info.preview_link),
        }
    }
}

impl GoogleBooks {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn url(&self, query: &SearchQuery, limit: usize) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("q", &query.google_terms())
            .append_pair("maxResults", &limit.to_string());
        Ok(url)
    }

    fn decode(body: &[u8], limit: usize) -> Result<Vec<BookSummary>, SearchError> {
        let response: VolumesResponse = serde_json::from_slice(body)?;
        Ok(response
            .items
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(|volume| volume.volume_info.into())
            .collect())
    }
}

#[async_trait]
impl BookProvider for GoogleBooks {
    async fn search(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<BookSummary>, SearchError> {
        let url = self.url(query, limit)?;
        let body = fetch_bytes(&self.client, url).await?;
        Self::decode(&body, limit)
    }

    fn name(&self) -> &'static str {
        "Google Books"
    }
}
