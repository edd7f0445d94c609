//! OpenLibrary search API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{fetch_bytes, BookProvider, BookSummary, SearchError, SearchQuery};

const COVERS_URL: &str = "https://covers.openlibrary.org/b/id";
const SITE_URL: &str = "https://openlibrary.org";

/// Client for `https://openlibrary.org/search.json`
pub struct OpenLibrary {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Option<Vec<Doc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Doc {
    title: Option<String>,
    author_name: Vec<String>,
    cover_i: Option<i64>,
    first_publish_year: Option<i32>,
    first_sentence: Option<FirstSentence>,
    key: Option<String>,
}

/// `first_sentence` shows up both as a plain string and as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FirstSentence {
    One(String),
    Many(Vec<String>),
}

impl FirstSentence {
    fn into_text(self) -> Option<String> {
        match self {
            FirstSentence::One(text) => Some(text),
            FirstSentence::Many(list) => list.into_iter().next(),
        }
    }
}

impl From<Doc> for BookSummary {
    fn from(doc: Doc) -> Self {
        BookSummary {
            title: doc.title.unwrap_or_else(|| "Untitled".to_string()),
            authors: doc.author_name,
            cover_url: doc
                .cover_i
                .filter(|id| *id > 0)
                .map(|id| format!("{COVERS_URL}/{id}-M.jpg")),
            description: doc.first_sentence.and_then(FirstSentence::into_text),
            published: doc.first_publish_year.map(|year| year.to_string()),
            link: doc.key.map(|key| format!("{SITE_URL}{key}")),
        }
    }
}

impl OpenLibrary {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn url(&self, query: &SearchQuery, limit: usize) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.openlibrary_params() {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("limit", &limit.to_string());
        }
        Ok(url)
    }

    fn decode(body: &[u8], limit: usize) -> Result<Vec<BookSummary>, SearchError> {
        let response: SearchResponse = serde_json::from_slice(body)?;
        Ok(response
            .docs
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(BookSummary::from)
            .collect())
    }
}

#[async_trait]
impl BookProvider for OpenLibrary {
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
        "OpenLibrary"
    }
}
