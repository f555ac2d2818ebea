use gifstream_core::{ConfigError, FeedConfig, FeedError, Gif, RedditApiError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::media::posts_to_gifs;

const REDDIT_API_BASE: &str = "https://www.reddit.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub name: String,
    pub title: String,
    pub author: String,
    pub permalink: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub num_comments: u32,
    #[serde(default)]
    pub media: Option<RedditMedia>,
    #[serde(default)]
    pub secure_media: Option<RedditMedia>,
    #[serde(default)]
    pub preview: Option<RedditPreview>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditMedia {
    #[serde(default)]
    pub reddit_video: Option<RedditVideo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditVideo {
    #[serde(default)]
    pub fallback_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditPreview {
    #[serde(default)]
    pub reddit_video_preview: Option<RedditVideo>,
}

/// One raw listing page mapped to playable items.
///
/// `last_known_gif` is the name of the last RAW post on the page, not the
/// last playable one: the next page must continue from wherever the listing
/// actually stopped. An empty page carries no cursor.
#[derive(Debug, Clone)]
pub struct Page {
    pub gifs: Vec<Gif>,
    pub last_known_gif: Option<String>,
    pub requested: u32,
}

#[derive(Debug, Clone)]
pub struct ListingClient {
    http: Client,
    base_url: Url,
}

impl ListingClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        let base_url = Url::parse(REDDIT_API_BASE).expect("default base URL is valid");

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        Self::new(&config.user_agent, config.request_timeout)
    }

    /// Point the client at a different listing host. Paths keep the
    /// `/r/{subreddit}/hot/.json` layout.
    pub fn with_base_url(mut self, base: &str) -> Result<Self, FeedError> {
        self.base_url = Url::parse(base).map_err(|_| ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: base.to_string(),
        })?;
        Ok(self)
    }

    /// Fetch one bounded page of the hot listing and map it to playable
    /// items, dropping posts with no usable media.
    pub async fn fetch_page(
        &self,
        subreddit: &str,
        after: Option<&str>,
        limit: u32,
    ) -> Result<Page, FeedError> {
        let path = format!("/r/{}/hot/.json", subreddit);
        let mut request_url =
            self.base_url
                .join(&path)
                .map_err(|_| FeedError::InvalidResponse {
                    details: format!("unusable listing path for r/{}", subreddit),
                })?;
        {
            let mut pairs = request_url.query_pairs_mut();
            pairs.append_pair("limit", &limit.to_string());
            if let Some(after) = after {
                pairs.append_pair("after", after);
            }
        }

        debug!("Fetching listing page: {}", request_url);
        let response = self.http.get(request_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Listing request failed with status {} for r/{}",
                status, subreddit
            );
            return Err(error_for_status(status, response.url(), subreddit));
        }

        let listing: RedditListing<RedditPostData> =
            response
                .json()
                .await
                .map_err(|e| FeedError::InvalidResponse {
                    details: format!("failed to decode listing for r/{}: {}", subreddit, e),
                })?;

        let children = listing.data.children;
        let last_known_gif = children.last().map(|child| child.data.name.clone());
        let gifs = posts_to_gifs(&children);
        info!(
            "Fetched {} posts ({} playable) from r/{}",
            children.len(),
            gifs.len(),
            subreddit
        );

        Ok(Page {
            gifs,
            last_known_gif,
            requested: limit,
        })
    }
}

fn error_for_status(status: StatusCode, url: &Url, requested: &str) -> FeedError {
    if status == StatusCode::NOT_FOUND {
        let subreddit =
            subreddit_from_url(url).unwrap_or_else(|| requested.to_string());
        return RedditApiError::SubredditNotFound { subreddit }.into();
    }

    RedditApiError::RequestFailed {
        status_code: status.as_u16(),
        status_text: status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
    .into()
}

/// The subreddit sits in the path segment after the fixed `r` segment.
pub(crate) fn subreddit_from_url(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == "r")?;
    segments.next().map(str::to_string)
}
