use std::time::Duration;

use crate::error::ConfigError;

/// A feed item that resolved to a playable source. Items that cannot be
/// played never become a `Gif`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gif {
    pub name: String,
    pub src: String,
    pub thumbnail: String,
    pub title: String,
    pub author: String,
    pub permalink: String,
    pub comments: u32,
}

/// Snapshot of the running feed. `gifs` only ever grows between filter
/// changes; `last_known_gif` is the continuation cursor for the next page,
/// `None` meaning "start of the feed".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub gifs: Vec<Gif>,
    pub error: Option<String>,
    pub loading: bool,
    pub last_known_gif: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub user_agent: String,
    pub default_subreddit: String,
    /// Playable items requested per fill round-trip.
    pub page_size: u32,
    /// Extra fetches allowed per round-trip when pages come back sparse.
    pub max_fill_attempts: u32,
    /// Quiet window applied to subreddit input before a switch commits.
    pub debounce: Duration,
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            user_agent: "gifstream/0.1 (reddit gif feed)".to_string(),
            default_subreddit: "gifs".to_string(),
            page_size: 20,
            max_fill_attempts: 15,
            debounce: Duration::from_millis(300),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl FeedConfig {
    /// Defaults overridden from the environment where set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(subreddit) = std::env::var("GIFSTREAM_SUBREDDIT") {
            if !subreddit.trim().is_empty() {
                config.default_subreddit = subreddit.trim().to_string();
            }
        }

        if let Ok(raw) = std::env::var("GIFSTREAM_PAGE_SIZE") {
            let page_size: u32 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "GIFSTREAM_PAGE_SIZE".to_string(),
                value: raw.clone(),
            })?;
            if page_size == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "GIFSTREAM_PAGE_SIZE".to_string(),
                    value: raw,
                });
            }
            config.page_size = page_size;
        }

        if let Ok(agent) = std::env::var("GIFSTREAM_USER_AGENT") {
            if !agent.trim().is_empty() {
                config.user_agent = agent;
            }
        }

        Ok(config)
    }
}
