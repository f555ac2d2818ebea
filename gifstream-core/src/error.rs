use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Reddit API error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid listing response: {details}")]
    InvalidResponse { details: String },
}

#[derive(Error, Debug, Clone)]
pub enum RedditApiError {
    #[error("Failed to load items for /r/{subreddit}")]
    SubredditNotFound { subreddit: String },

    #[error("{status_text}")]
    RequestFailed { status_code: u16, status_text: String },
}

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
