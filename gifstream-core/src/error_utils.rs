use crate::error::*;
use tracing::error;

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for FeedError {
    fn log_error(&self) -> &Self {
        error!("FeedError: {}", self);
        if let FeedError::RedditApi(e) = self {
            error!("Reddit API error details: {:?}", e);
        }
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            FeedError::RedditApi(e) => e.user_friendly_message(),
            FeedError::Config(e) => e.to_string(),
            FeedError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            FeedError::InvalidResponse { .. } => {
                "Reddit returned an unreadable listing. Please try again later.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            FeedError::RedditApi(_) => "REDDIT_API".to_string(),
            FeedError::Config(_) => "CONFIG".to_string(),
            FeedError::Network(_) => "NETWORK".to_string(),
            FeedError::InvalidResponse { .. } => "INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for RedditApiError {
    fn log_error(&self) -> &Self {
        error!("RedditApiError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            // Display already carries the consumer-facing wording
            RedditApiError::SubredditNotFound { .. } => self.to_string(),
            RedditApiError::RequestFailed { status_text, .. } => status_text.clone(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            RedditApiError::SubredditNotFound { .. } => "REDDIT_SUBREDDIT_NOT_FOUND".to_string(),
            RedditApiError::RequestFailed { .. } => "REDDIT_REQUEST_FAILED".to_string(),
        }
    }
}
