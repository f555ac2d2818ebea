use std::time::Duration;

use gifstream_core::{ConfigError, FeedConfig};

#[test]
fn test_defaults() {
    let config = FeedConfig::default();
    assert_eq!(config.default_subreddit, "gifs");
    assert_eq!(config.page_size, 20);
    assert_eq!(config.max_fill_attempts, 15);
    assert_eq!(config.debounce, Duration::from_millis(300));
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert!(config.user_agent.contains("gifstream"));
}

#[test]
fn test_environment_overrides() {
    std::env::set_var("GIFSTREAM_SUBREDDIT", "aww");
    std::env::set_var("GIFSTREAM_PAGE_SIZE", "10");
    std::env::set_var("GIFSTREAM_USER_AGENT", "gifstream-integration/0.1");

    let config = FeedConfig::from_env().expect("overrides should parse");
    assert_eq!(config.default_subreddit, "aww");
    assert_eq!(config.page_size, 10);
    assert_eq!(config.user_agent, "gifstream-integration/0.1");

    std::env::set_var("GIFSTREAM_PAGE_SIZE", "not-a-number");
    let err = FeedConfig::from_env().expect_err("garbage page size must be rejected");
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "GIFSTREAM_PAGE_SIZE"));

    std::env::set_var("GIFSTREAM_PAGE_SIZE", "0");
    let err = FeedConfig::from_env().expect_err("a zero page size must be rejected");
    assert!(matches!(err, ConfigError::InvalidValue { .. }));

    std::env::remove_var("GIFSTREAM_SUBREDDIT");
    std::env::remove_var("GIFSTREAM_PAGE_SIZE");
    std::env::remove_var("GIFSTREAM_USER_AGENT");
}
