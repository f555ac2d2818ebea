pub mod api;
pub mod controller;
pub mod fill;
pub mod media;


pub use api::{
    ListingClient, Page, RedditListing, RedditListingChild, RedditListingData, RedditMedia,
    RedditPostData, RedditPreview, RedditVideo,
};
pub use controller::FeedService;
pub use fill::{fill_page_quota, FillOutcome};
pub use media::{best_src_for_post, normalize_thumbnail, posts_to_gifs};
