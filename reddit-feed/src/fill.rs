use gifstream_core::{FeedError, Gif};
use tracing::{debug, warn};

use crate::api::ListingClient;

/// Aggregate of one fill round-trip.
///
/// `gifs` concatenates every round in fetch order; `last_known_gif` is the
/// cursor after the final successful round. `pages` counts successful
/// rounds; zero means nothing was fetched and any previously stored cursor
/// is still the right place to continue from. A failed round lands on the
/// `error` side channel instead of interrupting the item pipeline.
#[derive(Debug)]
pub struct FillOutcome {
    pub gifs: Vec<Gif>,
    pub last_known_gif: Option<String>,
    pub pages: u32,
    pub error: Option<FeedError>,
}

/// Fetch until `required` playable items are collected, the feed runs out,
/// or the attempt budget is spent.
///
/// The share of playable posts per raw page is unknown and can be
/// arbitrarily low, so the first fetch asks for `required` raw posts and
/// each follow-up asks for exactly the remaining shortfall, continuing from
/// the last page's cursor. `max_attempts` bounds the follow-ups; a partial
/// result is an accepted outcome.
pub async fn fill_page_quota(
    client: &ListingClient,
    subreddit: &str,
    after: Option<String>,
    required: u32,
    max_attempts: u32,
) -> FillOutcome {
    let mut outcome = FillOutcome {
        gifs: Vec::new(),
        last_known_gif: None,
        pages: 0,
        error: None,
    };
    let mut cursor = after;
    let mut shortfall = required;
    let mut attempts = 0;

    loop {
        let page = match client
            .fetch_page(subreddit, cursor.as_deref(), shortfall)
            .await
        {
            Ok(page) => page,
            Err(err) => {
                warn!("Fill round for r/{} failed: {}", subreddit, err);
                outcome.error = Some(err);
                break;
            }
        };

        shortfall = page.requested.saturating_sub(page.gifs.len() as u32);
        cursor = page.last_known_gif.clone();
        outcome.last_known_gif = page.last_known_gif;
        outcome.gifs.extend(page.gifs);
        outcome.pages += 1;

        if shortfall == 0 {
            break;
        }
        if cursor.is_none() {
            debug!(
                "Feed for r/{} ran out after {} pages ({} of {} items)",
                subreddit,
                outcome.pages,
                outcome.gifs.len(),
                required
            );
            break;
        }
        if attempts >= max_attempts {
            warn!(
                "Attempt budget spent for r/{}: {} of {} items filled",
                subreddit,
                outcome.gifs.len(),
                required
            );
            break;
        }

        attempts += 1;
        debug!(
            "r/{} short by {} items, refetching (attempt {}/{})",
            subreddit, shortfall, attempts, max_attempts
        );
    }

    outcome
}
