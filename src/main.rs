use anyhow::Context;
use gifstream_core::{FeedConfig, FeedState};
use reddit_feed::{FeedService, ListingClient};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("gifstream=info,reddit_feed=info")
        .init();

    tracing::info!("Starting Gifstream - Reddit gif feed");

    let config = FeedConfig::from_env().context("loading configuration")?;
    let client = ListingClient::from_config(&config).context("building listing client")?;
    let feed = FeedService::spawn(client, config);

    let mut snapshots = feed.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a subreddit name to switch feeds, \":more\" for the next page, \":quit\" to exit.");

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = snapshots.borrow_and_update().clone();
                print_snapshot(&state);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match line.trim() {
                    ":quit" => break,
                    ":more" => feed.load_more(),
                    input => feed.set_subreddit(input),
                }
            }
        }
    }

    Ok(())
}

fn print_snapshot(state: &FeedState) {
    if state.loading {
        println!("Loading ...");
        return;
    }

    if let Some(error) = &state.error {
        println!("! {}", error);
    }

    println!(
        "{} gifs loaded (next page from: {})",
        state.gifs.len(),
        state.last_known_gif.as_deref().unwrap_or("start of feed")
    );
    for gif in state.gifs.iter().rev().take(3) {
        println!(
            "  {} by u/{} ({} comments)\n    {}",
            gif.title, gif.author, gif.comments, gif.src
        );
    }
}
