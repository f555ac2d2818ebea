use std::io::{self, Write};
use std::time::Duration;

use reddit_feed::{fill_page_quota, ListingClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("=== Reddit Feed Manual Test ===\n");
    println!("Fetches one page of playable items from the live hot listing.\n");

    print!("Enter a subreddit (blank for r/gifs): ");
    io::stdout().flush()?;
    let mut subreddit = String::new();
    io::stdin().read_line(&mut subreddit)?;
    let subreddit = match subreddit.trim() {
        "" => "gifs",
        name => name,
    };

    let client = ListingClient::new("gifstream-manual-test/0.1", Duration::from_secs(30))?;

    println!("\nFilling a page of 10 items from r/{} ...\n", subreddit);
    let outcome = fill_page_quota(&client, subreddit, None, 10, 15).await;

    if let Some(error) = &outcome.error {
        println!("Request failed: {}", error);
    }

    println!(
        "Collected {} playable items across {} raw pages",
        outcome.gifs.len(),
        outcome.pages
    );
    for gif in &outcome.gifs {
        println!("- {} by u/{}", gif.title, gif.author);
        println!("  src: {}", gif.src);
        println!("  thumbnail: {}", gif.thumbnail);
    }

    if let Some(cursor) = &outcome.last_known_gif {
        println!("\nNext page would continue after {}", cursor);
    } else {
        println!("\nNo further pages are known");
    }

    Ok(())
}
