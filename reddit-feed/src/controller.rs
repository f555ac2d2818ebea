use gifstream_core::{ErrorExt, FeedConfig, FeedState};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::ListingClient;
use crate::fill::{fill_page_quota, FillOutcome};

#[derive(Debug, Clone)]
enum FeedCommand {
    SubredditChanged(String),
    LoadMore,
}

/// Result of a spawned fill, tagged with the epoch that started it so the
/// worker can discard results that arrive after a subreddit switch.
#[derive(Debug)]
struct FillDone {
    epoch: u64,
    outcome: FillOutcome,
}

/// Handle to the feed worker task.
///
/// The worker is the single owner of the feed state; consumers talk to it
/// through two intake signals (`set_subreddit`, `load_more`) and read back
/// immutable snapshots. Dropping every handle closes the command channel
/// and ends the worker.
#[derive(Debug, Clone)]
pub struct FeedService {
    commands: mpsc::UnboundedSender<FeedCommand>,
    state: watch::Receiver<FeedState>,
}

impl FeedService {
    /// Spawn the worker and immediately start loading the default
    /// subreddit.
    pub fn spawn(client: ListingClient, config: FeedConfig) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(FeedState::default());
        let worker = FeedWorker::new(client, config, command_rx, state_tx);
        tokio::spawn(worker.run());

        Self {
            commands: command_tx,
            state: state_rx,
        }
    }

    /// Ask for a different subreddit. Empty input falls back to the default
    /// feed; rapid changes are debounced and duplicates are ignored.
    pub fn set_subreddit(&self, subreddit: impl Into<String>) {
        if self
            .commands
            .send(FeedCommand::SubredditChanged(subreddit.into()))
            .is_err()
        {
            warn!("Feed worker is gone; dropping subreddit change");
        }
    }

    /// Ask for the next page of the current feed.
    pub fn load_more(&self) {
        if self.commands.send(FeedCommand::LoadMore).is_err() {
            warn!("Feed worker is gone; dropping load-more request");
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.clone()
    }
}

struct FeedWorker {
    client: ListingClient,
    config: FeedConfig,
    commands: mpsc::UnboundedReceiver<FeedCommand>,
    state_tx: watch::Sender<FeedState>,
    results_tx: mpsc::UnboundedSender<FillDone>,
    results_rx: mpsc::UnboundedReceiver<FillDone>,
    state: FeedState,
    subreddit: String,
    epoch: u64,
    fill_in_flight: bool,
    load_more_queued: bool,
    pending_filter: Option<(String, Instant)>,
}

impl FeedWorker {
    fn new(
        client: ListingClient,
        config: FeedConfig,
        commands: mpsc::UnboundedReceiver<FeedCommand>,
        state_tx: watch::Sender<FeedState>,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Self {
            client,
            config,
            commands,
            state_tx,
            results_tx,
            results_rx,
            state: FeedState::default(),
            subreddit: String::new(),
            epoch: 0,
            fill_in_flight: false,
            load_more_queued: false,
            pending_filter: None,
        }
    }

    async fn run(mut self) {
        let initial = self.config.default_subreddit.clone();
        info!("Feed worker started on r/{}", initial);
        self.begin_epoch(initial);

        loop {
            let debounce_deadline = self.pending_filter.as_ref().map(|(_, deadline)| *deadline);

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(FeedCommand::SubredditChanged(raw)) => self.note_filter_change(raw),
                    Some(FeedCommand::LoadMore) => self.handle_load_more(),
                    None => break,
                },
                Some(done) = self.results_rx.recv() => self.merge_fill(done),
                _ = async {
                    match debounce_deadline {
                        Some(deadline) => tokio::time::sleep_until(deadline).await,
                        None => std::future::pending().await,
                    }
                } => self.commit_filter_change(),
            }
        }

        debug!("Feed worker stopped");
    }

    fn note_filter_change(&mut self, raw: String) {
        let subreddit = normalize_subreddit(&raw, &self.config.default_subreddit);
        let deadline = Instant::now() + self.config.debounce;
        debug!("Filter input {:?} normalized to r/{}, debouncing", raw, subreddit);
        // A newer value replaces any pending one; only the latest survives
        // the quiet window.
        self.pending_filter = Some((subreddit, deadline));
    }

    fn commit_filter_change(&mut self) {
        let Some((subreddit, _)) = self.pending_filter.take() else {
            return;
        };
        if subreddit == self.subreddit {
            debug!("Ignoring duplicate filter value r/{}", subreddit);
            return;
        }
        self.begin_epoch(subreddit);
    }

    /// Atomic reset: items, cursor, and error clear together, loading goes
    /// up, and anything still in flight now belongs to a dead epoch.
    fn begin_epoch(&mut self, subreddit: String) {
        self.epoch += 1;
        self.subreddit = subreddit;
        self.fill_in_flight = false;
        self.load_more_queued = false;
        self.state = FeedState {
            gifs: Vec::new(),
            error: None,
            loading: true,
            last_known_gif: None,
        };
        self.publish();
        info!("Switched feed to r/{} (epoch {})", self.subreddit, self.epoch);
        self.spawn_fill(None);
    }

    fn handle_load_more(&mut self) {
        if self.fill_in_flight {
            debug!("Load-more while a fill is in flight, queueing one follow-up");
            self.load_more_queued = true;
            return;
        }
        let after = self.state.last_known_gif.clone();
        self.spawn_fill(after);
    }

    fn spawn_fill(&mut self, after: Option<String>) {
        self.fill_in_flight = true;
        let client = self.client.clone();
        let subreddit = self.subreddit.clone();
        let required = self.config.page_size;
        let max_attempts = self.config.max_fill_attempts;
        let epoch = self.epoch;
        let results = self.results_tx.clone();

        tokio::spawn(async move {
            let outcome =
                fill_page_quota(&client, &subreddit, after, required, max_attempts).await;
            let _ = results.send(FillDone { epoch, outcome });
        });
    }

    fn merge_fill(&mut self, done: FillDone) {
        if done.epoch != self.epoch {
            warn!(
                "Discarding fill result from superseded epoch {} (current {})",
                done.epoch, self.epoch
            );
            return;
        }
        self.fill_in_flight = false;

        let FillOutcome {
            gifs,
            last_known_gif,
            pages,
            error,
        } = done.outcome;
        debug!(
            "Merging {} gifs from {} pages into r/{}",
            gifs.len(),
            pages,
            self.subreddit
        );

        self.state.gifs.extend(gifs);
        if pages > 0 {
            self.state.last_known_gif = last_known_gif;
        }
        if let Some(err) = error {
            err.log_error();
            self.state.error = Some(err.user_friendly_message());
        }
        self.state.loading = false;
        self.publish();

        if self.load_more_queued {
            self.load_more_queued = false;
            self.handle_load_more();
        }
    }

    fn publish(&self) {
        let _ = self.state_tx.send(self.state.clone());
    }
}

fn normalize_subreddit(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
