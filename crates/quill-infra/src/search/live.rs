//! Debounced, last-query-wins search session.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use quill_core::domain::Post;
use quill_core::ports::PostRepository;

/// Quiet period before a query is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// What a search box should currently show.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No query: prompt the user to start typing.
    Idle,
    /// A query is waiting for the debounce or for its response.
    Pending { query: String },
    Ready { query: String, results: Vec<Post> },
    Failed { query: String, error: String },
}

/// One search box.
///
/// Every `update` gets a new generation number. A response is published only
/// if its generation is still the newest when it arrives, so a slow answer to
/// an old query can never replace the answer to a newer one. Dropping the
/// session cancels any pending timer or in-flight request.
pub struct LiveSearch {
    repo: Arc<dyn PostRepository>,
    delay: Duration,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<SearchState>>,
    debouncer: super::Debouncer,
}

impl LiveSearch {
    pub fn new(repo: Arc<dyn PostRepository>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            repo,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
            debouncer: super::Debouncer::new(),
        }
    }

    /// Watch the published state.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// The query text changed.
    pub fn update(&mut self, query: impl Into<String>) {
        let query = query.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.is_empty() {
            self.debouncer.cancel();
            self.state.send_replace(SearchState::Idle);
            return;
        }

        self.state.send_replace(SearchState::Pending {
            query: query.clone(),
        });

        let repo = self.repo.clone();
        let latest = self.generation.clone();
        let state = self.state.clone();

        self.debouncer.arm(self.delay, async move {
            tracing::debug!(query = %query, generation, "Issuing search");
            let next = match repo.search_posts(&query).await {
                Ok(results) => SearchState::Ready { query, results },
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "Search failed");
                    SearchState::Failed {
                        query,
                        error: e.to_string(),
                    }
                }
            };

            state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != generation {
                    tracing::debug!(generation, "Discarding superseded search result");
                    return false;
                }
                *current = next;
                true
            });
        });
    }

    /// Stop any pending or in-flight search without changing the state.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}
