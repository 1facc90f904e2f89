//! View-state controller
//!
//! Owns the dashboard state and decides which single fetch to issue whenever
//! the page, the committed query or the sort mode changes. It never performs
//! I/O itself: it hands out [`FetchRequest`]s and takes back [`FetchOutcome`]s.
//!
//! Every request carries a sequence number. Only the outcome of the most
//! recently issued request is applied, so a slow earlier response can never
//! overwrite a faster later one.

use tracing::{debug, warn};

use crate::core::pagination::PageInfo;
use crate::core::sort::apply_sort;
use crate::types::{FetchKind, FetchOutcome, FetchRequest, SortMode, Video};

/// Items requested per page
pub const PAGE_SIZE: u32 = 12;

/// User intents the controller understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the uncommitted search text
    Input(String),
    /// Commit the search text and go back to page 1
    Submit,
    Next,
    Previous,
    SetSort(SortMode),
    ToggleSort,
    /// Re-issue the current fetch
    Refresh,
    Quit,
}

/// What the caller has to do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Fetch(FetchRequest),
    Idle,
    Exit,
}

#[derive(Debug, Clone)]
pub struct Controller {
    page: u32,
    query: String,
    input: String,
    sort: SortMode,
    loading: bool,
    videos: Vec<Video>,
    total: u64,
    last_seq: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// Page 1, list mode, date order
    pub fn new() -> Self {
        Self::with_query("")
    }

    /// Start in search mode as if `query` had been submitted
    pub fn with_query(query: &str) -> Self {
        let query = query.trim().to_string();
        Self {
            page: 1,
            input: query.clone(),
            query,
            sort: SortMode::default(),
            loading: false,
            videos: Vec::new(),
            total: 0,
            last_seq: 0,
        }
    }

    /// Initial mount: counts as a change of page, query and sort.
    pub fn start(&mut self) -> FetchRequest {
        self.trigger()
    }

    pub fn handle(&mut self, command: Command) -> Transition {
        match command {
            Command::Input(text) => {
                self.input = text;
                Transition::Idle
            }
            Command::Submit => {
                let committed = self.input.trim().to_string();
                let changed = self.page != 1 || self.query != committed;
                self.page = 1;
                self.query = committed;
                self.fetch_if(changed)
            }
            Command::Next => {
                let has_next = self.page_info().has_next;
                if has_next {
                    self.page += 1;
                }
                self.fetch_if(has_next)
            }
            Command::Previous => {
                let has_previous = self.page_info().has_previous;
                if has_previous {
                    self.page -= 1;
                }
                self.fetch_if(has_previous)
            }
            Command::SetSort(mode) => {
                let changed = mode != self.sort;
                self.sort = mode;
                self.fetch_if(changed)
            }
            Command::ToggleSort => self.handle(Command::SetSort(self.sort.toggled())),
            Command::Refresh => Transition::Fetch(self.trigger()),
            Command::Quit => Transition::Exit,
        }
    }

    /// Reconcile a finished fetch into state.
    ///
    /// Returns `false` when the outcome was stale and ignored.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.last_seq {
            warn!(seq = outcome.seq, latest = self.last_seq, "discarding stale response");
            return false;
        }

        match outcome.result {
            Ok(listing) => {
                debug!(
                    seq = outcome.seq,
                    total = listing.total,
                    count = listing.videos.len(),
                    "fetch complete"
                );
                self.videos = apply_sort(self.sort, listing.videos);
                self.total = listing.total;
            }
            Err(e) => {
                warn!(seq = outcome.seq, error = %e, "fetch failed");
                self.videos.clear();
                self.total = 0;
            }
        }
        self.loading = false;
        true
    }

    fn fetch_if(&mut self, changed: bool) -> Transition {
        if changed {
            Transition::Fetch(self.trigger())
        } else {
            Transition::Idle
        }
    }

    fn trigger(&mut self) -> FetchRequest {
        self.loading = true;
        self.last_seq += 1;

        let query = self.query.trim();
        let kind = if query.is_empty() {
            FetchKind::List {
                page: self.page,
                page_size: PAGE_SIZE,
            }
        } else {
            FetchKind::Search {
                query: query.to_string(),
                page: self.page,
                page_size: PAGE_SIZE,
            }
        };

        debug!(seq = self.last_seq, ?kind, "issuing fetch");
        FetchRequest {
            seq: self.last_seq,
            kind,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// The committed query; empty in list mode
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_search_mode(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.page, self.total, PAGE_SIZE)
    }
}
