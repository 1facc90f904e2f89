//! In-memory [`VideoApi`] used by controller and session tests

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::core::api::VideoApi;
use crate::error::{DashError, Result};
use crate::types::{FetchKind, PaginatedResult, SearchResult, Thumbnail, Video};

/// Build a minimal video with the given id and title
pub fn video(id: i64, title: &str) -> Video {
    let mut thumbnails = BTreeMap::new();
    thumbnails.insert(
        "default".to_string(),
        Thumbnail {
            url: format!("https://i.ytimg.com/vi/v{}/default.jpg", id),
            width: 120,
            height: 90,
        },
    );

    Video {
        id,
        youtube_video_id: format!("v{}", id),
        title: title.to_string(),
        description: String::new(),
        published_at: "2024-05-01T08:30:00+00:00".to_string(),
        thumbnails,
        video_url: format!("https://www.youtube.com/watch?v=v{}", id),
        created_at: "2024-05-01T08:31:00".to_string(),
    }
}

/// Records every call and serves `page_size` videos per page out of `total`
pub struct FakeApi {
    pub total: u64,
    pub calls: Mutex<Vec<FetchKind>>,
    pub failing: AtomicBool,
    /// Per-page artificial latency
    pub delays: HashMap<u32, Duration>,
}

impl FakeApi {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            calls: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            delays: HashMap::new(),
        }
    }

    pub fn with_delay(mut self, page: u32, delay: Duration) -> Self {
        self.delays.insert(page, delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<FetchKind> {
        self.calls.lock().unwrap().clone()
    }

    /// Titles run backwards so a title sort visibly reorders a page
    fn page_of(&self, page: u32, page_size: u32) -> Vec<Video> {
        let start = u64::from(page - 1) * u64::from(page_size);
        let end = (start + u64::from(page_size)).min(self.total);
        (start..end)
            .map(|i| video(i as i64 + 1, &format!("title {:03}", 999 - i)))
            .collect()
    }

    async fn respond(&self, kind: FetchKind, page: u32) -> Result<()> {
        self.calls.lock().unwrap().push(kind);
        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DashError::Transport {
                status: 500,
                url: "fake".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VideoApi for FakeApi {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PaginatedResult> {
        self.respond(FetchKind::List { page, page_size }, page).await?;
        Ok(PaginatedResult {
            total: self.total,
            page,
            page_size,
            videos: self.page_of(page, page_size),
        })
    }

    async fn fetch_search(&self, query: &str, page: u32, page_size: u32) -> Result<SearchResult> {
        let kind = FetchKind::Search {
            query: query.to_string(),
            page,
            page_size,
        };
        self.respond(kind, page).await?;
        Ok(SearchResult {
            total: self.total,
            videos: self.page_of(page, page_size),
        })
    }
}
