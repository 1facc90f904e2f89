//! Type definitions for video-dash
//!
//! Source of truth for all data structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DashError;

// ============================================
// Video Types
// ============================================

/// A thumbnail rendition of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A video record as served by the catalog API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub youtube_video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO timestamp, kept verbatim
    pub published_at: String,
    /// Keyed by resolution name: "default", "medium", "high", ...
    #[serde(default)]
    pub thumbnails: BTreeMap<String, Thumbnail>,
    pub video_url: String,
    pub created_at: String,
}

// ============================================
// API Response Types
// ============================================

/// Response of `GET /videos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub videos: Vec<Video>,
}

/// Response of `GET /search`
///
/// The endpoint does not echo page or page_size back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub total: u64,
    pub videos: Vec<Video>,
}

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

/// The part of either response the controller cares about
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    pub total: u64,
    pub videos: Vec<Video>,
}

impl From<PaginatedResult> for Listing {
    fn from(result: PaginatedResult) -> Self {
        Self {
            total: result.total,
            videos: result.videos,
        }
    }
}

impl From<SearchResult> for Listing {
    fn from(result: SearchResult) -> Self {
        Self {
            total: result.total,
            videos: result.videos,
        }
    }
}

// ============================================
// Sorting
// ============================================

/// Client-side ordering of the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Server order (newest first)
    #[default]
    Date,
    Title,
}

impl SortMode {
    pub fn toggled(self) -> Self {
        match self {
            SortMode::Date => SortMode::Title,
            SortMode::Title => SortMode::Date,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Date => write!(f, "date"),
            SortMode::Title => write!(f, "title"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortMode::Date),
            "title" => Ok(SortMode::Title),
            other => Err(format!("unknown sort mode '{}' (expected date or title)", other)),
        }
    }
}

// ============================================
// Fetch Types
// ============================================

/// Which endpoint a fetch goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    List { page: u32, page_size: u32 },
    Search { query: String, page: u32, page_size: u32 },
}

/// A fetch the controller wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Monotonic request sequence number
    pub seq: u64,
    pub kind: FetchKind,
}

/// The completed fetch, reported back to the controller
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<Listing, DashError>,
}

// ============================================
// Config Types
// ============================================

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API base URL (default: "http://localhost:8000")
    pub api_base: String,
    /// Per-request timeout; none means wait forever
    pub request_timeout_secs: Option<u64>,
    /// tracing filter directive (default: "warn")
    pub log_level: String,
    /// Editor command (default: "nvim")
    pub editor: String,
}

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            request_timeout_secs: None,
            log_level: "warn".into(),
            editor: "nvim".into(),
        }
    }
}
