//! Dashboard rendering
//!
//! Stateless: everything here is a function of controller state. Cards are
//! printed in the order they are given.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::controller::Controller;
use crate::core::pagination::PageInfo;
use crate::types::{Thumbnail, Video};

pub const EMPTY_MESSAGE: &str = "No videos found.";

const DESCRIPTION_LIMIT: usize = 160;

/// Prefer the "high" rendition, fall back to "default"
pub fn preferred_thumbnail(video: &Video) -> Option<&Thumbnail> {
    video
        .thumbnails
        .get("high")
        .or_else(|| video.thumbnails.get("default"))
}

/// Parse an API timestamp; naive timestamps are taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Local-time rendering of a timestamp, or the raw text if it won't parse
pub fn format_published(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Decode HTML entities in a string
fn decode_html_entities(s: &str) -> String {
    html_escape::decode_html_entities(s).to_string()
}

fn truncate(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }
    let cut: String = s.chars().take(limit).collect();
    format!("{}…", cut.trim_end())
}

/// One card per video, or the empty-state message
pub fn render_cards(videos: &[Video]) -> String {
    if videos.is_empty() {
        return EMPTY_MESSAGE.yellow().to_string();
    }

    videos
        .iter()
        .enumerate()
        .map(|(i, video)| render_card(i + 1, video))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_card(position: usize, video: &Video) -> String {
    let mut lines = vec![
        format!("{:>2}. {}", position, decode_html_entities(&video.title).bold()),
        format!("    {}", format_published(&video.published_at).dimmed()),
    ];

    let description = decode_html_entities(video.description.trim());
    if !description.is_empty() {
        lines.push(format!("    {}", truncate(&description, DESCRIPTION_LIMIT)));
    }

    if let Some(thumb) = preferred_thumbnail(video) {
        lines.push(format!("    🖼  {}", thumb.url.dimmed()));
    }

    lines.push(format!("    ▶ Watch on YouTube: {}", video.video_url.cyan()));
    lines.join("\n")
}

/// Mode, sort order and match count
pub fn render_header(controller: &Controller) -> String {
    let title = if controller.is_search_mode() {
        format!("Results for \"{}\"", controller.query())
    } else {
        "Latest videos".to_string()
    };

    format!(
        "{} {}",
        title.green().bold(),
        format!("({} total, sorted by {})", controller.total(), controller.sort()).dimmed()
    )
}

/// `[p] Previous  Page X of Y  [n] Next`, with unavailable moves dimmed
pub fn render_pager(info: &PageInfo) -> String {
    let previous = if info.has_previous {
        "[p] Previous".normal()
    } else {
        "[p] Previous".dimmed()
    };
    let next = if info.has_next {
        "[n] Next".normal()
    } else {
        "[n] Next".dimmed()
    };

    format!(
        "{}  {}  {}",
        previous,
        format!("Page {} of {}", info.page, info.page_count).bold(),
        next
    )
}

/// The whole dashboard for the current state
pub fn render_view(controller: &Controller) -> String {
    if controller.is_loading() {
        return "Loading...".dimmed().to_string();
    }

    format!(
        "{}\n\n{}\n\n{}",
        render_header(controller),
        render_cards(controller.videos()),
        render_pager(&controller.page_info())
    )
}

/// Spinner shown while a fetch is outstanding
pub fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
