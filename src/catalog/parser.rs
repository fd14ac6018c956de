//! Extraction of search pages and detail responses

use crate::error::CatalogError;
use crate::types::{SearchResult, TrackDetail, TrackId, TrackSummary};
use regex::Regex;
use scraper::{Html, Selector};

/// Title used when the provider returns a detail record without one
pub const UNKNOWN_TITLE: &str = "Unknown Track";

/// Compiled selectors and patterns for the provider's search page
pub(crate) struct SearchPageParser {
    rows: Selector,
    row_link: Selector,
    page_buttons: Selector,
    page_data: Selector,
    track_id: Regex,
    pages: Regex,
    tracks: Regex,
}

impl SearchPageParser {
    pub(crate) fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            rows: selector("div.play_list ul li")?,
            row_link: selector("div.name a.url")?,
            page_buttons: selector("div.page a.btn")?,
            page_data: selector("div.pagedata span")?,
            track_id: pattern(r"/mp3/([^.]+)\.html")?,
            pages: pattern(r"共\s*(\d+)\s*页")?,
            tracks: pattern(r"共\s*(\d+)\s*首")?,
        })
    }

    /// Extract the track list and pagination counters from a search page
    ///
    /// A page without a track list yields an empty result. Rows whose link
    /// does not carry a track identifier are skipped.
    pub(crate) fn parse(&self, body: &str) -> Result<SearchResult, CatalogError> {
        let document = Html::parse_document(body);

        let mut tracks = Vec::new();
        for row in document.select(&self.rows) {
            let Some(link) = row.select(&self.row_link).next() else {
                continue;
            };
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let Some(captures) = self.track_id.captures(href) else {
                tracing::debug!(href, "skipping search row without track id");
                continue;
            };
            let title = link.text().collect::<String>().trim().to_string();
            tracks.push(TrackSummary::new(title, captures[1].to_string()));
        }

        let mut total_pages = 0;
        let mut total_tracks = 0;
        for button in document.select(&self.page_buttons) {
            let text = button.text().collect::<String>();
            if let Some(captures) = self.pages.captures(&text) {
                total_pages = parse_counter(&captures[1])?;
            }
            if let Some(captures) = self.tracks.captures(&text) {
                total_tracks = parse_counter(&captures[1])?;
            }
        }

        if total_tracks == 0
            && let Some(span) = document.select(&self.page_data).next()
        {
            total_tracks = parse_counter(span.text().collect::<String>().trim())?;
        }

        Ok(SearchResult {
            tracks,
            total_pages,
            total_tracks,
        })
    }
}

/// Decode a detail response
///
/// The body must be a JSON object whose `msg` discriminator is `1` (number or
/// string) and which carries a non-empty `url`. Any other shape is a parse
/// failure carrying the raw body.
pub(crate) fn parse_detail(track_id: &TrackId, body: &str) -> Result<TrackDetail, CatalogError> {
    let invalid = |message: String| CatalogError::Parse {
        message,
        raw: Some(body.to_string()),
    };

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| invalid(format!("detail for {track_id} is not valid JSON: {e}")))?;
    let Some(record) = value.as_object() else {
        return Err(invalid(format!("detail for {track_id} is not a JSON object")));
    };

    if !is_success(record.get("msg")) {
        return Err(invalid(format!(
            "provider did not report success for {track_id}"
        )));
    }

    let payload_url = string_field(record, "url")
        .ok_or_else(|| invalid(format!("detail for {track_id} has no payload URL")))?;

    let title = string_field(record, "title").unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let lyric_text = string_field(record, "lrc");

    Ok(TrackDetail {
        title,
        payload_url,
        lyric_text,
    })
}

fn is_success(msg: Option<&serde_json::Value>) -> bool {
    match msg {
        Some(serde_json::Value::Number(n)) => n.as_i64() == Some(1),
        Some(serde_json::Value::String(s)) => s.trim() == "1",
        _ => false,
    }
}

/// Non-blank string field; anything else (absent, null, other types) is `None`
fn string_field(record: &serde_json::Map<String, serde_json::Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn parse_counter(text: &str) -> Result<u32, CatalogError> {
    text.parse()
        .map_err(|e| CatalogError::parse(format!("pagination counter '{text}' is not a number: {e}")))
}

fn selector(css: &str) -> Result<Selector, CatalogError> {
    Selector::parse(css).map_err(|e| CatalogError::parse(format!("invalid selector '{css}': {e:?}")))
}

fn pattern(re: &str) -> Result<Regex, CatalogError> {
    Regex::new(re).map_err(|e| CatalogError::parse(format!("invalid pattern '{re}': {e}")))
}
