//! Job Posting Fetcher: pulls readable text out of a job-posting URL.
//!
//! One GET, bounded by a timeout, no retry. Any failure (network, non-2xx,
//! undecodable body) yields an empty string; callers treat that exactly like
//! a missing job description.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

/// Elements whose text we keep, matched in document order.
const POSTING_TEXT_SELECTOR: &str = "h1, h2, h3, p, li";

#[derive(Clone)]
pub struct JobFetcher {
    client: Client,
}

impl JobFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    /// Fetches `url` and extracts posting text. Never fails.
    pub async fn fetch(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Job posting fetch failed for {url}: {e}");
                return String::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Job posting {url} returned {status}");
            return String::new();
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Job posting body from {url} could not be read: {e}");
                return String::new();
            }
        };

        let text = extract_posting_text(&html);
        info!(
            "Fetched job posting from {url}: {} lines of text",
            text.lines().count()
        );
        text
    }
}

/// Extracts the text of headings, paragraphs and list items, one per line.
/// Whitespace inside an element collapses to single spaces; empty elements
/// are dropped. Nested matches (a `p` inside an `li`) appear once per match.
pub fn extract_posting_text(html: &str) -> String {
    let selector = match Selector::parse(POSTING_TEXT_SELECTOR) {
        Ok(s) => s,
        Err(e) => {
            debug!("Invalid posting selector: {e:?}");
            return String::new();
        }
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
