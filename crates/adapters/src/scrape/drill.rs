// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drill`: a deterministic paced driver with no network dependency.
//!
//! Every page "fetch" synthesizes a fixed number of posts and optionally
//! sleeps, so tests can dial in exact chain-handoff and cancellation timing
//! through the settings `[driver]` table:
//!
//! ```toml
//! forum = "drill"
//! base_url = "drill://local"
//!
//! [driver]
//! pages = 3
//! page_delay_ms = 1100
//! ```

use super::{ScrapeContext, ScrapeError, Scraper, StepOutcome};
use baton_core::settings::ScrapeSettings;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

pub const DRIVER_NAME: &str = "drill";

const DEFAULT_PAGES: u32 = 3;
const DEFAULT_POSTS_PER_PAGE: u32 = 5;

pub struct DrillScraper {
    pages: u32,
    posts_per_page: u32,
    page_delay: Duration,
    fail_at_page: Option<u32>,
    subject_user: String,
    source: String,
    cookies_path: PathBuf,
    /// Next page to fetch, 1-based
    next_page: u32,
    rows: Vec<String>,
}

impl DrillScraper {
    pub fn from_settings(
        settings: &ScrapeSettings,
        ctx: ScrapeContext,
    ) -> Result<Self, ScrapeError> {
        let pages = knob(&settings.driver, "pages")?.unwrap_or(DEFAULT_PAGES);
        if pages == 0 {
            return Err(ScrapeError::InvalidSettings("pages must be at least 1".into()));
        }
        Ok(Self {
            pages,
            posts_per_page: knob(&settings.driver, "posts_per_page")?
                .unwrap_or(DEFAULT_POSTS_PER_PAGE),
            page_delay: Duration::from_millis(
                knob(&settings.driver, "page_delay_ms")?.map_or(0, u64::from),
            ),
            fail_at_page: knob(&settings.driver, "fail_at_page")?,
            subject_user: settings
                .extract_user
                .clone()
                .unwrap_or_else(|| "anonymous".to_string()),
            source: settings.base_url.clone(),
            cookies_path: ctx.cookies_path,
            next_page: 1,
            rows: Vec::new(),
        })
    }

    fn fetch_page(&mut self, page: u32) {
        for post in 1..=self.posts_per_page {
            self.rows.push(format!(
                "<li>page {page}, post {post} by {}</li>",
                self.subject_user
            ));
        }
    }

    fn render_output(&self) -> String {
        let mut doc = String::new();
        doc.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\">");
        doc.push_str(&format!("<title>Posts by {}</title></head>\n", self.subject_user));
        doc.push_str(&format!(
            "<body>\n<h1>Posts by {} from {}</h1>\n<ol>\n",
            self.subject_user, self.source
        ));
        for row in &self.rows {
            doc.push_str(row);
            doc.push('\n');
        }
        doc.push_str("</ol>\n</body>\n</html>\n");
        doc
    }
}

impl Scraper for DrillScraper {
    fn resume(&mut self, progress: &Value) -> Result<(), ScrapeError> {
        let next_page = progress
            .get("next_page")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| ScrapeError::BadResume("missing or malformed next_page".into()))?;
        if next_page == 0 {
            return Err(ScrapeError::BadResume("next_page must be at least 1".into()));
        }
        let rows = progress
            .get("rows")
            .and_then(Value::as_array)
            .ok_or_else(|| ScrapeError::BadResume("missing rows".into()))?
            .iter()
            .map(|row| {
                row.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ScrapeError::BadResume("non-string row".into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.next_page = next_page;
        self.rows = rows;
        Ok(())
    }

    fn step(&mut self) -> Result<StepOutcome, ScrapeError> {
        let page = self.next_page;
        if self.fail_at_page == Some(page) {
            return Err(ScrapeError::PageFailed {
                page,
                reason: "drill configured to fail here".to_string(),
            });
        }
        if !self.page_delay.is_zero() {
            std::thread::sleep(self.page_delay);
        }
        if page == 1 {
            let jar = format!("drill_session={}\n", self.source);
            if let Err(e) = std::fs::write(&self.cookies_path, jar) {
                tracing::warn!(path = %self.cookies_path.display(), error = %e, "cookie jar write failed");
            }
        }
        self.fetch_page(page);
        self.next_page += 1;
        if page >= self.pages {
            Ok(StepOutcome::Complete { output: self.render_output() })
        } else {
            Ok(StepOutcome::Advanced {
                note: format!(
                    "Retrieved page {page} of {} ({} posts so far).",
                    self.pages,
                    self.rows.len()
                ),
            })
        }
    }

    fn progress(&self) -> Value {
        json!({
            "next_page": self.next_page,
            "rows": self.rows,
        })
    }
}

/// Read an optional non-negative integer knob from the `[driver]` table.
fn knob(table: &toml::Table, key: &str) -> Result<Option<u32>, ScrapeError> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::Integer(n)) => u32::try_from(*n).map(Some).map_err(|_| {
            ScrapeError::InvalidSettings(format!("driver.{key} out of range: {n}"))
        }),
        Some(other) => Err(ScrapeError::InvalidSettings(format!(
            "driver.{key} must be an integer, got {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "drill_tests.rs"]
mod tests;
