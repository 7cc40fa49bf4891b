//! Shareable completion card.
//!
//! The card is a self-contained 300×150 SVG: a tiled background with three
//! centered lines of text (the lead-in, the finish time and the puzzle's
//! publication date).

use std::fmt::Write as _;
use std::time::Duration;

use derive_getters::Getters;
use tracing::{debug, instrument};

use crate::format::{format_finish_time, format_publication_date, parse_publication_date};

const LEAD_IN: &str = "I finished this crossword in";
const BACKGROUND: &str = "#FAE8C7";
const ACCENT: &str = "#FDAA45";
const TILE: u32 = 30;
const WIDTH: u32 = 300;
const HEIGHT: u32 = 150;

/// Accent tiles as (column, row).
const TILES: [(u32, u32); 6] = [(9, 0), (0, 3), (0, 4), (1, 4), (9, 3), (9, 4)];

/// A generated completion card.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Summary {
    svg: String,
    alt: String,
}

/// The publication date could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid publication date {:?}: {}", date, reason)]
pub struct SummaryError {
    /// Date as stored.
    pub date: String,
    /// Parser message.
    pub reason: String,
}

impl std::error::Error for SummaryError {}

/// Builds the card for a solve of `duration` on the puzzle published on
/// `publication_date` (`YYYY-MM-DD`).
#[instrument]
pub fn generate(publication_date: &str, duration: Duration) -> Result<Summary, SummaryError> {
    let date = parse_publication_date(publication_date).map_err(|e| SummaryError {
        date: publication_date.to_string(),
        reason: e.to_string(),
    })?;
    let time = format_finish_time(duration);
    let title = format_publication_date(date);

    let svg = render(&time, &title);
    let alt = format!("{} {} on {}", LEAD_IN, time, title);
    debug!(bytes = svg.len(), %alt, "Summary generated");

    Ok(Summary { svg, alt })
}

fn render(time: &str, title: &str) -> String {
    let mut svg = String::with_capacity(2048);
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="1200px" height="600px" style="font-family: Cambria, serif;">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="{BACKGROUND}"/>"#
    );
    for (col, row) in TILES {
        let _ = writeln!(
            svg,
            r#"  <rect x="{}" y="{}" width="{TILE}" height="{TILE}" fill="{ACCENT}"/>"#,
            col * TILE,
            row * TILE
        );
    }
    for y in (TILE..HEIGHT).step_by(TILE as usize) {
        let _ = writeln!(
            svg,
            r#"  <line x1="0" x2="{WIDTH}" y1="{y}" y2="{y}" stroke="{ACCENT}"/>"#
        );
    }
    for x in (TILE..WIDTH).step_by(TILE as usize) {
        let _ = writeln!(
            svg,
            r#"  <line x1="{x}" x2="{x}" y1="0" y2="{HEIGHT}" stroke="{ACCENT}"/>"#
        );
    }
    let _ = writeln!(
        svg,
        r#"  <text x="150" y="52" text-anchor="middle" font-size="20">{}</text>"#,
        escape(LEAD_IN)
    );
    let _ = writeln!(
        svg,
        r#"  <text x="150" y="85" text-anchor="middle" font-size="30" font-weight="bold">{}</text>"#,
        escape(time)
    );
    let _ = writeln!(
        svg,
        r#"  <text x="150" y="112" text-anchor="middle" font-size="20">{}</text>"#,
        escape(title)
    );
    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
