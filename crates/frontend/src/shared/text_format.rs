//! Text rendering helpers shared by read-only cells: number formatting with
//! thousands separators and URL detection.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("url pattern"));

/// Most decimals shown by [`format_number_auto`]
const MAX_AUTO_DECIMALS: usize = 6;

/// Piece of text that is either shown as is or rendered as a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
    Plain(String),
    Link(String),
}

/// Split text into plain and link segments. Trailing punctuation after a
/// URL stays in the plain text.
pub fn linkify(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in URL_PATTERN.find_iter(text) {
        let url = m
            .as_str()
            .trim_end_matches(|c: char| ".,;:!?)".contains(c));
        let has_host = url
            .split_once("://")
            .map(|(_, rest)| !rest.is_empty())
            .unwrap_or(false);
        if !has_host {
            continue;
        }
        if m.start() > last {
            segments.push(TextSegment::Plain(text[last..m.start()].to_string()));
        }
        segments.push(TextSegment::Link(url.to_string()));
        last = m.start() + url.len();
    }

    if last < text.len() {
        segments.push(TextSegment::Plain(text[last..].to_string()));
    }
    segments
}

/// Number with a space as thousands separator and `decimals` digits after
/// the point, e.g. `format_number(1234.567, 2)` is `"1 234.57"`
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    // space every 3 digits from the right of the integer part
    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            result.push(' ');
        }
        result.push(c);
    }
    let formatted_integer: String = result.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// Like [`format_number`] with as many decimals as the value needs
pub fn format_number_auto(value: f64) -> String {
    let text = value.to_string();
    let decimals = text
        .split_once('.')
        .map(|(_, d)| d.len().min(MAX_AUTO_DECIMALS))
        .unwrap_or(0);
    format_number(value, decimals)
}

/// Value followed by its unit, if any
pub fn format_with_unit(text: String, unit: Option<&str>) -> String {
    match unit.map(str::trim).filter(|u| !u.is_empty()) {
        Some(unit) => format!("{} {}", text, unit),
        None => text,
    }
}

/// Parse a number typed by a user: spaces are ignored and `,` is accepted
/// as decimal separator
pub fn parse_user_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
