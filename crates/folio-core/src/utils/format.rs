use chrono::NaiveDate;
use serde_json::Value;

/// Average adult reading speed used for the "N min read" label.
const WORDS_PER_MINUTE: usize = 200;

/// Build a URL slug from a title: lowercase, every run of characters
/// outside `[a-z0-9]` collapsed into one `-`, no leading or trailing `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Case-insensitive substring check
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Parse the date formats found in content: RFC 3339 timestamps from the
/// backend, `YYYY-MM-DD`, and display dates like `Mar 18, 2024` from the
/// fallback tables.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return Some(dt.date_naive());
    }
    if let Some(prefix) = date.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(d);
        }
    }
    NaiveDate::parse_from_str(date, "%b %d, %Y").ok()
}

/// Format a date string for display ("March 18, 2024")
pub fn format_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Flatten portable-text blocks into plain paragraphs.
///
/// Only `block` entries contribute text (their span children are
/// concatenated); images and other embedded objects are skipped.
pub fn portable_text_to_plain(body: &Value) -> String {
    let Some(blocks) = body.as_array() else {
        return String::new();
    };

    blocks
        .iter()
        .filter(|block| block.get("_type").and_then(Value::as_str) == Some("block"))
        .map(|block| {
            block
                .get("children")
                .and_then(Value::as_array)
                .map(|children| {
                    children
                        .iter()
                        .filter_map(|span| span.get("text").and_then(Value::as_str))
                        .collect::<String>()
                })
                .unwrap_or_default()
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Estimated reading time, never less than one minute.
pub fn reading_time_minutes(text: &str) -> usize {
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}
