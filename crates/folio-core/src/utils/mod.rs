//! Utility functions for string formatting and manipulation.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    contains_ignore_case, format_date, parse_date, portable_text_to_plain, reading_time_minutes,
    slugify, truncate_string,
};
