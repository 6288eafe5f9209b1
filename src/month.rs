//! Localized month names for 1-based month numbers.

use chrono::{Locale, TimeZone, Utc};

/// Any year works, the full month name does not depend on it.
const REFERENCE_YEAR: i32 = 2000;

/// Capitalized full month name of `month` (1 = January) in `locale`.
///
/// Returns `None` for months outside `1..=12`.
pub fn month_name(month: u32, locale: Locale) -> Option<String> {
    if !(1..=12).contains(&month) {
        tracing::debug!(month, "month out of range");
        return None;
    }

    let date = Utc
        .with_ymd_and_hms(REFERENCE_YEAR, month, 1, 0, 0, 0)
        .single()?;
    let name = date.format_localized("%B", locale).to_string();

    Some(capitalize(&name))
}

pub fn month_name_en(month: u32) -> Option<String> {
    month_name(month, Locale::en_US)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
