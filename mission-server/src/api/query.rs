//! Query-string helpers shared by the list handlers
//!
//! Multi-valued filters travel as comma-separated tokens
//! (`?statuses=current,archived`). An unknown token is a client error, never
//! silently dropped.

use std::str::FromStr;

use shared::Locale;
use shared::mission::ViewerLocale;

use crate::utils::{AppError, AppResult};

/// Offsets beyond ±14h do not exist
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Split `raw` on commas and parse every non-blank token
///
/// A missing parameter (or only blanks) yields an empty list.
pub fn parse_tokens<T: FromStr>(param: &str, raw: Option<&str>) -> AppResult<Vec<T>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| T::from_str(t).map_err(|_| AppError::invalid_query_token(param, t)))
        .collect()
}

/// Plain text values (`conciergeries`, `zones`)
pub fn split_values(raw: Option<&str>) -> Vec<String> {
    raw.map(|r| {
        r.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Single optional token
pub fn parse_token<T: FromStr>(param: &str, raw: Option<&str>) -> AppResult<Option<T>> {
    match raw.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => T::from_str(t)
            .map(Some)
            .map_err(|_| AppError::invalid_query_token(param, t)),
        None => Ok(None),
    }
}

/// Locale and UTC offset (minutes east of UTC) for date labels
pub fn viewer_locale(
    locale: Option<&str>,
    tz_offset: Option<i32>,
    default: Locale,
) -> AppResult<ViewerLocale> {
    let locale = parse_token::<Locale>("locale", locale)?.unwrap_or(default);
    let offset = tz_offset.unwrap_or(0);
    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&offset) {
        return Err(AppError::invalid_query_token("tz_offset", &offset.to_string()));
    }
    Ok(ViewerLocale::new(locale, offset))
}
