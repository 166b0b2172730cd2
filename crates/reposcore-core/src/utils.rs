// SPDX-License-Identifier: Apache-2.0

//! Date and display helpers shared by front ends.

use chrono::{DateTime, Months, NaiveDate, Utc};

/// Returns the date one year before `today`.
///
/// February 29th maps to February 28th of the previous year.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use reposcore_core::utils::one_year_before;
///
/// let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// assert_eq!(one_year_before(today), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
/// ```
#[must_use]
pub fn one_year_before(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN)
}

/// Default creation date lower bound: one year ago, in UTC.
#[must_use]
pub fn default_created_after() -> NaiveDate {
    one_year_before(Utc::now().date_naive())
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns a `chrono` parse error if the input is not a valid date.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
}

/// Formats a `DateTime<Utc>` as relative time (e.g., "3 days ago").
///
/// # Examples
///
/// ```
/// use chrono::{Utc, Duration};
/// use reposcore_core::utils::format_relative_time;
///
/// let now = Utc::now();
/// assert_eq!(format_relative_time(&now), "just now");
///
/// let yesterday = now - Duration::days(1);
/// assert_eq!(format_relative_time(&yesterday), "1 day ago");
/// ```
#[must_use]
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 30 {
        let months = duration.num_days() / 30;
        if months == 1 {
            "1 month ago".to_string()
        } else {
            format!("{months} months ago")
        }
    } else if duration.num_days() > 0 {
        let days = duration.num_days();
        if days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{days} days ago")
        }
    } else if duration.num_hours() > 0 {
        let hours = duration.num_hours();
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{hours} hours ago")
        }
    } else {
        "just now".to_string()
    }
}
