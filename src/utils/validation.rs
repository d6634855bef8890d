use crate::config::DataCatalog;
use crate::domain::model::{DayFilter, MonthFilter};
use crate::utils::error::{ExplorerError, Result};
use chrono::{Month, Weekday};

const MONTH_CHOICES: &str = "all, january, february, march, april, may, june";
const DAY_CHOICES: &str = "all, monday, tuesday, wednesday, thursday, friday, saturday, sunday";

fn invalid(value: &str, expected: String) -> ExplorerError {
    ExplorerError::InvalidInput {
        value: value.to_string(),
        expected,
    }
}

/// Case-folds `raw` and checks it against the catalog's city keys.
pub fn parse_city(raw: &str, catalog: &DataCatalog) -> Result<String> {
    let city = raw.trim().to_lowercase();
    if catalog.contains(&city) {
        Ok(city)
    } else {
        let expected = catalog.cities().collect::<Vec<_>>().join(", ");
        Err(invalid(raw, expected))
    }
}

/// Accepts `all` or a full month name from January through June, the range
/// the source datasets cover. Abbreviations are rejected.
pub fn parse_month_filter(raw: &str) -> Result<MonthFilter> {
    let month = match raw.trim().to_lowercase().as_str() {
        "all" => return Ok(MonthFilter::All),
        "january" => Month::January,
        "february" => Month::February,
        "march" => Month::March,
        "april" => Month::April,
        "may" => Month::May,
        "june" => Month::June,
        _ => return Err(invalid(raw, MONTH_CHOICES.to_string())),
    };
    Ok(MonthFilter::Month(month))
}

/// Accepts `all` or a full weekday name, case-insensitive. Abbreviations are
/// rejected.
pub fn parse_day_filter(raw: &str) -> Result<DayFilter> {
    let day = match raw.trim().to_lowercase().as_str() {
        "all" => return Ok(DayFilter::All),
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        "sunday" => Weekday::Sun,
        _ => return Err(invalid(raw, DAY_CHOICES.to_string())),
    };
    Ok(DayFilter::Day(day))
}
