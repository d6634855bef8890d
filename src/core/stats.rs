//! The four aggregation reports.
//!
//! Every report is a pure function of the (already filtered) working table
//! and returns structured values; formatting belongs to the display layer.
//! "Most frequent" uses a single documented tie-break everywhere: among tied
//! values, the one encountered first in table order wins. Each report also
//! records its own wall-clock elapsed time as a diagnostic.

use crate::domain::model::{weekday_name, WorkingTable};
use chrono::Month;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Most frequent value, first-seen-in-table-order on ties. `None` for an
/// empty input.
fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, index)).0 += 1;
    }
    counts
        .into_iter()
        .max_by_key(|(_, (count, first))| (*count, Reverse(*first)))
        .map(|(value, _)| value)
}

/// Distinct values with their counts, descending by count; ties keep
/// first-seen order.
fn value_counts<T, I>(values: I) -> Vec<(T, u64)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, (u64, usize)> = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, index)).0 += 1;
    }
    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|(_, (ca, fa)), (_, (cb, fb))| cb.cmp(ca).then(fa.cmp(fb)));
    out.into_iter().map(|(value, (count, _))| (value, count)).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeStats {
    /// Calendar name of the most frequent start month.
    pub popular_month: Option<String>,
    /// Full weekday name of the most frequent start day.
    pub popular_day: Option<String>,
    pub popular_hour: Option<u32>,
    #[serde(skip)]
    pub elapsed: Duration,
}

pub fn time_stats(table: &WorkingTable) -> TimeStats {
    let started = Instant::now();
    let trips = table.trips();

    let popular_month = mode(trips.iter().map(|t| t.month))
        .and_then(|m| Month::try_from(m as u8).ok())
        .map(|m| m.name().to_string());
    let popular_day =
        mode(trips.iter().map(|t| t.weekday)).map(|d| weekday_name(d).to_string());
    let popular_hour = mode(trips.iter().map(|t| t.hour));

    let stats = TimeStats {
        popular_month,
        popular_day,
        popular_hour,
        elapsed: started.elapsed(),
    };
    tracing::debug!(elapsed_ms = stats.elapsed.as_millis() as u64, "time stats computed");
    stats
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
    /// Exact number of rows sharing this (start, end) combination.
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StationStats {
    pub popular_start: Option<String>,
    pub popular_end: Option<String>,
    pub popular_trip: Option<StationPair>,
    #[serde(skip)]
    pub elapsed: Duration,
}

pub fn station_stats(table: &WorkingTable) -> StationStats {
    let started = Instant::now();
    let trips = table.trips();

    let popular_start =
        mode(trips.iter().map(|t| t.start_station.as_str())).map(str::to_string);
    let popular_end = mode(trips.iter().map(|t| t.end_station.as_str())).map(str::to_string);

    let mut pairs: HashMap<(&str, &str), (u64, usize)> = HashMap::new();
    for (index, trip) in trips.iter().enumerate() {
        pairs
            .entry((trip.start_station.as_str(), trip.end_station.as_str()))
            .or_insert((0, index))
            .0 += 1;
    }
    let popular_trip = pairs
        .into_iter()
        .max_by_key(|(_, (count, first))| (*count, Reverse(*first)))
        .map(|((start, end), (count, _))| StationPair {
            start: start.to_string(),
            end: end.to_string(),
            count,
        });

    let stats = StationStats {
        popular_start,
        popular_end,
        popular_trip,
        elapsed: started.elapsed(),
    };
    tracing::debug!(elapsed_ms = stats.elapsed.as_millis() as u64, "station stats computed");
    stats
}

#[derive(Debug, Clone, Serialize)]
pub struct DurationStats {
    pub total_secs: f64,
    /// `None` for an empty table; the mean of zero trips is not a number.
    pub mean_secs: Option<f64>,
    #[serde(skip)]
    pub elapsed: Duration,
}

pub fn duration_stats(table: &WorkingTable) -> DurationStats {
    let started = Instant::now();
    let trips = table.trips();

    let total_secs: f64 = trips.iter().map(|t| t.duration_secs).sum();
    let mean_secs = if trips.is_empty() {
        None
    } else {
        Some(total_secs / trips.len() as f64)
    };

    let stats = DurationStats {
        total_secs,
        mean_secs,
        elapsed: started.elapsed(),
    };
    tracing::debug!(elapsed_ms = stats.elapsed.as_millis() as u64, "duration stats computed");
    stats
}

#[derive(Debug, Clone, Serialize)]
pub struct BirthYearSummary {
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
    pub most_common: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    /// User type counts, descending by count.
    pub user_types: Vec<(String, u64)>,
    /// Present iff the city's schema has a Gender column.
    pub genders: Option<Vec<(String, u64)>>,
    /// Present iff the city's schema has a Birth Year column.
    pub birth_years: Option<BirthYearSummary>,
    #[serde(skip)]
    pub elapsed: Duration,
}

pub fn user_stats(table: &WorkingTable) -> UserStats {
    let started = Instant::now();
    let trips = table.trips();
    let schema = table.schema();

    let user_types = value_counts(trips.iter().map(|t| t.user_type.clone()));

    let genders = schema
        .has_gender
        .then(|| value_counts(trips.iter().filter_map(|t| t.gender.clone())));

    let birth_years = schema.has_birth_year.then(|| {
        let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
        BirthYearSummary {
            earliest: years.iter().min().copied(),
            latest: years.iter().max().copied(),
            most_common: mode(years.iter().copied()),
        }
    });

    let stats = UserStats {
        user_types,
        genders,
        birth_years,
        elapsed: started.elapsed(),
    };
    tracing::debug!(elapsed_ms = stats.elapsed.as_millis() as u64, "user stats computed");
    stats
}
