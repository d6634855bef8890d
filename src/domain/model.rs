use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};
use serde::{Serialize, Serializer};

/// Canonical English weekday name, independent of locale settings.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

/// A single bikeshare trip with its derived calendar fields.
///
/// `month`, `weekday` and `hour` are computed from `start_time` in
/// [`Trip::new`] and are never written anywhere else.
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_secs: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    pub hour: u32,
}

impl Trip {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        duration_secs: f64,
        start_station: String,
        end_station: String,
        user_type: String,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        Self {
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
            end_time,
            duration_secs,
            start_station,
            end_station,
            user_type,
            gender,
            birth_year,
        }
    }
}

/// Which optional columns the loaded city's schema carries.
///
/// Determined once from the CSV header row; aggregation branches on these
/// flags instead of probing individual rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaFlags {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// The ordered set of trips currently in scope for a session.
///
/// Each pipeline stage consumes a table by value and produces a new one, so
/// no stage ever observes another stage's mutations.
#[derive(Debug, Clone)]
pub struct WorkingTable {
    trips: Vec<Trip>,
    schema: SchemaFlags,
}

impl WorkingTable {
    pub fn new(trips: Vec<Trip>, schema: SchemaFlags) -> Self {
        Self { trips, schema }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn into_trips(self) -> Vec<Trip> {
        self.trips
    }

    pub fn schema(&self) -> SchemaFlags {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Month predicate of a validated filter spec. Only January through June are
/// ever produced by validation, matching the months the source data covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Month(Month),
}

impl MonthFilter {
    pub fn matches(&self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m.number_from_month() == month,
        }
    }
}

/// Day-of-week predicate of a validated filter spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn matches(&self, weekday: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => *d == weekday,
        }
    }
}

/// The validated (city, month, day) triple driving one session.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub city: String,
    pub month: MonthFilter,
    pub day: DayFilter,
}
