use crate::config::DataCatalog;
use crate::domain::model::{SchemaFlags, Trip, WorkingTable};
use crate::utils::error::{ExplorerError, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Raw CSV row as stored on disk. Timestamps stay textual here so parse
/// failures can be reported with their line number.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // Stored as a float in the source files (e.g. "1992.0").
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Reads a city's trip records into a [`WorkingTable`] with derived calendar
/// fields attached.
pub struct TripLoader {
    catalog: DataCatalog,
}

impl TripLoader {
    pub fn new(catalog: DataCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DataCatalog {
        &self.catalog
    }

    pub fn load(&self, city: &str) -> Result<WorkingTable> {
        let path = self
            .catalog
            .path_for(city)
            .ok_or_else(|| ExplorerError::UnknownCity(city.to_string()))?;

        tracing::debug!(city, path = %path.display(), "reading trip records");

        // The reader owns the file handle; it is released on every exit path
        // when the reader drops.
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?;
        let schema = SchemaFlags {
            has_gender: headers.iter().any(|h| h == "Gender"),
            has_birth_year: headers.iter().any(|h| h == "Birth Year"),
        };

        let mut trips = Vec::new();
        for (idx, row) in reader.deserialize::<RawTrip>().enumerate() {
            let line = idx + 2; // line 1 is the header
            let raw = row?;

            if raw.trip_duration < 0.0 {
                return Err(ExplorerError::Malformed {
                    line,
                    message: format!("negative trip duration: {}", raw.trip_duration),
                });
            }

            trips.push(Trip::new(
                parse_timestamp(&raw.start_time, line)?,
                parse_timestamp(&raw.end_time, line)?,
                raw.trip_duration,
                raw.start_station,
                raw.end_station,
                raw.user_type,
                raw.gender.filter(|g| !g.is_empty()),
                raw.birth_year.map(|year| year as i32),
            ));
        }

        tracing::debug!(
            city,
            trips = trips.len(),
            has_gender = schema.has_gender,
            has_birth_year = schema.has_birth_year,
            "trip records loaded"
        );
        Ok(WorkingTable::new(trips, schema))
    }
}

fn parse_timestamp(raw: &str, line: usize) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .map_err(|_| ExplorerError::Malformed {
            line,
            message: format!("unparsable timestamp: '{raw}'"),
        })
}
