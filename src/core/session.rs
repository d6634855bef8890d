use crate::config::DataCatalog;
use crate::core::loader::TripLoader;
use crate::core::{filter, stats};
use crate::domain::model::{FilterSpec, WorkingTable};
use crate::utils::error::Result;
use serde::Serialize;

/// The four reports for one filtered table, as structured values.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub row_count: usize,
    pub time: stats::TimeStats,
    pub stations: stats::StationStats,
    pub durations: stats::DurationStats,
    pub users: stats::UserStats,
}

/// One load → filter → aggregate pass. Sessions share nothing except the
/// injected catalog; the wrapper may run as many as it likes.
pub struct Session {
    loader: TripLoader,
}

impl Session {
    pub fn new(catalog: DataCatalog) -> Self {
        Self {
            loader: TripLoader::new(catalog),
        }
    }

    /// Runs the pipeline for one validated filter spec, returning the
    /// narrowed table (for raw-row paging) alongside the reports.
    pub fn run(&self, spec: &FilterSpec) -> Result<(WorkingTable, SessionReport)> {
        tracing::info!(city = %spec.city, "loading trip records");
        let table = self.loader.load(&spec.city)?;
        tracing::info!(trips = table.len(), "records loaded");

        let table = filter::apply(table, &spec.month, &spec.day);
        tracing::info!(trips = table.len(), "records match the active filters");

        let report = SessionReport {
            row_count: table.len(),
            time: stats::time_stats(&table),
            stations: stats::station_stats(&table),
            durations: stats::duration_stats(&table),
            users: stats::user_stats(&table),
        };
        Ok((table, report))
    }
}
