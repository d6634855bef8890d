pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{CliConfig, DataCatalog};
pub use core::loader::TripLoader;
pub use core::paging::{Page, RawDataCursor, PAGE_SIZE};
pub use core::session::{Session, SessionReport};
pub use domain::model::{DayFilter, FilterSpec, MonthFilter, SchemaFlags, Trip, WorkingTable};
pub use utils::error::{ExplorerError, Result};
