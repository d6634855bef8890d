pub mod filter;
pub mod loader;
pub mod paging;
pub mod session;
pub mod stats;

pub use crate::domain::model::{FilterSpec, Trip, WorkingTable};
pub use crate::utils::error::Result;
