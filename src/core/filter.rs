use crate::domain::model::{DayFilter, MonthFilter, WorkingTable};

/// Narrows `table` to the rows matching both predicates.
///
/// `All` variants are no-ops; active predicates are conjunctive. Relative row
/// order is preserved so pagination and mode tie-breaking stay deterministic.
pub fn apply(table: WorkingTable, month: &MonthFilter, day: &DayFilter) -> WorkingTable {
    if *month == MonthFilter::All && *day == DayFilter::All {
        return table;
    }

    let schema = table.schema();
    let trips = table
        .into_trips()
        .into_iter()
        .filter(|trip| month.matches(trip.month) && day.matches(trip.weekday))
        .collect();
    WorkingTable::new(trips, schema)
}
