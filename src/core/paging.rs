use crate::domain::model::{Trip, WorkingTable};

/// Rows revealed per request.
pub const PAGE_SIZE: usize = 5;

/// One reveal's worth of raw rows plus the cursor's terminal flag.
#[derive(Debug)]
pub struct Page<'a> {
    pub rows: &'a [Trip],
    pub exhausted: bool,
}

/// Incremental reveal of raw rows in fixed-size windows.
///
/// Two states: active (offset within the table) and exhausted (offset past
/// the end). Requests against an exhausted cursor return an empty page and
/// stay exhausted; there is no rewind.
#[derive(Debug)]
pub struct RawDataCursor<'a> {
    table: &'a WorkingTable,
    offset: usize,
}

impl<'a> RawDataCursor<'a> {
    pub fn new(table: &'a WorkingTable) -> Self {
        Self { table, offset: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.table.len()
    }

    pub fn next_page(&mut self) -> Page<'a> {
        let len = self.table.len();
        if self.offset >= len {
            return Page {
                rows: &[],
                exhausted: true,
            };
        }
        let end = usize::min(self.offset + PAGE_SIZE, len);
        let rows = &self.table.trips()[self.offset..end];
        self.offset += PAGE_SIZE;
        Page {
            rows,
            exhausted: self.offset >= len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SchemaFlags, Trip};
    use chrono::NaiveDate;

    fn table(rows: usize) -> WorkingTable {
        let start = NaiveDate::from_ymd_opt(2017, 1, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let trips = (0..rows)
            .map(|i| {
                Trip::new(
                    start,
                    start,
                    60.0,
                    format!("start-{i}"),
                    "end".into(),
                    "Subscriber".into(),
                    None,
                    None,
                )
            })
            .collect();
        WorkingTable::new(
            trips,
            SchemaFlags {
                has_gender: false,
                has_birth_year: false,
            },
        )
    }

    #[test]
    fn twelve_rows_page_as_five_five_two_then_nothing() {
        let t = table(12);
        let mut cursor = RawDataCursor::new(&t);

        let first = cursor.next_page();
        assert_eq!(first.rows.len(), 5);
        assert!(!first.exhausted);

        let second = cursor.next_page();
        assert_eq!(second.rows.len(), 5);
        assert!(!second.exhausted);

        let third = cursor.next_page();
        assert_eq!(third.rows.len(), 2);
        assert!(third.exhausted);

        let fourth = cursor.next_page();
        assert!(fourth.rows.is_empty());
        assert!(fourth.exhausted);
    }

    #[test]
    fn pages_never_overlap_or_skip_rows() {
        let t = table(12);
        let mut cursor = RawDataCursor::new(&t);
        let mut seen = Vec::new();
        loop {
            let page = cursor.next_page();
            seen.extend(page.rows.iter().map(|r| r.start_station.clone()));
            if page.exhausted {
                break;
            }
        }
        let expected: Vec<_> = (0..12).map(|i| format!("start-{i}")).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn exact_multiple_exhausts_after_the_final_full_page() {
        let t = table(10);
        let mut cursor = RawDataCursor::new(&t);
        assert!(!cursor.next_page().exhausted);
        let last = cursor.next_page();
        assert_eq!(last.rows.len(), 5);
        assert!(last.exhausted);
        assert!(cursor.next_page().rows.is_empty());
    }

    #[test]
    fn empty_table_is_exhausted_immediately() {
        let t = table(0);
        let mut cursor = RawDataCursor::new(&t);
        assert!(cursor.is_exhausted());
        let page = cursor.next_page();
        assert!(page.rows.is_empty());
        assert!(page.exhausted);
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let t = table(3);
        let mut cursor = RawDataCursor::new(&t);
        assert!(cursor.next_page().exhausted);
        for _ in 0..3 {
            let page = cursor.next_page();
            assert!(page.rows.is_empty());
            assert!(page.exhausted);
        }
    }
}
