use bikeshare_explorer::utils::validation;
use bikeshare_explorer::{
    DataCatalog, DayFilter, ExplorerError, FilterSpec, MonthFilter, Session,
};
use chrono::Month;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_city(dir: &TempDir, file: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, contents).unwrap();
    path
}

fn spec(city: &str, month: MonthFilter, day: DayFilter) -> FilterSpec {
    FilterSpec {
        city: city.to_string(),
        month,
        day,
    }
}

const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-02 09:07:57,2017-01-02 09:20:53,776,A,B,Subscriber,Male,1992.0
1,2017-03-06 17:30:00,2017-03-06 17:45:00,900,A,B,Subscriber,Female,1984.0
2,2017-03-07 08:05:00,2017-03-07 08:35:00,1800,A,C,Customer,,
";

const WASHINGTON: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-05-01 08:00:00,2017-05-01 08:10:00,600,Union Station,Dupont Circle,Registered
2017-05-02 18:00:00,2017-05-02 18:20:00,1200,Dupont Circle,Union Station,Casual
2017-06-05 07:45:00,2017-06-05 07:55:00,600,Union Station,Dupont Circle,Registered
";

#[test]
fn chicago_station_report_finds_the_dominant_pair() {
    let dir = TempDir::new().unwrap();
    let path = write_city(&dir, "chicago.csv", CHICAGO);
    let session = Session::new(DataCatalog::from_entries([("chicago", path)]));

    let (table, report) = session
        .run(&spec("chicago", MonthFilter::All, DayFilter::All))
        .unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(report.stations.popular_start.as_deref(), Some("A"));
    let pair = report.stations.popular_trip.unwrap();
    assert_eq!((pair.start.as_str(), pair.end.as_str()), ("A", "B"));
    assert_eq!(pair.count, 2);

    // Chicago carries the optional columns, so both sub-reports are present.
    assert!(report.users.genders.is_some());
    let years = report.users.birth_years.unwrap();
    assert_eq!(years.earliest, Some(1984));
    assert_eq!(years.latest, Some(1992));
}

#[test]
fn washington_demographics_is_user_types_only() {
    let dir = TempDir::new().unwrap();
    let path = write_city(&dir, "washington.csv", WASHINGTON);
    let session = Session::new(DataCatalog::from_entries([("washington", path)]));

    let (_, report) = session
        .run(&spec("washington", MonthFilter::All, DayFilter::All))
        .unwrap();

    assert_eq!(
        report.users.user_types,
        vec![("Registered".to_string(), 2), ("Casual".to_string(), 1)]
    );
    assert!(report.users.genders.is_none());
    assert!(report.users.birth_years.is_none());
}

#[test]
fn march_filter_keeps_only_march_rows_in_original_order() {
    let dir = TempDir::new().unwrap();
    let path = write_city(&dir, "chicago.csv", CHICAGO);
    let session = Session::new(DataCatalog::from_entries([("chicago", path)]));

    let (table, report) = session
        .run(&spec(
            "chicago",
            MonthFilter::Month(Month::March),
            DayFilter::All,
        ))
        .unwrap();

    assert_eq!(table.len(), 2);
    let ends: Vec<_> = table
        .trips()
        .iter()
        .map(|t| t.end_station.as_str())
        .collect();
    assert_eq!(ends, vec!["B", "C"]);
    assert!(table.trips().iter().all(|t| t.month == 3));
    assert_eq!(report.row_count, 2);
}

#[test]
fn empty_filter_result_yields_explicit_not_applicable_reports() {
    let dir = TempDir::new().unwrap();
    let path = write_city(&dir, "chicago.csv", CHICAGO);
    let session = Session::new(DataCatalog::from_entries([("chicago", path)]));

    // No June rows in the fixture.
    let (table, report) = session
        .run(&spec(
            "chicago",
            MonthFilter::Month(Month::June),
            DayFilter::All,
        ))
        .unwrap();

    assert!(table.is_empty());
    assert!(report.time.popular_month.is_none());
    assert!(report.stations.popular_trip.is_none());
    assert_eq!(report.durations.total_secs, 0.0);
    assert!(report.durations.mean_secs.is_none());
    assert!(report.users.user_types.is_empty());
    // Columns are still present even though no rows matched.
    assert_eq!(report.users.genders, Some(vec![]));
    assert!(report.users.birth_years.is_some());
}

#[test]
fn duration_report_sums_and_averages_the_filtered_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_city(&dir, "washington.csv", WASHINGTON);
    let session = Session::new(DataCatalog::from_entries([("washington", path)]));

    let (_, report) = session
        .run(&spec("washington", MonthFilter::All, DayFilter::All))
        .unwrap();

    assert_eq!(report.durations.total_secs, 2400.0);
    assert_eq!(report.durations.mean_secs, Some(800.0));
}

#[test]
fn data_source_failures_abort_the_session() {
    let dir = TempDir::new().unwrap();
    let session = Session::new(DataCatalog::from_entries([(
        "chicago",
        dir.path().join("missing.csv"),
    )]));
    assert!(session
        .run(&spec("chicago", MonthFilter::All, DayFilter::All))
        .is_err());

    let bad = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
not-a-timestamp,2017-01-02 09:20:53,776,A,B,Subscriber
";
    let path = write_city(&dir, "broken.csv", bad);
    let session = Session::new(DataCatalog::from_entries([("chicago", path)]));
    assert!(matches!(
        session.run(&spec("chicago", MonthFilter::All, DayFilter::All)),
        Err(ExplorerError::Malformed { .. })
    ));
}

#[test]
fn sessions_are_independent() {
    let dir = TempDir::new().unwrap();
    let chicago = write_city(&dir, "chicago.csv", CHICAGO);
    let washington = write_city(&dir, "washington.csv", WASHINGTON);
    let session = Session::new(DataCatalog::from_entries([
        ("chicago", chicago),
        ("washington", washington),
    ]));

    let (first, _) = session
        .run(&spec(
            "chicago",
            MonthFilter::Month(Month::March),
            DayFilter::All,
        ))
        .unwrap();
    let (second, _) = session
        .run(&spec("washington", MonthFilter::All, DayFilter::All))
        .unwrap();

    // The narrowed chicago table is untouched by the washington run.
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 3);
}

#[test]
fn toml_catalog_drives_a_full_session() {
    let dir = TempDir::new().unwrap();
    let data = write_city(&dir, "chi.csv", CHICAGO);
    let catalog_path = dir.path().join("catalog.toml");
    fs::write(
        &catalog_path,
        format!("[cities]\nchicago = {:?}\n", data.to_str().unwrap()),
    )
    .unwrap();

    let catalog = DataCatalog::from_toml_file(&catalog_path).unwrap();
    let city = validation::parse_city("Chicago", &catalog).unwrap();
    let month = validation::parse_month_filter("all").unwrap();
    let day = validation::parse_day_filter("monday").unwrap();

    let session = Session::new(catalog);
    let (table, _) = session.run(&spec(&city, month, day)).unwrap();
    // 2017-01-02 and 2017-03-06 are Mondays; 2017-03-07 is not.
    assert_eq!(table.len(), 2);
}

#[test]
fn report_serializes_to_json_for_the_display_layer() {
    let dir = TempDir::new().unwrap();
    let path = write_city(&dir, "washington.csv", WASHINGTON);
    let session = Session::new(DataCatalog::from_entries([("washington", path)]));

    let (_, report) = session
        .run(&spec("washington", MonthFilter::All, DayFilter::All))
        .unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["row_count"], 3);
    assert_eq!(json["time"]["popular_month"], "May");
    assert!(json["users"]["genders"].is_null());
}
