use anyhow::Context;
use bikeshare_explorer::core::paging::RawDataCursor;
use bikeshare_explorer::utils::{logger, validation};
use bikeshare_explorer::{
    CliConfig, DataCatalog, FilterSpec, Session, SessionReport, Trip, WorkingTable,
};
use clap::Parser;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting bikeshare-explorer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let catalog = config.data_catalog().context("failed to build data catalog")?;
    let session = Session::new(catalog.clone());

    if let Some(city) = &config.city {
        return run_non_interactive(&session, &catalog, city, &config);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let Some(spec) = prompt_filters(&mut input, &catalog)? else {
            break;
        };
        match session.run(&spec) {
            Ok((table, report)) => {
                print_report(&report);
                browse_raw_data(&mut input, &table)?;
            }
            Err(e) => {
                tracing::error!("session failed: {e}");
                eprintln!("Could not explore '{}': {e}", spec.city);
            }
        }

        match prompt(&mut input, "\nWould you like to restart? Enter yes or no.\n")? {
            Some(answer) if answer == "yes" => {}
            _ => break,
        }
    }

    Ok(())
}

fn run_non_interactive(
    session: &Session,
    catalog: &DataCatalog,
    city: &str,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let spec = FilterSpec {
        city: validation::parse_city(city, catalog)?,
        month: validation::parse_month_filter(&config.month)?,
        day: validation::parse_day_filter(&config.day)?,
    };
    let (_, report) = session.run(&spec)?;
    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Reads one trimmed, case-folded answer. `None` means stdin was closed, so
/// the caller must stop asking instead of re-prompting.
fn prompt(input: &mut impl BufRead, text: &str) -> io::Result<Option<String>> {
    print!("{text}>>> ");
    io::stdout().flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_lowercase()))
}

/// Collects a validated filter spec, re-prompting on invalid input.
/// `None` means the input stream ended before a spec was complete.
fn prompt_filters(
    input: &mut impl BufRead,
    catalog: &DataCatalog,
) -> io::Result<Option<FilterSpec>> {
    let city_prompt = format!(
        "\nChoose a city ({}):\n",
        catalog.cities().collect::<Vec<_>>().join(", ")
    );

    let city = loop {
        let Some(raw) = prompt(input, &city_prompt)? else {
            return Ok(None);
        };
        match validation::parse_city(&raw, catalog) {
            Ok(city) => break city,
            Err(e) => println!("{e}"),
        }
    };
    let month = loop {
        let Some(raw) = prompt(input, "\nFilter by month (all, january-june):\n")? else {
            return Ok(None);
        };
        match validation::parse_month_filter(&raw) {
            Ok(month) => break month,
            Err(e) => println!("{e}"),
        }
    };
    let day = loop {
        let Some(raw) = prompt(input, "\nFilter by day (all, monday-sunday):\n")? else {
            return Ok(None);
        };
        match validation::parse_day_filter(&raw) {
            Ok(day) => break day,
            Err(e) => println!("{e}"),
        }
    };

    Ok(Some(FilterSpec { city, month, day }))
}

fn print_report(report: &SessionReport) {
    let na = || "n/a (no matching trips)".to_string();

    println!("\nCalculating The Most Frequent Times of Travel...\n");
    println!(
        "Most Popular Month: {}",
        report.time.popular_month.clone().unwrap_or_else(na)
    );
    println!(
        "Most Popular Day: {}",
        report.time.popular_day.clone().unwrap_or_else(na)
    );
    match report.time.popular_hour {
        Some(hour) => println!("Most Popular Hour: {hour}"),
        None => println!("Most Popular Hour: {}", na()),
    }
    println!("\nThis took {:.6} seconds.", report.time.elapsed.as_secs_f64());
    println!("{}", "-".repeat(40));

    println!("\nCalculating The Most Popular Stations and Trip...\n");
    println!(
        "Most Popular Start Station: {}",
        report.stations.popular_start.clone().unwrap_or_else(na)
    );
    println!(
        "Most Popular End Station: {}",
        report.stations.popular_end.clone().unwrap_or_else(na)
    );
    match &report.stations.popular_trip {
        Some(pair) => println!(
            "Most Frequent Trip: {} -> {} ({} rides)",
            pair.start, pair.end, pair.count
        ),
        None => println!("Most Frequent Trip: {}", na()),
    }
    println!("\nThis took {:.6} seconds.", report.stations.elapsed.as_secs_f64());
    println!("{}", "-".repeat(40));

    println!("\nCalculating Trip Duration...\n");
    println!("Total travel time: {} seconds", report.durations.total_secs);
    match report.durations.mean_secs {
        Some(mean) => println!("Mean travel time: {mean:.2} seconds"),
        None => println!("Mean travel time: {}", na()),
    }
    println!("\nThis took {:.6} seconds.", report.durations.elapsed.as_secs_f64());
    println!("{}", "-".repeat(40));

    println!("\nCalculating User Stats...\n");
    for (user_type, count) in &report.users.user_types {
        println!("{user_type}: {count}");
    }
    if let Some(genders) = &report.users.genders {
        println!();
        for (gender, count) in genders {
            println!("{gender}: {count}");
        }
    }
    if let Some(years) = &report.users.birth_years {
        println!();
        match years.earliest {
            Some(y) => println!("Earliest year of Birth: {y}"),
            None => println!("Earliest year of Birth: {}", na()),
        }
        match years.latest {
            Some(y) => println!("Most Recent year of Birth: {y}"),
            None => println!("Most Recent year of Birth: {}", na()),
        }
        match years.most_common {
            Some(y) => println!("Most Common year of Birth: {y}"),
            None => println!("Most Common year of Birth: {}", na()),
        }
    }
    println!("\nThis took {:.6} seconds.", report.users.elapsed.as_secs_f64());
    println!("{}", "-".repeat(40));
}

fn browse_raw_data(input: &mut impl BufRead, table: &WorkingTable) -> io::Result<()> {
    let mut cursor = RawDataCursor::new(table);
    let mut first = true;
    loop {
        let question = if first {
            "\nDo you want to see the first 5 rows of data? Enter yes or no.\n"
        } else {
            "\nDo you want to see the next 5 rows of data? Enter yes or no.\n"
        };
        let Some(answer) = prompt(input, question)? else {
            break;
        };
        if answer != "yes" {
            break;
        }

        let page = cursor.next_page();
        if page.rows.is_empty() {
            println!("There is no more data to display.");
            break;
        }
        for trip in page.rows {
            println!("{}", format_trip(trip));
        }
        first = false;
    }
    Ok(())
}

fn format_trip(trip: &Trip) -> String {
    let mut line = format!(
        "{} | {} -> {} | {}s | {}",
        trip.start_time, trip.start_station, trip.end_station, trip.duration_secs, trip.user_type
    );
    if let Some(gender) = &trip.gender {
        line.push_str(&format!(" | {gender}"));
    }
    if let Some(year) = trip.birth_year {
        line.push_str(&format!(" | born {year}"));
    }
    line
}
