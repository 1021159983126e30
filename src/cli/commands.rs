use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::logging;
use crate::models::{ConversionRecord, Dms, HttpQuery};
use crate::processors::BatchConverter;
use crate::readers::{CoordinateReader, JsonTimeZoneRegistry, TimeZoneRegistry};
use crate::utils::progress::ProgressReporter;
use crate::utils::{coerce, gregorian_date, make_rows, nearest_year_for_day, QuickTimer};
use crate::writers::CsvWriter;

pub fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if cli.log_file.is_some() {
        settings.log_file = cli.log_file.clone();
    }
    logging::init(&settings, cli.verbose)?;
    debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Dms { inputs, json } => {
            let mut failures = 0;
            for (index, input) in inputs.iter().enumerate() {
                let result = Dms::parse(input);
                if result.is_err() {
                    failures += 1;
                }

                if json {
                    let record = ConversionRecord::from_result(index + 1, input, &result);
                    println!("{}", serde_json::to_string(&record)?);
                    continue;
                }

                match result {
                    Ok(dms) => {
                        let (d, m, s) = dms.to_triple();
                        println!("{}\t{}\t({}° {}' {:.3}\")", input, dms, d, m, s);
                    }
                    Err(e) => eprintln!("{}\t{}", input, e),
                }
            }

            if failures > 0 {
                bail!("{} of {} inputs could not be converted", failures, inputs.len());
            }
        }

        Commands::Convert {
            input_file,
            output_file,
            max_workers,
            strict,
            quiet,
        } => {
            let timer = QuickTimer::new();
            let output_file = output_file.unwrap_or_else(|| input_file.with_extension("csv"));
            let workers = max_workers.unwrap_or(settings.max_workers);

            println!("Converting coordinates...");
            println!("Input file: {}", input_file.display());
            println!("Output file: {}", output_file.display());
            println!("Workers: {}", workers);

            let lines = CoordinateReader::new()
                .read_lines(&input_file)
                .with_context(|| format!("Failed to read {}", input_file.display()))?;

            let progress = ProgressReporter::new(lines.len() as u64, "Converting...", quiet);
            let records = BatchConverter::new(workers)
                .with_strict(strict)
                .convert_lines(&lines, Some(&progress))?;

            let written = CsvWriter::new()
                .write_records(&records, &output_file)
                .with_context(|| format!("Failed to write {}", output_file.display()))?;

            let failed = records.iter().filter(|r| !r.is_ok()).count();
            println!(
                "Wrote {} rows ({} failed) in {:.2?}",
                written,
                failed,
                timer.stop()
            );
        }

        Commands::Query { query, json } => {
            let parsed = HttpQuery::parse(&query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                for (key, value) in parsed.iter() {
                    println!("{} = {}", key, value);
                }
            }
        }

        Commands::Coerce { values } => {
            for value in &values {
                let scalar = coerce(value);
                println!("{}\t{}\t{}", value, scalar.kind(), scalar);
            }
        }

        Commands::Rows { columns, items } => {
            let rows = make_rows(&items, columns)?;
            let width = items.iter().map(|i| i.chars().count()).max().unwrap_or(0);

            for row in rows {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| format!("{:<width$}", cell.as_deref().unwrap_or(""), width = width))
                    .collect();
                println!("{}", cells.join("  ").trim_end());
            }
        }

        Commands::Year { day, date } => {
            if !(1..=366).contains(&day) {
                bail!("Day of year must be between 1 and 366, got {}", day);
            }
            let today = match date {
                Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                    .with_context(|| format!("Invalid reference date '{}'", text))?,
                None => Utc::now().date_naive(),
            };

            let year = nearest_year_for_day(day, today);
            let resolved = gregorian_date(year, i64::from(day))?;
            println!("{}", resolved);
        }

        Commands::Tz { registry, name, at } => {
            let path = registry
                .or_else(|| settings.timezone_registry.clone())
                .context("No timezone registry given (use --registry or set timezone_registry)")?;
            let registry = JsonTimeZoneRegistry::from_path(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;

            let Some(name) = name else {
                for zone in registry.names() {
                    println!("{}", zone);
                }
                return Ok(());
            };

            let zone = registry.load(&name)?;
            println!("{}", zone);
            println!("Standard: {} (bias {} min)", zone.standard_name, zone.standard_bias().num_minutes());
            println!("Daylight: {} (bias {} min)", zone.daylight_name, zone.daylight_bias().num_minutes());

            match at {
                Some(text) => {
                    let local = NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S")
                        .with_context(|| format!("Invalid local time '{}'", text))?;
                    let minutes = zone.utc_offset(local).num_minutes();
                    let sign = if minutes < 0 { '-' } else { '+' };
                    println!(
                        "{} {} (UTC{}{:02}:{:02}) = {} UTC",
                        local,
                        zone.tz_name(local),
                        sign,
                        minutes.abs() / 60,
                        minutes.abs() % 60,
                        zone.to_utc(local)
                    );
                }
                None if zone.daylight_start.is_set() => {
                    let year = Utc::now().year();
                    println!("DST starts: {}", zone.dst_start(year)?);
                    println!("DST ends:   {}", zone.dst_end(year)?);
                }
                None => println!("No daylight saving rules"),
            }
        }
    }

    Ok(())
}
