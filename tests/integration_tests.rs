use chrono::{Duration, NaiveDate, NaiveDateTime};
use fieldtools::logging::{LineLogWriter, TimestampFileWriter};
use fieldtools::models::{ConversionRecord, Dms, HttpQuery};
use fieldtools::processors::BatchConverter;
use fieldtools::readers::{JsonTimeZoneRegistry, TimeZoneEntry, TimeZoneRegistry};
use fieldtools::utils::{gregorian_date, make_rows, nearest_year_for_day, reverse_columns};
use fieldtools::writers::CsvWriter;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn local(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn tzi(bias: i32, standard: i32, daylight: i32, end: [i16; 8], start: [i16; 8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for long in [bias, standard, daylight] {
        bytes.extend_from_slice(&long.to_le_bytes());
    }
    for word in end.iter().chain(start.iter()) {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes
}

#[test]
fn test_convert_file_to_csv() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("stations.txt");
    fs::write(
        &input_path,
        "# latitudes\n453015\n4530N\n45° 30' 15.5\" S\n\n-10.5 w\nnowhere\n",
    )
    .unwrap();

    let records = BatchConverter::new(3)
        .convert_file(&input_path, None)
        .unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(
        records.iter().map(|r| r.line).collect::<Vec<_>>(),
        vec![2, 3, 4, 6, 7]
    );
    assert!((records[0].decimal.unwrap() - 45.504167).abs() < 1e-6);
    assert_eq!(records[1].decimal, Some(45.5));
    assert!(records[2].decimal.unwrap() < 0.0);
    assert_eq!(records[3].decimal, Some(10.5));
    assert!(!records[4].is_ok());

    let output_path = temp_dir.path().join("out").join("stations.csv");
    let written = CsvWriter::new().write_records(&records, &output_path).unwrap();
    assert_eq!(written, 5);

    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    let back: Vec<ConversionRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(back, records);
}

#[test]
fn test_strict_conversion_stops_on_bad_line() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("bad.txt");
    let mut file = fs::File::create(&input_path).unwrap();
    writeln!(file, "10N").unwrap();
    writeln!(file, "400 00 00").unwrap();

    let err = BatchConverter::new(2)
        .with_strict(true)
        .convert_file(&input_path, None)
        .unwrap_err();
    assert!(err.to_string().contains("valid range"));
}

#[test]
fn test_dms_inside_json_documents() {
    #[derive(serde::Deserialize)]
    struct Station {
        name: String,
        latitude: Dms,
        longitude: Dms,
    }

    let station: Station = serde_json::from_str(
        r#"{"name": "Valentia", "latitude": "51 56 18 N", "longitude": -10.244}"#,
    )
    .unwrap();
    assert_eq!(station.name, "Valentia");
    assert!((station.latitude.decimal_degrees() - 51.938333).abs() < 1e-6);
    assert_eq!(station.longitude.decimal_degrees(), -10.244);

    let bad = serde_json::from_str::<Station>(
        r#"{"name": "x", "latitude": "north", "longitude": 0}"#,
    );
    assert!(bad.is_err());
}

#[test]
fn test_query_round_trip() {
    let query = HttpQuery::parse("name=John%20Smith&city=Z%C3%BCrich&empty=").unwrap();
    assert_eq!(query.get("name"), Some("John Smith"));
    assert_eq!(query.get("city"), Some("Zürich"));
    assert_eq!(query.get("empty"), Some(""));

    let encoded = query.to_string();
    assert_eq!(encoded, "city=Z%C3%BCrich&empty=&name=John%20Smith");
    assert_eq!(HttpQuery::parse(&encoded).unwrap(), query);

    assert!(HttpQuery::parse("a=b&c").is_err());
    assert!(HttpQuery::parse("a=b=c").is_err());
}

#[test]
fn test_timezone_registry_conversions() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("zones.json");
    let entries = vec![
        TimeZoneEntry {
            key: "Eastern Standard Time".to_string(),
            display: "(UTC-05:00) Eastern Time (US & Canada)".to_string(),
            std: "Eastern Standard Time".to_string(),
            dlt: "Eastern Daylight Time".to_string(),
            tzi: tzi(300, 0, -60, [0, 11, 0, 1, 2, 0, 0, 0], [0, 3, 0, 2, 2, 0, 0, 0]),
        },
        TimeZoneEntry {
            key: "Tokyo Standard Time".to_string(),
            display: "(UTC+09:00) Osaka, Sapporo, Tokyo".to_string(),
            std: "Tokyo Standard Time".to_string(),
            dlt: "Tokyo Daylight Time".to_string(),
            tzi: tzi(-540, 0, -60, [0; 8], [0; 8]),
        },
    ];
    fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();

    let registry = JsonTimeZoneRegistry::from_path(&path).unwrap();
    assert_eq!(
        registry.names(),
        vec!["Eastern Standard Time", "Tokyo Standard Time"]
    );

    let eastern = registry.load("Eastern Standard Time").unwrap();
    assert_eq!(eastern.dst_start(2024).unwrap(), local(2024, 3, 10, 2));
    assert_eq!(eastern.dst_end(2024).unwrap(), local(2024, 11, 3, 2));
    assert_eq!(eastern.to_utc(local(2024, 1, 15, 12)), local(2024, 1, 15, 17));
    assert_eq!(eastern.to_utc(local(2024, 7, 4, 12)), local(2024, 7, 4, 16));
    assert_eq!(eastern.utc_offset(local(2024, 7, 4, 12)), Duration::hours(-4));

    let tokyo = registry.load("Tokyo Standard Time").unwrap();
    assert_eq!(tokyo.utc_offset(local(2024, 7, 4, 12)), Duration::hours(9));
    assert_eq!(tokyo.tz_name(local(2024, 7, 4, 12)), "Tokyo Standard Time");

    assert!(registry.load("Mars Standard Time").is_err());
}

#[test]
fn test_rows_and_dates() {
    let items: Vec<u32> = (1..=7).collect();
    let rows = make_rows(&items, 3).unwrap();
    assert_eq!(
        rows,
        vec![
            vec![Some(1), Some(4), Some(7)],
            vec![Some(2), Some(5), None],
            vec![Some(3), Some(6), None],
        ]
    );
    assert_eq!(
        reverse_columns(&rows)[0],
        vec![Some(7), Some(4), Some(1)]
    );

    let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let year = nearest_year_for_day(360, today);
    assert_eq!(year, 2023);
    assert_eq!(
        gregorian_date(year, 360).unwrap(),
        NaiveDate::from_ymd_opt(2023, 12, 26).unwrap()
    );
}

#[test]
fn test_log_capture_into_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs").join("capture.log");
    let writer = TimestampFileWriter::new(&log_path).with_period(None);

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(writer)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut capture = LineLogWriter::with_level("child", tracing::Level::INFO);
        capture.write_all(b"first line\nsecond ").unwrap();
        capture.write_all(b"line\npartial").unwrap();
    });

    let contents = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("first line"));
    assert!(lines[1].contains("second line"));
    assert!(lines[2].contains("partial"));
    assert!(lines.iter().all(|l| l.contains("INFO")));
}
