// CSV file repository implementation
use crate::application::call_repository::{CallRepository, LoadReport};
use crate::domain::call_record::{CallRecord, Dataset};
use crate::domain::error::LoadError;
use crate::infrastructure::config::RowPolicy;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use std::path::{Path, PathBuf};

const COL_INCIDENT_DATE: &str = "INCIDENT_DATE";
const COL_DAY_OF_WEEK: &str = "day_of_week";
const COL_CALL_TYPE: &str = "TYP_DESC";
const COL_LATITUDE: &str = "Latitude";
const COL_LONGITUDE: &str = "Longitude";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Clone)]
pub struct CsvCallRepository {
    path: PathBuf,
    max_rows: usize,
    row_policy: RowPolicy,
}

/// Header positions of the columns we read.
#[derive(Debug, Clone, Copy)]
struct Columns {
    incident_date: usize,
    call_type: usize,
    day_of_week: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let latitude = find(COL_LATITUDE);
        let longitude = find(COL_LONGITUDE);
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
            _ => (None, None),
        };

        Ok(Self {
            incident_date: find(COL_INCIDENT_DATE)
                .ok_or(LoadError::MissingColumn(COL_INCIDENT_DATE))?,
            call_type: find(COL_CALL_TYPE).ok_or(LoadError::MissingColumn(COL_CALL_TYPE))?,
            day_of_week: find(COL_DAY_OF_WEEK),
            latitude,
            longitude,
        })
    }

    fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

impl CsvCallRepository {
    pub fn new(path: impl Into<PathBuf>, max_rows: usize, row_policy: RowPolicy) -> Self {
        Self {
            path: path.into(),
            max_rows,
            row_policy,
        }
    }

    /// Blocking read of at most `max_rows` data rows.
    fn read(path: &Path, max_rows: usize, policy: RowPolicy) -> Result<(Dataset, LoadReport), LoadError> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let columns = Columns::from_headers(reader.headers()?)?;
        let mut records = Vec::new();
        let mut report = LoadReport::default();

        for (index, row) in reader.records().take(max_rows).enumerate() {
            let row = row?;
            report.rows_read += 1;

            let raw_date = field(&row, Some(columns.incident_date)).unwrap_or_default();
            let Some(timestamp) = parse_timestamp(raw_date) else {
                match policy {
                    RowPolicy::Strict => {
                        // +2: one for the header, one for 1-based numbering
                        return Err(LoadError::InvalidTimestamp {
                            row: index + 2,
                            value: raw_date.to_string(),
                        });
                    }
                    RowPolicy::Drop => {
                        tracing::debug!("Dropping row {} with INCIDENT_DATE `{}`", index + 2, raw_date);
                        report.rows_dropped += 1;
                        continue;
                    }
                }
            };

            let day_of_week = field(&row, columns.day_of_week)
                .map(str::to_string)
                .unwrap_or_else(|| weekday_name(timestamp.weekday()).to_string());
            let call_type = field(&row, Some(columns.call_type)).map(str::to_string);
            let latitude = field(&row, columns.latitude).and_then(parse_coordinate);
            let longitude = field(&row, columns.longitude).and_then(parse_coordinate);

            records.push(CallRecord::new(timestamp, day_of_week, call_type, latitude, longitude));
        }

        Ok((Dataset::new(records, columns.has_coordinates()), report))
    }
}

#[async_trait]
impl CallRepository for CsvCallRepository {
    async fn load_dataset(&self) -> Result<(Dataset, LoadReport), LoadError> {
        let path = self.path.clone();
        let max_rows = self.max_rows;
        let policy = self.row_policy;

        tracing::debug!("Reading up to {} rows from {}", max_rows, path.display());
        tokio::task::spawn_blocking(move || Self::read(&path, max_rows, policy)).await?
    }
}

/// Trimmed, non-empty cell value.
fn field(row: &csv::StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Parse an incident timestamp, keeping the wall-clock time of any offset.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
