// Call record domain models
use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub timestamp: NaiveDateTime,
    pub hour: u8,
    pub day_of_week: String,
    pub call_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CallRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        day_of_week: String,
        call_type: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        use chrono::Timelike;

        Self {
            hour: timestamp.hour() as u8,
            timestamp,
            day_of_week,
            call_type,
            latitude,
            longitude,
        }
    }

    /// Both coordinates, or nothing.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// The loaded table. Fixed once built; shared behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<CallRecord>,
    has_coordinates: bool,
}

impl Dataset {
    pub fn new(records: Vec<CallRecord>, has_coordinates: bool) -> Self {
        Self {
            records,
            has_coordinates,
        }
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Whether the source carried `Latitude` and `Longitude` columns at all.
    pub fn has_coordinates(&self) -> bool {
        self.has_coordinates
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow every record as a subset.
    pub fn all(&self) -> Subset<'_> {
        Subset::new(self.records.iter().collect(), self.has_coordinates)
    }
}

/// Borrowed, ordered selection of records from a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Subset<'a> {
    records: Vec<&'a CallRecord>,
    has_coordinates: bool,
}

impl<'a> Subset<'a> {
    pub fn new(records: Vec<&'a CallRecord>, has_coordinates: bool) -> Self {
        Self {
            records,
            has_coordinates,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CallRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn has_coordinates(&self) -> bool {
        self.has_coordinates
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_hour_is_derived_from_timestamp() {
        let record = CallRecord::new(at(17), "Monday".to_string(), None, None, None);
        assert_eq!(record.hour, 17);
    }

    #[test]
    fn test_geo_point_requires_both_coordinates() {
        let full = CallRecord::new(at(1), "Monday".to_string(), None, Some(40.7), Some(-74.0));
        let half = CallRecord::new(at(1), "Monday".to_string(), None, Some(40.7), None);

        assert_eq!(full.geo_point(), Some(GeoPoint::new(40.7, -74.0)));
        assert_eq!(half.geo_point(), None);
    }

    #[test]
    fn test_all_borrows_every_record_in_order() {
        let dataset = Dataset::new(
            vec![
                CallRecord::new(at(1), "Monday".to_string(), None, None, None),
                CallRecord::new(at(2), "Tuesday".to_string(), None, None, None),
            ],
            false,
        );

        let subset = dataset.all();
        assert_eq!(subset.len(), 2);
        assert!(!subset.has_coordinates());
        let days: Vec<&str> = subset.iter().map(|r| r.day_of_week.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Tuesday"]);
    }
}
