// Grouping and counting over the loaded dataset
use crate::domain::aggregate::AggregateTable;
use crate::domain::call_record::{Dataset, GeoPoint, Subset};
use crate::domain::selection::Selection;
use std::collections::HashMap;

/// Calls per hour of day. Hours without calls are absent, not zero.
pub fn count_by_hour(subset: &Subset<'_>) -> AggregateTable<u8> {
    AggregateTable::from_keys(subset.iter().map(|r| r.hour))
}

/// Calls per day-of-week label, keys in lexicographic order.
pub fn count_by_day_of_week(subset: &Subset<'_>) -> AggregateTable<String> {
    AggregateTable::from_keys(subset.iter().map(|r| r.day_of_week.clone()))
}

/// The `k` most frequent call types, highest count first.
///
/// Equal counts keep the order in which the labels were first seen. Rows
/// without a call type are not ranked.
pub fn top_call_types(subset: &Subset<'_>, k: usize) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for call_type in subset.iter().filter_map(|r| r.call_type.as_deref()) {
        match index.get(call_type) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(call_type, counts.len());
                counts.push((call_type.to_string(), 1));
            }
        }
    }

    // sort_by is stable, so first-seen order survives among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}

/// Records matching the selection. `NoSelection` yields every record.
pub fn filter_by_day<'a>(dataset: &'a Dataset, selection: &Selection) -> Subset<'a> {
    match selection {
        Selection::NoSelection => dataset.all(),
        Selection::DaySelected(day) => Subset::new(
            dataset
                .records()
                .iter()
                .filter(|r| r.day_of_week == *day)
                .collect(),
            dataset.has_coordinates(),
        ),
    }
}

/// Distinct day labels in first-seen order.
pub fn day_labels(dataset: &Dataset) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for record in dataset.records() {
        if !labels.contains(&record.day_of_week) {
            labels.push(record.day_of_week.clone());
        }
    }
    labels
}

/// Mean latitude and mean longitude, each over the rows where it is present.
pub fn mean_center(subset: &Subset<'_>) -> Option<GeoPoint> {
    if !subset.has_coordinates() || subset.is_empty() {
        return None;
    }

    let mean = |values: Vec<f64>| -> Option<f64> {
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    };

    let latitude = mean(subset.iter().filter_map(|r| r.latitude).collect())?;
    let longitude = mean(subset.iter().filter_map(|r| r.longitude).collect())?;
    Some(GeoPoint::new(latitude, longitude))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::call_record::CallRecord;
    use chrono::NaiveDate;

    pub(crate) fn record(
        hour: u32,
        day: &str,
        call_type: &str,
        coords: Option<(f64, f64)>,
    ) -> CallRecord {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        CallRecord::new(
            timestamp,
            day.to_string(),
            Some(call_type.to_string()),
            coords.map(|c| c.0),
            coords.map(|c| c.1),
        )
    }

    /// 100 records: 40 on Monday (30 EMS, 10 FIRE), the rest spread over
    /// Tuesday and Wednesday. Every fifth Monday record lacks coordinates.
    pub(crate) fn sample_dataset() -> Dataset {
        let mut records = Vec::new();
        for i in 0..40 {
            let call_type = if i < 30 { "EMS" } else { "FIRE" };
            let coords = if i % 5 == 0 { None } else { Some((40.0 + i as f64 * 0.01, -75.0)) };
            records.push(record(i % 24, "Monday", call_type, coords));
        }
        for i in 0..60 {
            let day = if i % 2 == 0 { "Tuesday" } else { "Wednesday" };
            let call_type = match i % 3 {
                0 => "TRAFFIC",
                1 => "EMS",
                _ => "ALARM",
            };
            records.push(record((i * 7) % 24, day, call_type, Some((41.0, -74.0))));
        }
        Dataset::new(records, true)
    }

    #[test]
    fn test_count_by_hour_sums_to_len() {
        let dataset = sample_dataset();
        let table = count_by_hour(&dataset.all());

        assert_eq!(table.total(), dataset.len());
        assert!(table.keys().all(|h| *h < 24));
    }

    #[test]
    fn test_count_by_hour_leaves_gaps() {
        let dataset = Dataset::new(vec![record(2, "Monday", "EMS", None), record(5, "Monday", "EMS", None)], false);
        let table = count_by_hour(&dataset.all());

        let keys: Vec<u8> = table.keys().copied().collect();
        assert_eq!(keys, vec![2, 5]);
    }

    #[test]
    fn test_count_by_day_of_week() {
        let dataset = sample_dataset();
        let table = count_by_day_of_week(&dataset.all());

        assert_eq!(table.get(&"Monday".to_string()), 40);
        assert_eq!(table.get(&"Tuesday".to_string()), 30);
        assert_eq!(table.get(&"Wednesday".to_string()), 30);
        assert_eq!(table.total(), 100);
    }

    #[test]
    fn test_filter_no_selection_is_identity() {
        let dataset = sample_dataset();
        let subset = filter_by_day(&dataset, &Selection::NoSelection);

        assert_eq!(subset, dataset.all());
    }

    #[test]
    fn test_filter_by_day_keeps_only_that_day() {
        let dataset = sample_dataset();
        let subset = filter_by_day(&dataset, &Selection::DaySelected("Monday".to_string()));

        assert_eq!(subset.len(), 40);
        assert!(subset.iter().all(|r| r.day_of_week == "Monday"));
        assert_eq!(dataset.len(), 100);
    }

    #[test]
    fn test_counts_sum_to_filtered_subset_len() {
        let dataset = sample_dataset();

        for day in ["Monday", "Tuesday", "Wednesday"] {
            let subset = filter_by_day(&dataset, &Selection::DaySelected(day.to_string()));

            assert!(!subset.is_empty());
            assert_eq!(count_by_hour(&subset).total(), subset.len());
            assert_eq!(count_by_day_of_week(&subset).total(), subset.len());
            assert_eq!(count_by_day_of_week(&subset).get(&day.to_string()), subset.len());
        }
    }

    #[test]
    fn test_top_call_types_monday() {
        let dataset = sample_dataset();
        let subset = filter_by_day(&dataset, &Selection::DaySelected("Monday".to_string()));

        assert_eq!(
            top_call_types(&subset, 10),
            vec![("EMS".to_string(), 30), ("FIRE".to_string(), 10)]
        );
    }

    #[test]
    fn test_top_call_types_non_increasing_and_bounded() {
        let mut records = Vec::new();
        for i in 0..15 {
            for _ in 0..=i {
                records.push(record(0, "Monday", &format!("TYPE{}", i), None));
            }
        }
        let dataset = Dataset::new(records, false);

        let top = top_call_types(&dataset.all(), 10);
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(top[0], ("TYPE14".to_string(), 15));
    }

    #[test]
    fn test_top_call_types_ties_keep_first_seen_order() {
        let dataset = Dataset::new(
            vec![
                record(0, "Monday", "B", None),
                record(0, "Monday", "A", None),
                record(0, "Monday", "C", None),
                record(0, "Monday", "A", None),
                record(0, "Monday", "B", None),
            ],
            false,
        );

        let top = top_call_types(&dataset.all(), 10);
        assert_eq!(
            top,
            vec![("B".to_string(), 2), ("A".to_string(), 2), ("C".to_string(), 1)]
        );
    }

    #[test]
    fn test_empty_inputs() {
        let dataset = Dataset::default();
        let subset = dataset.all();

        assert!(count_by_hour(&subset).is_empty());
        assert!(count_by_day_of_week(&subset).is_empty());
        assert!(top_call_types(&subset, 10).is_empty());
        assert!(day_labels(&dataset).is_empty());
        assert_eq!(mean_center(&subset), None);
    }

    #[test]
    fn test_day_labels_first_seen_order() {
        let dataset = sample_dataset();
        assert_eq!(day_labels(&dataset), vec!["Monday", "Tuesday", "Wednesday"]);
    }

    #[test]
    fn test_mean_center_skips_missing_values() {
        let dataset = Dataset::new(
            vec![
                record(0, "Monday", "EMS", Some((40.0, -74.0))),
                record(0, "Monday", "EMS", None),
                record(0, "Monday", "EMS", Some((42.0, -76.0))),
            ],
            true,
        );

        assert_eq!(mean_center(&dataset.all()), Some(GeoPoint::new(41.0, -75.0)));
    }
}
