// Shapes aggregates into chart, dropdown and map views
use crate::application::aggregator::{
    count_by_day_of_week, count_by_hour, day_labels, mean_center,
};
use crate::domain::call_record::{Dataset, GeoPoint, Subset};
use crate::domain::view::{
    BarChartView, BarKey, ChartLayout, DropdownOption, DropdownView, HeatmapLayer, Margin,
    MapView,
};

pub const DAY_FILTER_ID: &str = "day-filter";
pub const HEATMAP_LAYER_ID: &str = "heatmap-layer";

const TOP_TYPES_TITLE: &str = "Top Emergency Types";

pub fn hourly_chart(subset: &Subset<'_>) -> BarChartView {
    let bars = count_by_hour(subset)
        .iter()
        .map(|(hour, count)| (BarKey::Hour(*hour), count))
        .collect();

    BarChartView::new(
        "911 Calls by Hour".to_string(),
        bars,
        ChartLayout::new("Hour of the Day", "Number of Calls")
            .with_margin(Margin::new(20, 20, 40, 20))
            .with_height(400),
    )
}

pub fn weekly_chart(subset: &Subset<'_>) -> BarChartView {
    let bars = count_by_day_of_week(subset)
        .iter()
        .map(|(day, count)| (BarKey::Label(day.clone()), count))
        .collect();

    BarChartView::new(
        "911 Calls by Day of the Week".to_string(),
        bars,
        ChartLayout::new("day_of_week", "Count"),
    )
}

/// Ranked call types as bars, in the order given.
pub fn call_types_chart(title: String, ranked: Vec<(String, usize)>) -> BarChartView {
    let bars = ranked
        .into_iter()
        .map(|(label, count)| (BarKey::Label(label), count))
        .collect();

    BarChartView::new(
        title,
        bars,
        ChartLayout::new("Emergency Type", "Number of 911 Calls")
            .with_tick_angle(-45)
            .with_margin(Margin::new(20, 20, 40, 80))
            .with_height(400),
    )
}

pub fn top_types_chart(ranked: Vec<(String, usize)>) -> BarChartView {
    call_types_chart(TOP_TYPES_TITLE.to_string(), ranked)
}

/// The reactive call-type chart. Without a day title it is exactly the
/// top-types chart.
pub fn filtered_chart(ranked: Vec<(String, usize)>, day_title: Option<String>) -> BarChartView {
    let title = day_title.unwrap_or_else(|| TOP_TYPES_TITLE.to_string());
    call_types_chart(title, ranked)
}

/// Coordinates for the map; records missing either one are skipped.
pub fn geo_points(subset: &Subset<'_>) -> Vec<GeoPoint> {
    if !subset.has_coordinates() {
        return Vec::new();
    }
    subset.iter().filter_map(|r| r.geo_point()).collect()
}

pub fn heatmap_layer(subset: &Subset<'_>) -> HeatmapLayer {
    HeatmapLayer {
        id: HEATMAP_LAYER_ID.to_string(),
        points: geo_points(subset),
    }
}

pub fn map_view(dataset: &Dataset, zoom: u8, height_px: u32) -> MapView {
    MapView {
        center: mean_center(&dataset.all()),
        zoom,
        height_px,
    }
}

pub fn day_dropdown(dataset: &Dataset) -> DropdownView {
    let options = day_labels(dataset)
        .into_iter()
        .map(|day| DropdownOption {
            label: day.clone(),
            value: day,
        })
        .collect();

    DropdownView {
        id: DAY_FILTER_ID.to_string(),
        placeholder: "Select a Day of the Week".to_string(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::aggregator::tests::{record, sample_dataset};
    use crate::application::aggregator::{filter_by_day, top_call_types};
    use crate::domain::selection::Selection;

    #[test]
    fn test_hourly_chart_layout() {
        let dataset = sample_dataset();
        let chart = hourly_chart(&dataset.all());

        assert_eq!(chart.title, "911 Calls by Hour");
        assert_eq!(chart.layout.x_title, "Hour of the Day");
        assert_eq!(chart.layout.height, Some(400));
        assert_eq!(chart.y.iter().sum::<usize>(), 100);
        assert_eq!(chart.x.len(), chart.y.len());
    }

    #[test]
    fn test_top_types_keeps_ranked_order() {
        let ranked = vec![("ZULU".to_string(), 5), ("ALPHA".to_string(), 3)];
        let chart = top_types_chart(ranked);

        assert_eq!(
            chart.x,
            vec![BarKey::Label("ZULU".to_string()), BarKey::Label("ALPHA".to_string())]
        );
        assert_eq!(chart.y, vec![5, 3]);
        assert_eq!(chart.layout.tick_angle, Some(-45));
    }

    #[test]
    fn test_filtered_chart_without_day_matches_top_types() {
        let dataset = sample_dataset();
        let ranked = top_call_types(&dataset.all(), 10);

        let filtered = filtered_chart(ranked.clone(), None);
        let top = top_types_chart(ranked);

        assert_eq!(filtered, top);
        assert_eq!(
            serde_json::to_vec(&filtered).unwrap(),
            serde_json::to_vec(&top).unwrap()
        );
    }

    #[test]
    fn test_geo_points_drop_missing_coordinates() {
        let dataset = sample_dataset();
        let monday = filter_by_day(&dataset, &Selection::DaySelected("Monday".to_string()));

        let points = geo_points(&monday);
        assert_eq!(points.len(), 32);
        assert!(points.len() <= monday.len());
    }

    #[test]
    fn test_geo_points_empty_without_coordinate_columns() {
        let dataset = Dataset::new(vec![record(0, "Monday", "EMS", None)], false);
        assert!(heatmap_layer(&dataset.all()).points.is_empty());
        assert_eq!(map_view(&dataset, 12, 500).center, None);
    }

    #[test]
    fn test_day_dropdown_options() {
        let dropdown = day_dropdown(&sample_dataset());

        assert_eq!(dropdown.id, "day-filter");
        let values: Vec<&str> = dropdown.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Monday", "Tuesday", "Wednesday"]);
    }
}
