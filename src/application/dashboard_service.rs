// Dashboard service - Builds the static page model once at startup
use crate::application::aggregator::top_call_types;
use crate::application::selection_service::build_patch;
use crate::application::view_builder::{
    day_dropdown, hourly_chart, map_view, top_types_chart, weekly_chart,
};
use crate::domain::call_record::Dataset;
use crate::domain::selection::Selection;
use crate::domain::view::DashboardPage;
use crate::infrastructure::config::{ChartSettings, MapSettings};
use std::sync::Arc;

const PAGE_TITLE: &str = "911 Calls Analysis Dashboard";
const DESCRIPTION: [&str; 2] = [
    "This dashboard provides insights into 911 call data, including trends by hour, day of the week, and top emergency types.",
    "Use the visualizations below to explore when and where emergencies occur, and the most common types of calls.",
];

#[derive(Clone)]
pub struct DashboardService {
    page: Arc<DashboardPage>,
}

impl DashboardService {
    pub fn new(dataset: &Dataset, map: &MapSettings, charts: &ChartSettings) -> Self {
        Self {
            page: Arc::new(build_page(dataset, map, charts)),
        }
    }

    pub fn page(&self) -> Arc<DashboardPage> {
        self.page.clone()
    }
}

/// The page as first shown: every static chart plus the reactive views in
/// their `NoSelection` state.
pub fn build_page(dataset: &Dataset, map: &MapSettings, charts: &ChartSettings) -> DashboardPage {
    let all = dataset.all();
    let initial = build_patch(dataset, &Selection::NoSelection, charts);

    DashboardPage {
        title: PAGE_TITLE.to_string(),
        description: DESCRIPTION.iter().map(|s| s.to_string()).collect(),
        hourly: hourly_chart(&all),
        weekly: weekly_chart(&all),
        day_filter: day_dropdown(dataset),
        filtered: initial.filtered,
        top_types: top_types_chart(top_call_types(&all, charts.top_k)),
        map: map_view(dataset, map.zoom, map.height_px),
        heatmap: initial.heatmap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::aggregator::tests::sample_dataset;

    #[test]
    fn test_build_page() {
        let dataset = sample_dataset();
        let page = build_page(&dataset, &MapSettings::default(), &ChartSettings::default());

        assert_eq!(page.title, "911 Calls Analysis Dashboard");
        assert_eq!(page.description.len(), 2);
        assert_eq!(page.hourly.y.iter().sum::<usize>(), 100);
        assert_eq!(page.weekly.y, vec![40, 30, 30]);
        assert_eq!(page.day_filter.options.len(), 3);
        assert_eq!(page.filtered, page.top_types);
        assert_eq!(page.map.zoom, 12);
        assert!(page.map.center.is_some());
        assert_eq!(page.heatmap.points.len(), 92);
    }

    #[test]
    fn test_build_page_empty_dataset() {
        let page = build_page(&Dataset::default(), &MapSettings::default(), &ChartSettings::default());

        assert!(page.hourly.x.is_empty());
        assert!(page.top_types.x.is_empty());
        assert!(page.day_filter.options.is_empty());
        assert_eq!(page.map.center, None);
    }
}
