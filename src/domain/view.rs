// Declarative view models rendered by the page
use super::call_record::GeoPoint;
use serde::Serialize;

/// An x-axis category: an hour bucket or a text label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BarKey {
    Hour(u8),
    Label(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    pub fn new(l: u32, r: u32, t: u32, b: u32) -> Self {
        Self { l, r, t, b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLayout {
    pub x_title: String,
    pub y_title: String,
    pub tick_angle: Option<i32>,
    pub height: Option<u32>,
    pub margin: Option<Margin>,
}

impl ChartLayout {
    pub fn new(x_title: &str, y_title: &str) -> Self {
        Self {
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            tick_angle: None,
            height: None,
            margin: None,
        }
    }

    pub fn with_tick_angle(mut self, angle: i32) -> Self {
        self.tick_angle = Some(angle);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChartView {
    pub title: String,
    pub x: Vec<BarKey>,
    pub y: Vec<usize>,
    pub layout: ChartLayout,
}

impl BarChartView {
    pub fn new(title: String, bars: Vec<(BarKey, usize)>, layout: ChartLayout) -> Self {
        let (x, y) = bars.into_iter().unzip();
        Self {
            title,
            x,
            y,
            layout,
        }
    }
}

/// Point overlay for the map. Replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapLayer {
    pub id: String,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Option<GeoPoint>,
    pub zoom: u8,
    pub height_px: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownView {
    pub id: String,
    pub placeholder: String,
    pub options: Vec<DropdownOption>,
}

/// Everything the page shows, for one selection state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub title: String,
    pub description: Vec<String>,
    pub hourly: BarChartView,
    pub weekly: BarChartView,
    pub day_filter: DropdownView,
    pub filtered: BarChartView,
    pub top_types: BarChartView,
    pub map: MapView,
    pub heatmap: HeatmapLayer,
}

/// The two reactive outputs produced by a selection event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPatch {
    pub selection: Option<String>,
    pub filtered: BarChartView,
    pub heatmap: HeatmapLayer,
}

/// One message of a progressive selection update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Selection { day: Option<String> },
    ChartUpdate { chart: BarChartView },
    HeatmapUpdate { layer: HeatmapLayer },
    Complete { updates: usize, duration_ms: u64 },
}
