use serde::Deserialize;

const DEFAULT_CONFIG_NAME: &str = "config/dashboard";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub dataset: DatasetSettings,
    pub server: ServerSettings,
    pub map: MapSettings,
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetSettings {
    pub path: String,
    pub max_rows: usize,
    pub row_policy: RowPolicy,
}

/// What to do with a row whose `INCIDENT_DATE` is absent or unparsable.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    #[default]
    Drop,
    Strict,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    pub zoom: u8,
    pub height_px: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    pub top_k: usize,
    pub filtered_title: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            top_k: 10,
            filtered_title: "Emergency Types on ${day}".to_string(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: 12,
            height_px: 500,
        }
    }
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_dashboard_config_from(DEFAULT_CONFIG_NAME)
}

/// Built-in defaults, overridden by the named file when it exists.
pub fn load_dashboard_config_from(name: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("dataset.path", "updatedfile.csv")?
        .set_default("dataset.max_rows", 50_000i64)?
        .set_default("dataset.row_policy", "drop")?
        .set_default("server.bind", "127.0.0.1:8050")?
        .set_default("map.zoom", 12i64)?
        .set_default("map.height_px", 500i64)?
        .set_default("charts.top_k", 10i64)?
        .set_default("charts.filtered_title", "Emergency Types on ${day}")?
        .add_source(config::File::with_name(name).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
