//! HTML rendering of the dashboard page.
//!
//! The page is a static shell. The page model is embedded as JSON and drawn
//! client-side with Plotly (bar charts) and Leaflet (map and heat layer).
//! Dropdown changes call `/api/selection` and redraw the two reactive views.

use crate::domain::view::DashboardPage;

/// Render the full page with the model embedded.
pub fn render_page(page: &DashboardPage) -> Result<String, serde_json::Error> {
    let data = embed_json(page)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dashboard</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
    <style>{css}</style>
</head>
<body>
    <h1 id="page-title"></h1>
    <div id="description" class="description"></div>

    <section>
        <h2>911 Calls by Hour</h2>
        <div id="hourly-chart"></div>
    </section>

    <section>
        <h2>911 Calls by Day of the Week</h2>
        <div id="weekly-chart"></div>
    </section>

    <section class="centered">
        <h2>Filter by Day of the Week</h2>
        <select id="day-filter"></select>
        <div id="filtered-chart"></div>
    </section>

    <section>
        <h2>Top Emergency Types</h2>
        <div id="top-types-chart"></div>
    </section>

    <section>
        <h2>Geospatial Distribution of 911 Calls</h2>
        <div id="map-container"></div>
    </section>

    <script id="dashboard-data" type="application/json">{data}</script>
    <script>{js}</script>
</body>
</html>"#,
        css = INLINE_CSS,
        data = data,
        js = INLINE_JS,
    ))
}

/// JSON that is safe inside a `<script>` element.
fn embed_json(page: &DashboardPage) -> Result<String, serde_json::Error> {
    // `<` only occurs inside JSON strings, where the `\u003c` escape is equivalent
    Ok(serde_json::to_string(page)?.replace('<', "\\u003c"))
}

const INLINE_CSS: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0 auto; max-width: 1200px; padding: 0 16px; }
h1 { text-align: center; }
.description { margin: 20px; font-size: 16px; text-align: center; }
section { margin-bottom: 30px; }
.centered { text-align: center; margin: 20px; }
#day-filter { width: 50%; padding: 6px; font-size: 14px; }
#map-container { width: 100%; }
"#;

const INLINE_JS: &str = r#"
(function () {
    const page = JSON.parse(document.getElementById('dashboard-data').textContent);

    function layoutFor(chart) {
        const layout = {
            title: { text: chart.title },
            xaxis: { title: { text: chart.layout.x_title } },
            yaxis: { title: { text: chart.layout.y_title } },
        };
        if (chart.layout.tick_angle !== null) layout.xaxis.tickangle = chart.layout.tick_angle;
        if (chart.layout.height !== null) layout.height = chart.layout.height;
        if (chart.layout.margin !== null) layout.margin = chart.layout.margin;
        return layout;
    }

    function drawChart(id, chart) {
        Plotly.react(id, [{ type: 'bar', x: chart.x, y: chart.y }], layoutFor(chart));
    }

    document.title = page.title;
    document.getElementById('page-title').textContent = page.title;
    const description = document.getElementById('description');
    page.description.forEach(function (text) {
        const p = document.createElement('p');
        p.textContent = text;
        description.appendChild(p);
    });

    drawChart('hourly-chart', page.hourly);
    drawChart('weekly-chart', page.weekly);
    drawChart('filtered-chart', page.filtered);
    drawChart('top-types-chart', page.top_types);

    const mapDiv = document.getElementById('map-container');
    mapDiv.style.height = page.map.height_px + 'px';
    const center = page.map.center;
    const map = L.map(mapDiv).setView(
        center ? [center.latitude, center.longitude] : [0, 0],
        center ? page.map.zoom : 2
    );
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
        attribution: '&copy; OpenStreetMap contributors',
    }).addTo(map);

    let heat = null;
    function drawHeatmap(layer) {
        if (heat) map.removeLayer(heat);
        const points = layer.points.map(function (p) { return [p.latitude, p.longitude]; });
        heat = L.heatLayer(points, { radius: 15 }).addTo(map);
    }
    drawHeatmap(page.heatmap);

    const select = document.getElementById(page.day_filter.id);
    const placeholder = document.createElement('option');
    placeholder.value = '';
    placeholder.textContent = page.day_filter.placeholder;
    select.appendChild(placeholder);
    page.day_filter.options.forEach(function (opt) {
        const o = document.createElement('option');
        o.value = opt.value;
        o.textContent = opt.label;
        select.appendChild(o);
    });

    // Only the latest selection may draw; earlier requests are aborted.
    let inflight = null;
    let latest = 0;
    select.addEventListener('change', function () {
        if (inflight) inflight.abort();
        const controller = new AbortController();
        const seq = ++latest;
        inflight = controller;
        fetch('/api/selection?day=' + encodeURIComponent(select.value), { signal: controller.signal })
            .then(function (r) { return r.json(); })
            .then(function (patch) {
                if (seq !== latest) return;
                drawChart('filtered-chart', patch.filtered);
                drawHeatmap(patch.heatmap);
            })
            .catch(function (err) {
                if (err.name !== 'AbortError') console.error('selection update failed', err);
            })
            .finally(function () {
                if (inflight === controller) inflight = null;
            });
    });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::aggregator::tests::sample_dataset;
    use crate::application::dashboard_service::build_page;
    use crate::infrastructure::config::{ChartSettings, MapSettings};

    fn page() -> DashboardPage {
        build_page(&sample_dataset(), &MapSettings::default(), &ChartSettings::default())
    }

    #[test]
    fn test_render_page_embeds_model() {
        let html = render_page(&page()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<script id="dashboard-data" type="application/json">"#));
        assert!(html.contains("911 Calls Analysis Dashboard"));
        assert!(html.contains("/api/selection?day="));
    }

    #[test]
    fn test_selection_requests_do_not_overlap() {
        let html = render_page(&page()).unwrap();

        assert!(html.contains("inflight.abort()"));
        assert!(html.contains("signal: controller.signal"));
        assert!(html.contains("if (seq !== latest) return;"));
    }

    #[test]
    fn test_embedded_json_cannot_close_script() {
        let mut page = page();
        page.title = "</script><script>alert(1)</script>".to_string();

        let json = embed_json(&page).unwrap();

        assert!(!json.contains("</script>"));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["title"], "</script><script>alert(1)</script>");
    }
}
