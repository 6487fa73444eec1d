// Selection service - Recomputes the reactive views for a day selection
use crate::application::aggregator::{day_labels, filter_by_day, top_call_types};
use crate::application::view_builder::{filtered_chart, heatmap_layer};
use crate::domain::call_record::Dataset;
use crate::domain::selection::{Selection, SelectionEvent, SessionContext};
use crate::domain::view::{StreamMessage, ViewPatch};
use crate::infrastructure::config::ChartSettings;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct SelectionService {
    dataset: Arc<Dataset>,
    known_days: Arc<Vec<String>>,
    charts: ChartSettings,
}

impl SelectionService {
    pub fn new(dataset: Arc<Dataset>, charts: ChartSettings) -> Self {
        let known_days = Arc::new(day_labels(&dataset));
        Self {
            dataset,
            known_days,
            charts,
        }
    }

    /// Apply a dropdown event to the session and return the new views.
    pub fn handle(&self, ctx: &mut SessionContext, event: SelectionEvent) -> ViewPatch {
        ctx.selection = ctx.selection.apply(event, &self.known_days);
        build_patch(&self.dataset, &ctx.selection, &self.charts)
    }

    /// Same updates as [`handle`](Self::handle), delivered one message at a time.
    pub fn stream(&self, ctx: &mut SessionContext, event: SelectionEvent) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(8);
        let start_time = Instant::now();

        ctx.selection = ctx.selection.apply(event, &self.known_days);
        let selection = ctx.selection.clone();
        let dataset = self.dataset.clone();
        let charts = self.charts.clone();

        tokio::spawn(async move {
            let patch = build_patch(&dataset, &selection, &charts);
            let updates = [
                StreamMessage::Selection { day: patch.selection },
                StreamMessage::ChartUpdate { chart: patch.filtered },
                StreamMessage::HeatmapUpdate { layer: patch.heatmap },
            ];
            // the selection echo is not a view update
            let total = updates.len() - 1;
            for msg in updates {
                if tx.send(msg).await.is_err() {
                    tracing::debug!("Selection stream closed by client");
                    return;
                }
            }

            let duration_ms = start_time.elapsed().as_millis() as u64;
            let _ = tx
                .send(StreamMessage::Complete {
                    updates: total,
                    duration_ms,
                })
                .await;
        });

        rx
    }
}

/// Both reactive outputs for a selection, computed over the same subset.
pub fn build_patch(dataset: &Dataset, selection: &Selection, charts: &ChartSettings) -> ViewPatch {
    let subset = filter_by_day(dataset, selection);
    tracing::debug!(
        "Selection {:?} matched {} of {} records",
        selection.day(),
        subset.len(),
        dataset.len()
    );

    ViewPatch {
        selection: selection.day().map(str::to_string),
        filtered: filtered_chart(
            top_call_types(&subset, charts.top_k),
            day_title(selection, charts),
        ),
        heatmap: heatmap_layer(&subset),
    }
}

fn day_title(selection: &Selection, charts: &ChartSettings) -> Option<String> {
    selection
        .day()
        .map(|day| charts.filtered_title.replace("${day}", day))
}
