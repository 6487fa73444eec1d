// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::call_repository::CallRepository;
use crate::application::dashboard_service::DashboardService;
use crate::application::selection_service::SelectionService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::csv_repository::CsvCallRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Load the dataset once (infrastructure layer)
    let repository = CsvCallRepository::new(
        &config.dataset.path,
        config.dataset.max_rows,
        config.dataset.row_policy,
    );
    let (dataset, report) = repository
        .load_dataset()
        .await
        .with_context(|| format!("failed to load {}", config.dataset.path))?;
    if report.rows_dropped > 0 {
        tracing::warn!(
            "Dropped {} of {} rows with an unparsable INCIDENT_DATE",
            report.rows_dropped,
            report.rows_read
        );
    }
    tracing::info!(
        "Loaded {} call records from {} (coordinates: {})",
        dataset.len(),
        config.dataset.path,
        dataset.has_coordinates()
    );
    if dataset.is_empty() {
        tracing::warn!("No call records loaded; every chart will be empty");
    }
    let dataset = Arc::new(dataset);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(&dataset, &config.map, &config.charts);
    let selection_service = SelectionService::new(dataset, config.charts.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        selection_service,
    });

    // Build router (presentation layer)
    let router = router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting calls-dashboard on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
