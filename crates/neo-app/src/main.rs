//! NEO dashboard entry point

use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;

use neo_data::{ApiConfig, ConnectivityMonitor, HttpNeoSource, QueryCache, QueryClient};

mod app;
mod refetch;

use app::{AppServices, NeoDashboardApp};

fn main() -> Result<()> {
    #[cfg(all(windows, not(debug_assertions)))]
    hide_console_window();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env().context("Invalid backend configuration")?;
    let endpoint = config.endpoint_url()?;
    info!(%endpoint, cache_ttl = ?config.cache_ttl, "Starting NEO dashboard");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let source = HttpNeoSource::new(&endpoint, config.request_timeout)
        .context("Failed to create HTTP client")?;
    let connectivity = ConnectivityMonitor::new(config.probe_address()?);
    let client = QueryClient::new(
        Arc::new(source),
        runtime.handle().clone(),
        QueryCache::new(config.cache_ttl),
    )
    .with_connectivity(connectivity.clone());

    let services = AppServices {
        runtime,
        client,
        connectivity,
        probe_interval: config.probe_interval,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "NASA Near-Earth Objects",
        options,
        Box::new(|cc| Box::new(NeoDashboardApp::new(cc, services))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

// Windows-specific: Hide console window in release builds
#[cfg(all(windows, not(debug_assertions)))]
fn hide_console_window() {
    use winapi::um::wincon::GetConsoleWindow;
    use winapi::um::winuser::{ShowWindow, SW_HIDE};

    unsafe {
        let window = GetConsoleWindow();
        if !window.is_null() {
            ShowWindow(window, SW_HIDE);
        }
    }
}
