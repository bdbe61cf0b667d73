//! Gitops Console - Main Entry Point
//!
//! Admin dashboard for pipeline topologies, dashboard entries and gitops
//! targets.

use anyhow::Context as _;
use gitops_console::{
    backend::{spawn_backend, InMemoryApi},
    config::{app_data_dir, ConsoleConfig},
    frontend::ConsoleApp,
    logging,
    profile::{ActiveProfile, FileProfileStore, MemoryProfileStore, ProfileStore},
};

fn main() -> anyhow::Result<()> {
    // Logging comes first so config warnings are visible
    let file_log = logging::init();
    let config = ConsoleConfig::load_or_default();

    // The guard flushes the file writer on drop
    let _log_guard = match app_data_dir().filter(|_| config.log_to_file) {
        Some(dir) => match file_log.attach(&dir) {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::warn!("Logging to console only: {}", e);
                None
            }
        },
        None => None,
    };

    tracing::info!("Starting Gitops Console");

    let (bridge, backend_handle) = spawn_backend(InMemoryApi::seeded())?;

    let store: Box<dyn ProfileStore> = match FileProfileStore::in_app_data_dir() {
        Ok(store) => {
            tracing::debug!("Active profile stored at {:?}", store.path());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("Profile selection will not persist: {}", e);
            Box::new(MemoryProfileStore::new())
        }
    };
    let active_profile = ActiveProfile::new(store);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gitops Console"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Gitops Console",
        native_options,
        Box::new(|cc| Ok(Box::new(ConsoleApp::new(cc, bridge, config, active_profile)))),
    );

    tracing::info!("Shutting down...");
    if backend_handle.join().is_err() {
        tracing::error!("Backend worker panicked");
    }

    result
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("UI event loop failed")
}
