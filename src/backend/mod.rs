//! Backend access for the console
//!
//! All backend traffic runs on a dedicated worker thread so the UI never
//! blocks on a request. The UI and worker talk through bounded crossbeam
//! channels.
//!
//! # Architecture
//!
//! - [`ConsoleApi`] - The operations the backend offers (list/create/update/delete)
//! - [`InMemoryApi`] - Deterministic in-process implementation for demos and tests
//! - [`BackendCommand`] - Messages sent from UI to worker (fetch, mutate, shutdown)
//! - [`BackendMessage`] - Messages sent from worker to UI (loaded data, mutation results)
//! - [`ApiBridge`] - UI-side handle for sending commands and receiving messages
//! - [`BackendWorker`] - Worker loop serving commands in order
//!
//! # Example
//!
//! ```no_run
//! use gitops_console::backend::{spawn_backend, BackendMessage, InMemoryApi, QueryKey};
//!
//! let (bridge, handle) = spawn_backend(InMemoryApi::seeded()).unwrap();
//! bridge.fetch(QueryKey::DashboardEntries);
//!
//! for msg in bridge.drain() {
//!     if let BackendMessage::Loaded(data) = msg {
//!         println!("loaded {}", data.key());
//!     }
//! }
//!
//! bridge.shutdown();
//! handle.join().unwrap();
//! ```

pub mod api;
pub mod bridge;
pub mod memory;
pub mod worker;

use std::thread::JoinHandle;

pub use api::ConsoleApi;
pub use bridge::{
    ApiBridge, BackendCommand, BackendMessage, Mutation, MutationKind, QueryData, QueryKey,
    TopologySnapshot,
};
pub use memory::InMemoryApi;
pub use worker::BackendWorker;

use crate::error::{Result, ResultExt};

/// Spawn a worker thread serving `api` and return the UI-side bridge.
pub fn spawn_backend<A>(api: A) -> Result<(ApiBridge, JoinHandle<()>)>
where
    A: ConsoleApi + 'static,
{
    let (bridge, cmd_rx, msg_tx) = ApiBridge::new();
    let worker = BackendWorker::new(api, cmd_rx, msg_tx);
    let handle = std::thread::Builder::new()
        .name("backend-worker".into())
        .spawn(move || worker.run())
        .context("Failed to spawn backend worker thread")?;
    Ok((bridge, handle))
}
