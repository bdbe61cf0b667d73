//! # Gitops Console
//!
//! Admin dashboard for a gitops-managed data pipeline platform. It lists
//! dashboard entries and gitops targets in paginated tables and renders
//! pipeline topologies as flow graphs.
//!
//! ## Architecture
//!
//! - **Topology**: Pure transforms from pipeline nodes to positioned flow nodes and edges
//! - **Table**: Sorting, filtering, selection, expansion and pagination over a collection
//! - **Backend**: A worker thread serving fetches and mutations against a [`backend::ConsoleApi`]
//! - **Frontend**: eframe/egui pages that read a query cache and emit actions
//! - **Communication**: Crossbeam channels between the UI and the worker
//!
//! ## Configuration
//!
//! Console settings and the active MQTT profile are stored in the
//! platform-appropriate data directory under `dev.gitops-console`:
//!
//! - **Linux**: `~/.local/share/dev.gitops-console/`
//! - **macOS**: `~/Library/Application Support/dev.gitops-console/`
//! - **Windows**: `%APPDATA%\dev.gitops-console\`
//!
//! ## Example
//!
//! ```
//! use gitops_console::topology::{
//!     transform_topology_to_flow_edges, transform_topology_to_flow_nodes,
//! };
//! use gitops_console::types::PipelineNode;
//!
//! let topology = vec![
//!     PipelineNode::new("ingest", "mqtt-in").with_wires([["store"]]),
//!     PipelineNode::new("store", "db-out"),
//! ];
//!
//! let nodes = transform_topology_to_flow_nodes(&topology);
//! let edges = transform_topology_to_flow_edges(&topology);
//!
//! assert_eq!(nodes[1].position.y, 300.0);
//! assert_eq!(edges[0].id, "ingest-store");
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod forms;
pub mod frontend;
pub mod logging;
pub mod profile;
pub mod table;
pub mod topology;
pub mod types;

// Re-export commonly used types
pub use backend::{spawn_backend, ApiBridge, BackendCommand, BackendMessage, ConsoleApi};
pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use frontend::ConsoleApp;
pub use table::TableController;
