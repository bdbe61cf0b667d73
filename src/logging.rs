//! Tracing setup.
//!
//! The console layer is installed before anything else runs so startup
//! warnings (a malformed config, for one) are not lost. The daily log file
//! lives in the data directory and is only known once the config is loaded,
//! so it is attached afterwards through a reload handle.

use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LOG_DIR;
use crate::error::{ConsoleError, Result};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,gitops_console=debug";

/// Prefix of the daily rolling log files.
pub const LOG_FILE_PREFIX: &str = "gitops-console.log";

type FileLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Attaches the log file once its location is known.
pub struct FileLogHandle {
    handle: reload::Handle<Option<FileLayer>, Registry>,
}

impl FileLogHandle {
    /// Start writing logs to a daily file under `data_dir/logs`.
    ///
    /// Keep the returned guard alive; dropping it flushes the writer.
    pub fn attach(&self, data_dir: &Path) -> Result<WorkerGuard> {
        let appender = tracing_appender::rolling::daily(data_dir.join(LOG_DIR), LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer: FileLayer = fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .boxed();
        self.handle
            .reload(Some(layer))
            .map_err(|e| ConsoleError::Config(format!("Failed to attach log file: {}", e)))?;
        tracing::debug!("Logging to {:?}", data_dir.join(LOG_DIR));
        Ok(guard)
    }
}

/// Build the subscriber: env filter, console output and an empty file slot.
pub fn subscriber() -> (impl Subscriber + Send + Sync + 'static, FileLogHandle) {
    let (file_layer, handle) = reload::Layer::new(None::<FileLayer>);
    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(fmt::layer());
    (subscriber, FileLogHandle { handle })
}

/// Install [`subscriber`] as the global default.
pub fn init() -> FileLogHandle {
    let (subscriber, handle) = subscriber();
    subscriber.init();
    handle
}
