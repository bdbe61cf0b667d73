//! Startup logging: warnings raised while loading the config reach the log
//! file that is attached afterwards.

use gitops_console::config::{ConsoleConfig, CONFIG_FILE, DATA_DIR_ENV, LOG_DIR};
use gitops_console::logging;
use serial_test::serial;
use tempfile::TempDir;

fn read_logs(dir: &TempDir) -> String {
    let mut content = String::new();
    for entry in std::fs::read_dir(dir.path().join(LOG_DIR)).unwrap() {
        let path = entry.unwrap().path();
        content.push_str(&std::fs::read_to_string(path).unwrap());
    }
    content
}

#[test]
#[serial]
fn test_config_warning_is_logged_after_file_attach() {
    let dir = TempDir::new().unwrap();
    std::env::set_var(DATA_DIR_ENV, dir.path());
    std::fs::write(dir.path().join(CONFIG_FILE), "page_size = \"many\"").unwrap();

    let (subscriber, file_log) = logging::subscriber();
    let config = tracing::subscriber::with_default(subscriber, || {
        let guard = file_log.attach(dir.path()).unwrap();
        let config = ConsoleConfig::load_or_default();
        drop(guard);
        config
    });
    std::env::remove_var(DATA_DIR_ENV);

    assert_eq!(config, ConsoleConfig::default());
    let logs = read_logs(&dir);
    assert!(logs.contains("Failed to load config, using defaults"), "{}", logs);
}

#[test]
#[serial]
fn test_sanitized_page_size_is_logged() {
    let dir = TempDir::new().unwrap();
    std::env::set_var(DATA_DIR_ENV, dir.path());
    std::fs::write(dir.path().join(CONFIG_FILE), "page_size = 0\n").unwrap();

    let (subscriber, file_log) = logging::subscriber();
    let config = tracing::subscriber::with_default(subscriber, || {
        let guard = file_log.attach(dir.path()).unwrap();
        let config = ConsoleConfig::load_or_default();
        drop(guard);
        config
    });
    std::env::remove_var(DATA_DIR_ENV);

    assert_eq!(config.page_size, gitops_console::config::DEFAULT_PAGE_SIZE);
    assert!(read_logs(&dir).contains("page_size of 0 in config"));
}
