//! Logging configuration.
//!
//! The subscriber itself is installed by the host binary; this module only
//! carries the serializable configuration and the log-directory helpers.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name prefix for log files
const LOG_PREFIX: &str = "halo-";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error"
    pub level: String,
    /// Mirror logs to stderr
    pub console_output: bool,
    /// Write logs to a file in the log directory
    pub file_output: bool,
    /// Log directory override; defaults to the platform data dir
    pub log_dir: Option<PathBuf>,
    /// Number of log files kept by cleanup
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            log_dir: None,
            max_log_files: 5,
        }
    }
}

impl LogConfig {
    /// Parse the configured level, defaulting to INFO when invalid
    pub fn parse_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }

    /// Directory log files are written to
    pub fn log_directory(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("halo")
                .join("logs")
        })
    }

    /// Create the log directory if it does not exist
    pub fn ensure_log_directory(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.log_directory())
    }

    /// Path of the log file for this session
    pub fn current_log_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        self.log_directory().join(format!("{LOG_PREFIX}{stamp}.log"))
    }

    /// Delete the oldest log files beyond `max_log_files`
    pub fn cleanup_old_logs(&self) -> std::io::Result<()> {
        let dir = self.log_directory();
        if !dir.exists() {
            return Ok(());
        }
        let mut logs: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(LOG_PREFIX) && n.ends_with(".log"))
                    .unwrap_or(false)
            })
            .collect();
        // timestamped names sort chronologically
        logs.sort();
        if logs.len() > self.max_log_files {
            let excess = logs.len() - self.max_log_files;
            for old in &logs[..excess] {
                std::fs::remove_file(old)?;
            }
        }
        Ok(())
    }
}
