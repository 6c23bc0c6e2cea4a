//! CRO Backlog Generator
//!
//! Turns a landing page screenshot into a ranked backlog of conversion-rate
//! optimization ideas, each scored with ICE (Impact, Confidence, Effort).
//!
//! The pipeline runs synchronously:
//! image → visual elements + OCR text → page description → ideas → ICE scores → summary.
//! Every stage degrades to a deterministic fallback, so a decodable image always
//! yields a 20-idea backlog.

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod ocr;
pub mod paths;
pub mod vision;

pub use analysis::{AnalysisResult, Analyzer};
pub use config::AnalyzerConfig;
pub use error::AnalyzeError;

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Logs a message to stderr and, when the logs directory exists, to the log file.
///
/// stdout is left alone so the CLI can stream JSON there.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);
    let log_path = paths::get_logs_dir().join("cro_backlog.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}
