use anyhow::{anyhow, Result};
use std::path::PathBuf;

use crate::config::OcrConfig;

/// Well-known install locations checked after PATH.
const COMMON_EXECUTABLE_PATHS: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

const COMMON_TESSDATA_DIRS: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
];

/// Returns the per-user directory for a private Tesseract install
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cro-backlog")
        .join("tesseract")
}

/// Finds the Tesseract executable: configured path, private install, PATH, then common paths
pub fn find_tesseract_executable(config: &OcrConfig) -> Result<PathBuf> {
    if let Some(path) = &config.tesseract_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
        crate::log(&format!(
            "Configured tesseract_path {} does not exist, searching elsewhere",
            p.display()
        ));
    }

    let exe_name = if cfg!(windows) { "tesseract.exe" } else { "tesseract" };
    let local_exe = get_tesseract_dir().join(exe_name);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    // Check PATH
    if let Ok(output) = std::process::Command::new("tesseract")
        .arg("--version")
        .output()
    {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for path in COMMON_EXECUTABLE_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!("Tesseract not found. Please install Tesseract-OCR."))
}

/// Finds a tessdata directory containing `<language>.traineddata`.
///
/// Returns `None` when nothing is found; Tesseract then uses its compiled-in default.
pub fn find_tessdata_dir(language: &str) -> Option<PathBuf> {
    let traineddata = format!("{}.traineddata", language);

    let local_tessdata = get_tesseract_dir().join("tessdata");
    if local_tessdata.join(&traineddata).exists() {
        return Some(local_tessdata);
    }

    // TESSDATA_PREFIX may point at the tessdata dir itself or its parent
    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if p.join(&traineddata).exists() {
            return Some(p);
        }
        let p = p.join("tessdata");
        if p.join(&traineddata).exists() {
            return Some(p);
        }
    }

    COMMON_TESSDATA_DIRS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.join(&traineddata).exists())
}
