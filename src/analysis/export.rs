//! JSON export for analysis results.

use super::AnalysisResult;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export an analysis result to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_to_json(result: &AnalysisResult, output_path: &Path) -> Result<()> {
    let json = to_pretty_json(result)?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}

pub fn to_pretty_json(result: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize analysis result to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_to_json() {
        let result = AnalysisResult::fallback("decode failed");

        let dir = tempdir().unwrap();
        let path = dir.path().join("backlog.json");

        export_to_json(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"id\": \"idea_"));
        assert!(content.contains("\"total_ideas\": 20"));
        assert!(content.contains("\"ai_analysis_working\": false"));
        assert!(content.contains("\"error\": \"decode failed\""));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let result = AnalysisResult::fallback("x");
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("backlog.json");
        assert!(export_to_json(&result, &path).is_err());
    }
}
