use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, find_tesseract_executable};
use super::OcrEngine;
use crate::config::OcrConfig;

/// Represents a line of OCR text with confidence score
#[derive(Debug, Clone)]
pub struct OcrLine {
    pub text: String,
    pub words: Vec<OcrWord>,
    pub confidence: f32,
}

/// Represents a single word from OCR with confidence score
#[derive(Debug, Clone)]
pub struct OcrWord {
    pub text: String,
    pub confidence: f32,
}

/// OCR backed by the Tesseract command-line binary.
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Runs Tesseract on the screenshot and returns structured lines.
    pub fn recognize(&self, img: &DynamicImage) -> Result<Vec<OcrLine>> {
        let tesseract_exe = find_tesseract_executable(&self.config)?;

        // Save grayscale image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.to_luma8()
            .save(temp_input.path())
            .context("Failed to write OCR input image")?;

        let mut command = Command::new(&tesseract_exe);
        command
            .arg(temp_input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            .arg("--psm")
            .arg(self.config.page_seg_mode.to_string());
        if let Some(tessdata_dir) = find_tessdata_dir(&self.config.language) {
            command.arg("--tessdata-dir").arg(tessdata_dir);
        }
        // TSV output for structured data
        let output = command.arg("tsv").output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        Ok(parse_tsv_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl OcrEngine for TesseractEngine {
    fn extract_text(&self, img: &DynamicImage) -> Result<String> {
        let lines = self.recognize(img)?;

        if !lines.is_empty() {
            let mean_conf =
                lines.iter().map(|l| l.confidence).sum::<f32>() / lines.len() as f32;
            crate::log(&format!(
                "OCR read {} lines (mean confidence {:.0}%)",
                lines.len(),
                mean_conf
            ));
        }

        Ok(lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Parses Tesseract TSV output into structured OcrLine data.
///
/// Lines are keyed by (block, paragraph, line) so text from separate page
/// regions is never merged into one line.
pub fn parse_tsv_output(tsv: &str) -> Vec<OcrLine> {
    let mut lines: Vec<OcrLine> = Vec::new();
    let mut current_key: Option<(i32, i32, i32)> = None;
    let mut current_words: Vec<OcrWord> = Vec::new();

    for line in tsv.lines().skip(1) {
        // Skip header
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let level: i32 = fields[0].parse().unwrap_or(-1);
        let key = (
            fields[2].parse().unwrap_or(-1),
            fields[3].parse().unwrap_or(-1),
            fields[4].parse().unwrap_or(-1),
        );
        let conf: f32 = fields[10].trim().parse().unwrap_or(-1.0);
        let text = fields[11].trim();

        // Level 5 = word
        if level != 5 || text.is_empty() || conf < 0.0 {
            continue;
        }

        if current_key != Some(key) {
            flush_line(&mut lines, std::mem::take(&mut current_words));
            current_key = Some(key);
        }

        current_words.push(OcrWord {
            text: text.to_string(),
            confidence: conf,
        });
    }

    flush_line(&mut lines, current_words);
    lines
}

fn flush_line(lines: &mut Vec<OcrLine>, words: Vec<OcrWord>) {
    if words.is_empty() {
        return;
    }
    let confidence = words.iter().map(|w| w.confidence).sum::<f32>() / words.len() as f32;
    let text = words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(OcrLine {
        text,
        words,
        confidence,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn word(block: u32, line: u32, conf: &str, text: &str) -> String {
        format!("5\t1\t{block}\t1\t{line}\t1\t0\t0\t10\t10\t{conf}\t{text}")
    }

    #[test]
    fn test_parse_tsv_groups_words_into_lines() {
        let tsv = [
            HEADER.to_string(),
            "4\t1\t1\t1\t1\t0\t0\t0\t100\t10\t-1\t".to_string(),
            word(1, 1, "96.5", "Calm"),
            word(1, 1, "91.0", "your"),
            word(1, 1, "90.5", "mind."),
            word(1, 2, "88", "Try"),
            word(1, 2, "86", "free"),
        ]
        .join("\n");

        let lines = parse_tsv_output(&tsv);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Calm your mind.");
        assert_eq!(lines[0].words.len(), 3);
        assert!((lines[0].confidence - 92.666).abs() < 0.01);
        assert_eq!(lines[1].text, "Try free");
    }

    #[test]
    fn test_parse_tsv_separates_blocks_with_same_line_number() {
        let tsv = [HEADER.to_string(), word(1, 1, "90", "Pricing"), word(2, 1, "90", "Login")]
            .join("\n");

        let lines = parse_tsv_output(&tsv);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "Login");
    }

    #[test]
    fn test_parse_tsv_skips_unrecognized_words() {
        let tsv = [
            HEADER.to_string(),
            word(1, 1, "-1", "noise"),
            word(1, 1, "70", "   "),
            "garbage line".to_string(),
        ]
        .join("\n");

        assert!(parse_tsv_output(&tsv).is_empty());
    }
}
