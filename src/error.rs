use std::path::PathBuf;

/// Failures that escape the analysis pipeline.
///
/// Everything else degrades to a fallback inside the pipeline; only input that
/// cannot be read or decoded as an image is reported to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}
