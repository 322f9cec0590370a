pub mod camera;
pub mod color;
pub mod error;
pub mod ingest;
pub mod model;
pub mod pick;
pub mod registry;
pub mod renderer;
pub mod scene;
pub mod select;
pub mod viewer;

use error::SceneError;
use model::Board;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Xlsx,
}

/// Detect format from file extension.
pub fn detect_format(path: &Path) -> Option<DocumentFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("json") => Some(DocumentFormat::Json),
        Some("xlsx") => Some(DocumentFormat::Xlsx),
        _ => None,
    }
}

/// Auto-detect format from extension and parse.
pub fn read_board(path: &Path) -> Result<Board, SceneError> {
    let format = detect_format(path).ok_or_else(|| {
        SceneError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        )
    })?;
    let data = std::fs::read(path)?;
    read_board_bytes(&data, format)
}

/// Parse from bytes with explicit format.
pub fn read_board_bytes(data: &[u8], format: DocumentFormat) -> Result<Board, SceneError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_slice(data)?),
        DocumentFormat::Xlsx => ingest::workbook_to_board(data),
    }
}
