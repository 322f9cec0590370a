use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid board document: {0}")]
    DocumentParse(String),

    #[error("required sheet '{0}' not found in workbook")]
    SheetMissing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("workbook error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("workbook XML error: {0}")]
    Xml(#[from] roxmltree::Error),
}
