use thiserror::Error;

/// Structured failures raised while turning a source file into an
/// [`InventoryTable`](super::model::InventoryTable).
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Sheet '{0}' is empty")]
    EmptySheet(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),
}
