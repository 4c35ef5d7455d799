use thiserror::Error;

/// Errors raised while reading contacts out of a roster workbook.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("header '{label}' not found in column {column}")]
    HeaderNotFound { label: String, column: String },

    #[error("invalid column label '{label}'")]
    InvalidColumnLabel { label: String },

    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("workbook has no sheets")]
    EmptyWorkbook,

    #[error("{0}")]
    Workbook(#[from] calamine::Error),
}
