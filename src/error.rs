use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported file `{}`, expected a .xlsx or .xls workbook", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("can't read the workbook: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("sheet `{0}` not found in the workbook")]
    SheetNotFound(String),

    #[error("the workbook has no sheet")]
    EmptyWorkbook,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
