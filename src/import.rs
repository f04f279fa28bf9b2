//! Upload sheet loader
//!
//! The import endpoint takes the spreadsheet exactly as the operator
//! exported it from the scale system: a header row plus data rows, cells
//! as text. This loader reads a tabular CSV file into that shape; legacy
//! files from the scale PCs are Big5-encoded, so non-UTF-8 input falls
//! back to a Big5 decode.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::BIG5;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse file: {0}")]
    Csv(#[from] csv::Error),

    #[error("File has no header row")]
    Empty,

    #[error("File has a header but no data rows")]
    NoDataRows,
}

/// Parsed upload file: one header row plus the data rows beneath it
#[derive(Debug, Clone)]
pub struct UploadSheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl UploadSheet {
    pub fn data_row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows in wire order: header first, then data. This is the `data`
    /// payload of the import action.
    pub fn wire_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(self.header.clone());
        rows.extend(self.rows.iter().cloned());
        rows
    }
}

/// Load an upload sheet from a tabular file
pub fn load_upload_sheet<P: AsRef<Path>>(path: P) -> Result<UploadSheet, SheetError> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    parse_upload_sheet(&bytes)
}

fn parse_upload_sheet(bytes: &[u8]) -> Result<UploadSheet, SheetError> {
    let decoded = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, had_errors) = BIG5.decode(bytes);
            if had_errors {
                eprintln!("Warning: Some characters could not be decoded from Big5");
            }
            decoded.into_owned()
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(decoded.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    if rows.is_empty() {
        return Err(SheetError::Empty);
    }
    let header = rows.remove(0);
    if rows.is_empty() {
        return Err(SheetError::NoDataRows);
    }

    Ok(UploadSheet { header, rows })
}
