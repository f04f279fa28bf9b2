//! Result-set export

pub mod excel;

pub use excel::{default_export_filename, export_to_excel};
