pub mod error;
pub mod export;
pub mod read;
pub mod write;

pub use error::{CsvError, Result};
pub use export::{export_run, output_file_name, ExportReport, ExportedFile, OutputKind};
pub use read::{read_table, read_table_path};
pub use write::{write_exclusive, write_matched, EXCLUSIVE_COLUMNS, MATCHED_COLUMNS};
