pub mod csv;

pub use self::csv::{write_dataset_csv, write_dataset_csv_path};
