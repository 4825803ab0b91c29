pub mod base;
pub mod csv_sink;
pub mod disk;
pub mod factory;
pub mod xlsx_sink;

pub use base::RecordSink;
pub use csv_sink::{load_csv, CsvSink};
pub use disk::JsonSink;
pub use factory::{create_sink, Storage, StorageType};
pub use xlsx_sink::XlsxSink;
