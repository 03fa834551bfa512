pub mod exporter;
pub mod source;

pub use exporter::{ExportSummary, MapExporter};
pub use source::RegisterMapSource;
