pub mod model;
pub mod stats;

pub use model::{DataType, RegisterClass, RegisterMap, RegisterRecord, Section};
pub use stats::{CoverageReport, MapStatistics, SectionCount};
