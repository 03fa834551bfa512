//! Modbus register map extraction crate.
//! Responsibilities: parse the SCADA exchange routine of an IEC 61131-3 project into
//! a register map, attach human-readable descriptions, export JSON/XLSX.
//! Non-goals: talking Modbus on the wire, editing the PLC project.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod descriptions;
pub mod application;

pub use domain::{CoverageReport, DataType, MapStatistics, RegisterClass, RegisterMap, RegisterRecord, Section};
pub use application::service::{ExtractOutcome, MapService};
pub use ports::{ExportSummary, MapExporter, RegisterMapSource};
pub use adapters::st::{StSourceConfig, StSourceParser};
pub use adapters::export::{JsonExporter, XlsxExporter};
pub use descriptions::{DescriptionResolver, DescriptionTable};
