mod fields;
mod namer;
mod records;

// Re-export public API
pub use fields::{write_field, FieldExporter};
pub use namer::OutputNamer;
pub use records::{export, export_document, prepare_output_dir, ExportRequest, ExportSummary};
