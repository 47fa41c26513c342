use super::fields::FieldExporter;
use crate::config::{check_field_list, ExportConfig};
use crate::document::{load_document, Document, NodeId};
use crate::errors::{ExportError, ExportResult};
use crate::reporter::Reporter;
use crate::utils::format_duration;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// One export run as requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// XML dump to read
    pub input: PathBuf,
    /// Directory to create and fill; must not exist yet
    pub output_dir: PathBuf,
    /// First-level element name to export (e.g. `snip` or `user`)
    pub element: String,
    /// Field names to export; empty means the element's default profile
    pub fields: Vec<String>,
}

impl ExportRequest {
    /// Field list to export: the explicit one, or the configured profile.
    ///
    /// # Errors
    ///
    /// Returns `Usage` when no fields were given and the element has no
    /// profile, or when the explicit list is invalid.
    pub fn resolve_fields(&self, config: &ExportConfig) -> ExportResult<Vec<String>> {
        if self.fields.is_empty() {
            return config
                .profile(&self.element)
                .map(<[String]>::to_vec)
                .ok_or_else(|| {
                    ExportError::Usage(format!(
                        "cannot extract <{}> element without field names",
                        self.element
                    ))
                });
        }
        check_field_list(&self.fields).map_err(ExportError::Usage)?;
        Ok(self.fields.clone())
    }
}

/// Counters collected over one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Records visited
    pub records: usize,
    /// Attachments visited across all records
    pub attachments: usize,
    /// Field files successfully written
    pub files_written: usize,
    /// Recoverable per-field problems reported
    pub diagnostics: usize,
}

/// Creates the output directory. It must not exist yet.
pub fn prepare_output_dir(path: &Path) -> ExportResult<()> {
    fs::create_dir(path).map_err(|source| ExportError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Exports every `element` record under `root` into `out_dir`.
///
/// Records are visited in document order and numbered from 0. This step
/// never fails: missing fields and unwritable files are reported through
/// `reporter` and skipped. The output directory must already exist.
pub fn export_document(
    document: &Document,
    root: NodeId,
    element: &str,
    fields: &[String],
    out_dir: &Path,
    config: &ExportConfig,
    reporter: &mut Reporter,
) -> ExportSummary {
    let mut exporter = FieldExporter::new(document, config, out_dir, reporter);
    for (index, record) in document.children_named(root, element).enumerate() {
        exporter.export_record(record, index, fields);
    }
    exporter.finish()
}

/// Runs a complete export: load, create the output directory, traverse.
///
/// # Workflow
///
/// 1. Resolves the field list (explicit or the element's profile)
/// 2. Loads the document and checks its root element
/// 3. Creates the output directory
/// 4. Exports every matching record
///
/// Nothing is written to disk before step 3, so a bad request or input
/// leaves no trace.
///
/// # Errors
///
/// Returns the first fatal error: `Usage`, `ReadInput`, `Parse`,
/// `EmptyDocument`, `WrongRoot` or `CreateDir`. Per-field problems are only
/// reported and counted in the returned summary.
pub fn export(
    request: &ExportRequest,
    config: &ExportConfig,
    reporter: &mut Reporter,
) -> ExportResult<ExportSummary> {
    let started = Instant::now();

    let fields = request.resolve_fields(config)?;
    let (document, root) = load_document(&request.input, &config.root_element)?;
    prepare_output_dir(&request.output_dir)?;

    info!(
        input = %request.input.display(),
        output = %request.output_dir.display(),
        element = %request.element,
        fields = fields.len(),
        "Starting export"
    );

    let summary = export_document(
        &document,
        root,
        &request.element,
        &fields,
        &request.output_dir,
        config,
        reporter,
    );

    if summary.records == 0 {
        info!(element = %request.element, "No matching records found");
    }

    info!(
        records = summary.records,
        attachments = summary.attachments,
        files = summary.files_written,
        diagnostics = summary.diagnostics,
        elapsed = %format_duration(started.elapsed()),
        "Export completed"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request(fields: &[&str]) -> ExportRequest {
        ExportRequest {
            input: PathBuf::from("dump.xml"),
            output_dir: PathBuf::from("out"),
            element: "snip".to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_resolve_explicit_fields() {
        let fields = request(&["name", "content"])
            .resolve_fields(&ExportConfig::default())
            .unwrap();
        assert_eq!(fields, vec!["name", "content"]);
    }

    #[test]
    fn test_resolve_default_profile() {
        let config = ExportConfig::default();
        let fields = request(&[]).resolve_fields(&config).unwrap();
        assert_eq!(fields, config.profile("snip").unwrap());
    }

    #[test]
    fn test_resolve_unknown_element_without_fields() {
        let mut req = request(&[]);
        req.element = "label".to_string();
        match req.resolve_fields(&ExportConfig::default()) {
            Err(ExportError::Usage(msg)) => assert!(msg.contains("<label>")),
            other => panic!("Expected Usage, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_rejects_duplicate_fields() {
        let result = request(&["name", "name"]).resolve_fields(&ExportConfig::default());
        assert!(matches!(result, Err(ExportError::Usage(_))));
    }

    #[test]
    fn test_resolve_rejects_attachment_file_names() {
        let result =
            request(&["name", "attachment-0000-name"]).resolve_fields(&ExportConfig::default());
        match result {
            Err(ExportError::Usage(msg)) => assert!(msg.contains("attachment-0000-name")),
            other => panic!("Expected Usage error, got {other:?}"),
        }
    }

    #[test]
    fn test_prepare_output_dir_refuses_existing() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        prepare_output_dir(&out).unwrap();
        assert!(out.is_dir());
        assert!(matches!(
            prepare_output_dir(&out),
            Err(ExportError::CreateDir { .. })
        ));
    }

    #[test]
    fn test_prepare_output_dir_needs_parent() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("a").join("b");
        assert!(prepare_output_dir(&out).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_export_document_numbers_records_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let document = Document::parse(
            b"<snipspace><snip><name>A</name></snip><user/><snip><name>B</name></snip></snipspace>",
        )
        .unwrap();
        let root = document.root_element().unwrap();
        let mut reporter = Reporter::in_memory("snipexport");

        let summary = export_document(
            &document,
            root,
            "snip",
            &["name".to_string()],
            temp_dir.path(),
            &ExportConfig::default(),
            &mut reporter,
        );

        assert_eq!(summary.records, 2);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("0000-name")).unwrap(),
            "A"
        );
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("0001-name")).unwrap(),
            "B"
        );
    }
}
