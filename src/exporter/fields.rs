use super::namer::OutputNamer;
use super::records::ExportSummary;
use crate::config::ExportConfig;
use crate::document::{Document, NodeId};
use crate::errors::{ExportError, ExportResult};
use crate::reporter::Reporter;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes `text` verbatim to a freshly created file at `path`.
///
/// The file is closed before returning, so no handle outlives one field.
pub fn write_field(path: &Path, text: &str) -> ExportResult<()> {
    let mut file = File::create(path).map_err(|source| ExportError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(text.as_bytes())
        .map_err(|source| ExportError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// Exports the fields of records and attachments into one flat directory.
///
/// Every failure handled here is recoverable: it is reported, counted in the
/// summary, and the export moves on to the next field.
pub struct FieldExporter<'a> {
    document: &'a Document,
    config: &'a ExportConfig,
    out_dir: &'a Path,
    namer: OutputNamer,
    reporter: &'a mut Reporter,
    summary: ExportSummary,
}

impl<'a> FieldExporter<'a> {
    pub fn new(
        document: &'a Document,
        config: &'a ExportConfig,
        out_dir: &'a Path,
        reporter: &'a mut Reporter,
    ) -> Self {
        Self {
            document,
            config,
            out_dir,
            namer: OutputNamer::new(config.index_width),
            reporter,
            summary: ExportSummary::default(),
        }
    }

    /// Exports the requested `fields` of the record with the given index.
    ///
    /// The attachments field name expands into the record's attachments;
    /// every other name is written as a single file.
    pub fn export_record(&mut self, record: NodeId, index: usize, fields: &[String]) {
        let base = self.namer.record_base(index);
        debug!(record = %base, element = self.document.name(record), "Exporting record");

        for field in fields {
            if *field == self.config.attachments_field {
                self.export_attachments(record, index);
            } else {
                self.export_field(record, &base, field);
            }
        }
        self.summary.records += 1;
    }

    /// Writes `<dir>/<base>-<field>` from the first `field` child of `node`.
    pub fn export_field(&mut self, node: NodeId, base: &str, field: &str) {
        match self.write_child(node, base, field) {
            Ok(path) => {
                self.summary.files_written += 1;
                debug!(path = %path.display(), "Field exported");
            }
            Err(err) => {
                self.summary.diagnostics += 1;
                self.reporter.report(&err);
            }
        }
    }

    /// Exports every attachment of a record, each with the full attachment
    /// field list.
    pub fn export_attachments(&mut self, record: NodeId, index: usize) {
        let document = self.document;
        let config = self.config;

        let container = match document.first_child_named(record, &config.attachments_field) {
            Some(container) => container,
            None => {
                let err = self.missing(record, &self.namer.record_base(index), &config.attachments_field);
                self.summary.diagnostics += 1;
                self.reporter.report(&err);
                return;
            }
        };

        for (position, attachment) in document
            .children_named(container, &config.attachment_element)
            .enumerate()
        {
            let base = self.namer.attachment_base(index, position);
            debug!(attachment = %base, "Exporting attachment");
            for field in &config.attachment_fields {
                self.export_field(attachment, &base, field);
            }
            self.summary.attachments += 1;
        }
    }

    pub fn finish(self) -> ExportSummary {
        self.summary
    }

    fn write_child(&self, node: NodeId, base: &str, field: &str) -> ExportResult<PathBuf> {
        let child = self
            .document
            .first_child_named(node, field)
            .ok_or_else(|| self.missing(node, base, field))?;
        let path = self.namer.field_path(self.out_dir, base, field);
        write_field(&path, &self.document.text_content(child))?;
        Ok(path)
    }

    fn missing(&self, node: NodeId, base: &str, field: &str) -> ExportError {
        ExportError::MissingField {
            location: self.out_dir.join(base),
            field: field.to_string(),
            parent: self.document.name(node).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DUMP: &[u8] = br#"<snipspace>
  <snip>
    <name>Alpha</name>
    <content>  line one
line &amp; two  </content>
    <attachments>
      <attachment><name>a.png</name><size>10</size></attachment>
      <attachment>
        <name>b.txt</name><content-type>text/plain</content-type><size>3</size>
        <date>2004-01-01</date><location>b.txt</location><data>YWJj</data>
      </attachment>
    </attachments>
  </snip>
  <snip><name>Beta</name><attachments/></snip>
</snipspace>"#;

    fn fixture() -> (Document, Vec<NodeId>) {
        let document = Document::parse(DUMP).unwrap();
        let root = document.root_element().unwrap();
        let snips = document.children_named(root, "snip").collect();
        (document, snips)
    }

    #[test]
    fn test_write_field_is_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("0000-content");
        write_field(&path, "  keep\n spacing ").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "  keep\n spacing ");
    }

    #[test]
    fn test_write_field_reports_open_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing-dir").join("0000-name");
        match write_field(&path, "x") {
            Err(ExportError::OpenFile { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected OpenFile, got {other:?}"),
        }
    }

    #[test]
    fn test_export_record_fields() {
        let temp_dir = TempDir::new().unwrap();
        let (document, snips) = fixture();
        let config = ExportConfig::default();
        let mut reporter = Reporter::in_memory("snipexport");

        let mut exporter = FieldExporter::new(&document, &config, temp_dir.path(), &mut reporter);
        exporter.export_record(snips[0], 0, &["name".to_string(), "content".to_string()]);
        let summary = exporter.finish();

        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.diagnostics, 0);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("0000-name")).unwrap(),
            "Alpha"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("0000-content")).unwrap(),
            "  line one\nline & two  "
        );
        assert!(reporter.lines().is_empty());
    }

    #[test]
    fn test_missing_field_creates_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let (document, snips) = fixture();
        let config = ExportConfig::default();
        let mut reporter = Reporter::in_memory("snipexport");

        let mut exporter = FieldExporter::new(&document, &config, temp_dir.path(), &mut reporter);
        exporter.export_record(snips[1], 1, &["cUser".to_string(), "name".to_string()]);
        let summary = exporter.finish();

        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.diagnostics, 1);
        assert!(!temp_dir.path().join("0001-cUser").exists());
        assert!(temp_dir.path().join("0001-name").exists());

        let expected = format!(
            "snipexport: file {}: no element <cUser> in <snip>",
            temp_dir.path().join("0001").display()
        );
        assert_eq!(reporter.lines(), &[expected]);
    }

    #[test]
    fn test_export_attachments() {
        let temp_dir = TempDir::new().unwrap();
        let (document, snips) = fixture();
        let config = ExportConfig::default();
        let mut reporter = Reporter::in_memory("snipexport");

        let mut exporter = FieldExporter::new(&document, &config, temp_dir.path(), &mut reporter);
        exporter.export_record(snips[0], 0, &["attachments".to_string()]);
        let summary = exporter.finish();

        assert_eq!(summary.attachments, 2);
        // first attachment has 2 of 6 fields, second has all 6
        assert_eq!(summary.files_written, 8);
        assert_eq!(summary.diagnostics, 4);
        assert!(!temp_dir.path().join("0000-attachments").exists());

        let dir = temp_dir.path();
        assert_eq!(
            fs::read_to_string(dir.join("0000-attachment-0000-name")).unwrap(),
            "a.png"
        );
        assert_eq!(
            fs::read_to_string(dir.join("0000-attachment-0000-size")).unwrap(),
            "10"
        );
        assert!(!dir.join("0000-attachment-0000-data").exists());
        assert_eq!(
            fs::read_to_string(dir.join("0000-attachment-0001-content-type")).unwrap(),
            "text/plain"
        );
        assert_eq!(
            fs::read_to_string(dir.join("0000-attachment-0001-data")).unwrap(),
            "YWJj"
        );

        for line in reporter.lines() {
            assert!(line.contains("in <attachment>"), "unexpected diagnostic: {line}");
        }
    }

    #[test]
    fn test_empty_attachments_container_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let (document, snips) = fixture();
        let config = ExportConfig::default();
        let mut reporter = Reporter::in_memory("snipexport");

        let mut exporter = FieldExporter::new(&document, &config, temp_dir.path(), &mut reporter);
        exporter.export_record(snips[1], 1, &["attachments".to_string()]);
        let summary = exporter.finish();

        assert_eq!(summary.attachments, 0);
        assert_eq!(summary.files_written, 0);
        assert_eq!(reporter.count(), 0);
    }

    #[test]
    fn test_missing_attachments_container_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let document =
            Document::parse(b"<snipspace><snip><name>Solo</name></snip></snipspace>").unwrap();
        let root = document.root_element().unwrap();
        let snip = document.first_child_named(root, "snip").unwrap();
        let config = ExportConfig::default();
        let mut reporter = Reporter::in_memory("snipexport");

        let mut exporter = FieldExporter::new(&document, &config, temp_dir.path(), &mut reporter);
        exporter.export_attachments(snip, 0);
        let summary = exporter.finish();

        assert_eq!(summary.diagnostics, 1);
        assert!(reporter.lines()[0].ends_with("no element <attachments> in <snip>"));
    }
}
