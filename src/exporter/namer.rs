use crate::constants::ATTACHMENT_INFIX;
use std::path::{Path, PathBuf};

/// Maps record/attachment indices and field names to output file paths.
///
/// All files live flat in the output directory:
///
/// ```text
/// <dir>/<record>-<field>
/// <dir>/<record>-attachment-<attachment>-<field>
/// ```
///
/// Indices are zero-padded to `width` digits and simply grow wider once they
/// no longer fit, so names stay unique for any number of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputNamer {
    width: usize,
}

impl OutputNamer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn index(&self, n: usize) -> String {
        format!("{n:0width$}", width = self.width)
    }

    /// Base name shared by every file of a record.
    pub fn record_base(&self, record: usize) -> String {
        self.index(record)
    }

    /// Base name shared by every file of one attachment of a record.
    pub fn attachment_base(&self, record: usize, attachment: usize) -> String {
        format!(
            "{}-{ATTACHMENT_INFIX}-{}",
            self.index(record),
            self.index(attachment)
        )
    }

    pub fn field_path(&self, dir: &Path, base: &str, field: &str) -> PathBuf {
        dir.join(format!("{base}-{field}"))
    }

    pub fn record_field_path(&self, dir: &Path, record: usize, field: &str) -> PathBuf {
        self.field_path(dir, &self.record_base(record), field)
    }

    pub fn attachment_field_path(
        &self,
        dir: &Path,
        record: usize,
        attachment: usize,
        field: &str,
    ) -> PathBuf {
        self.field_path(dir, &self.attachment_base(record, attachment), field)
    }
}
