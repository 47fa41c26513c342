use crate::constants::*;
use crate::errors::{ExportError, ExportResult};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Export configuration with all values filled in (no Options).
///
/// Built once at startup, either from defaults or from a TOML file, and only
/// read afterwards. Keys missing from the file keep their default value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Name the document root element must carry
    pub root_element: String,
    /// Field name that triggers attachment export instead of a single file
    pub attachments_field: String,
    /// Element name of one attachment inside the attachments container
    pub attachment_element: String,
    /// Fields exported for every attachment, in order
    pub attachment_fields: Vec<String>,
    /// Minimum number of digits of record and attachment indices.
    /// Larger indices widen instead of being truncated.
    pub index_width: usize,
    /// Default field lists keyed by first-level element name
    pub profiles: BTreeMap<String, Vec<String>>,
}

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

impl Default for ExportConfig {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(USER_ELEMENT.to_string(), owned(USER_FIELDS));
        profiles.insert(SNIP_ELEMENT.to_string(), owned(SNIP_FIELDS));

        Self {
            root_element: ROOT_ELEMENT.to_string(),
            attachments_field: ATTACHMENTS_FIELD.to_string(),
            attachment_element: ATTACHMENT_ELEMENT.to_string(),
            attachment_fields: owned(ATTACHMENT_FIELDS),
            index_width: INDEX_WIDTH,
            profiles,
        }
    }
}

impl ExportConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read, the TOML is malformed,
    /// unknown keys are present, or [`validate`](Self::validate) fails.
    pub fn from_toml_file(path: &Path) -> ExportResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> ExportResult<Self> {
        let config: ExportConfig = toml::from_str(contents)
            .map_err(|e| ExportError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that names are non-empty and that no field list would make
    /// two output files collide.
    pub fn validate(&self) -> ExportResult<()> {
        if self.index_width == 0 {
            return Err(ExportError::Config(
                "index_width must be greater than 0".into(),
            ));
        }
        for (key, value) in [
            ("root_element", &self.root_element),
            ("attachments_field", &self.attachments_field),
            ("attachment_element", &self.attachment_element),
        ] {
            if value.is_empty() {
                return Err(ExportError::Config(format!("{key} must not be empty")));
            }
        }

        validate_field_list("attachment_fields", &self.attachment_fields)?;
        for (element, fields) in &self.profiles {
            if element.is_empty() {
                return Err(ExportError::Config("profile names must not be empty".into()));
            }
            validate_field_list(&format!("profiles.{element}"), fields)?;
        }
        Ok(())
    }

    /// Default field list for a first-level element, if one is configured.
    pub fn profile(&self, element: &str) -> Option<&[String]> {
        self.profiles.get(element).map(Vec::as_slice)
    }
}

/// Rejects empty lists, empty names, names containing a path separator,
/// names that would collide with attachment files, and duplicates. The
/// message names the offending field.
pub fn check_field_list(fields: &[String]) -> Result<(), String> {
    if fields.is_empty() {
        return Err("no field names given".to_string());
    }
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if field.is_empty() || field.contains('/') || field.contains(std::path::MAIN_SEPARATOR) {
            return Err(format!("invalid field name '{field}'"));
        }
        // <rec>-attachment-<n>-<field> is reserved for attachment files
        if field.starts_with(&format!("{ATTACHMENT_INFIX}-")) {
            return Err(format!(
                "field name '{field}' clashes with attachment file names"
            ));
        }
        if !seen.insert(field.as_str()) {
            return Err(format!("field '{field}' listed twice"));
        }
    }
    Ok(())
}

fn validate_field_list(key: &str, fields: &[String]) -> ExportResult<()> {
    check_field_list(fields).map_err(|msg| ExportError::Config(format!("{key}: {msg}")))
}
