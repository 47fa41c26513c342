//! Common test utilities for integration tests

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Helper function to create a test XML file in a directory
#[allow(dead_code)]
pub fn create_test_xml_file(path: &Path, content: &str) {
    let parent = path.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    fs::File::create(path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
}

/// Sorted file names (not paths) found anywhere under `dir`.
#[allow(dead_code)]
pub fn exported_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Number of directories below `dir` (excluding `dir` itself).
#[allow(dead_code)]
pub fn subdirectory_count(dir: &Path) -> usize {
    WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_dir())
        .count()
}

#[allow(dead_code)]
pub fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[allow(dead_code)]
pub fn path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// Two snips: the first complete with attachments, the second without a
/// `cUser` and with one sparse attachment.
#[allow(dead_code)]
pub const SNIPSPACE_DUMP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<snipspace>
  <user>
    <login>admin</login>
    <email>admin@example.org</email>
  </user>
  <snip>
    <name>Alpha</name>
    <cUser>admin</cUser>
    <content>Welcome to __SnipSnap__ &amp; friends.
Second line.</content>
    <attachments>
      <attachment>
        <name>logo.png</name>
        <content-type>image/png</content-type>
        <size>1024</size>
        <date>1075000000000</date>
        <location>Alpha/logo.png</location>
        <data>iVBORw0KGgo=</data>
      </attachment>
      <attachment>
        <name>notes.txt</name>
        <content-type>text/plain</content-type>
        <size>5</size>
        <date>1075000000001</date>
        <location>Alpha/notes.txt</location>
        <data>aGVsbG8=</data>
      </attachment>
    </attachments>
  </snip>
  <snip>
    <name>Beta</name>
    <content></content>
    <attachments>
      <attachment><name>a.png</name><size>10</size></attachment>
    </attachments>
  </snip>
  <user>
    <login>guest</login>
  </user>
</snipspace>
"#;

/// Dump whose root element is not `snipspace`
#[allow(dead_code)]
pub const WRONG_ROOT_DUMP: &str = r#"<?xml version="1.0"?>
<wiki>
  <snip><name>Alpha</name></snip>
</wiki>"#;
