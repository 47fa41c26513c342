//! General entity resolution
//!
//! Handles:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//! - Internal entities declared in the DOCTYPE subset: <!ENTITY name "value">
//!
//! External (SYSTEM/PUBLIC) and parameter entities are not loaded.

use quick_xml::escape::resolve_predefined_entity;
use std::collections::HashMap;

/// Nesting limit when an entity value references other entities.
const MAX_EXPANSION_DEPTH: usize = 16;

/// Internal general entities declared by the document.
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    declared: HashMap<String, String>,
}

impl EntityTable {
    /// Collects `<!ENTITY name "value">` declarations from DOCTYPE content.
    ///
    /// The first declaration of a name wins, as in XML 1.0.
    pub fn from_doctype(doctype: &str) -> Self {
        let mut declared = HashMap::new();
        let mut rest = doctype;

        while let Some(start) = rest.find("<!ENTITY") {
            rest = &rest[start + "<!ENTITY".len()..];
            let decl = rest.trim_start();
            if decl.starts_with('%') {
                continue;
            }

            let name_len = decl
                .find(|c: char| c.is_whitespace())
                .unwrap_or(decl.len());
            let name = &decl[..name_len];
            let value = decl[name_len..].trim_start();

            let quote = match value.chars().next() {
                Some(q @ ('"' | '\'')) => q,
                // SYSTEM or PUBLIC: external entity
                _ => continue,
            };
            if let Some(end) = value[1..].find(quote) {
                declared
                    .entry(name.to_string())
                    .or_insert_with(|| value[1..1 + end].to_string());
            }
        }

        Self { declared }
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Replacement text of a predefined or declared entity, fully expanded.
    ///
    /// Returns `None` for undeclared names and for self-referencing
    /// declarations.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.resolve_at(name, 0)
    }

    fn resolve_at(&self, name: &str, depth: usize) -> Option<String> {
        if let Some(predefined) = resolve_predefined_entity(name) {
            return Some(predefined.to_string());
        }
        if depth >= MAX_EXPANSION_DEPTH {
            return None;
        }
        let value = self.declared.get(name)?;
        self.expand(value, depth + 1)
    }

    /// Expands character and entity references inside a declared value.
    fn expand(&self, value: &str, depth: usize) -> Option<String> {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(amp) = rest.find('&') {
            out.push_str(&rest[..amp]);
            let after = &rest[amp + 1..];
            let semi = after.find(';')?;
            let reference = &after[..semi];

            if let Some(number) = reference.strip_prefix('#') {
                out.push(parse_char_ref(number)?);
            } else {
                out.push_str(&self.resolve_at(reference, depth)?);
            }
            rest = &after[semi + 1..];
        }
        out.push_str(rest);
        Some(out)
    }
}

fn parse_char_ref(number: &str) -> Option<char> {
    let code = match number.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse().ok()?,
    };
    char::from_u32(code)
}
