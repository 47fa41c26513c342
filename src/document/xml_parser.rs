use super::entities::EntityTable;
use super::node::{Node, NodeId, NodeKind};
use super::tree::{Document, DOCUMENT_NODE};
use crate::errors::{ExportError, ExportResult};
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesRef, Event};
use quick_xml::reader::Reader;
use std::io::Cursor;

fn parse_error(reason: impl Into<String>) -> ExportError {
    ExportError::Parse {
        reason: reason.into(),
    }
}

/// Decodes markup bytes (names, comments, targets) with the document encoding.
fn decode_markup(decoder: Decoder, bytes: &[u8]) -> ExportResult<String> {
    decoder
        .decode(bytes)
        .map(|s| s.into_owned())
        .map_err(|e| parse_error(format!("failed to decode markup: {e}")))
}

/// Resolves a character reference, a predefined entity or an entity declared
/// in the DOCTYPE subset.
fn resolve_reference(reference: &BytesRef, entities: &EntityTable) -> ExportResult<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| parse_error(format!("invalid character reference: {e}")))?
    {
        return Ok(ch.to_string());
    }

    let name = reference
        .decode()
        .map_err(|e| parse_error(format!("failed to decode entity name: {e}")))?;
    entities
        .resolve(&name)
        .ok_or_else(|| parse_error(format!("entity '{name}' not defined")))
}

impl Document {
    /// Parses a complete XML document held in memory into an arena tree.
    ///
    /// Text is decoded from the encoding the document declares and its line
    /// endings are normalised to `\n`; otherwise whitespace is kept as-is.
    /// The document must be well-formed: matching end tags, a single
    /// top-level element, and no character data outside of it. A document
    /// without any element parses fine and simply has no root.
    pub fn parse(content: &[u8]) -> ExportResult<Self> {
        let mut reader = Reader::from_reader(Cursor::new(content));
        reader.config_mut().trim_text(false);

        let mut document = Document::new();
        let mut entities = EntityTable::default();
        let mut open: Vec<NodeId> = Vec::with_capacity(16);
        let mut buf = Vec::with_capacity(8192);

        loop {
            let parent = open.last().copied().unwrap_or(DOCUMENT_NODE);
            let event = reader.read_event_into(&mut buf)?;
            let decoder = reader.decoder();
            match event {
                Event::Start(e) => {
                    if open.is_empty() && document.root_element().is_some() {
                        return Err(parse_error("extra content at the end of the document"));
                    }
                    let name = decode_markup(decoder, e.name().as_ref())?;
                    let id = document.append(parent, Node::element(name));
                    open.push(id);
                }
                Event::Empty(e) => {
                    if open.is_empty() && document.root_element().is_some() {
                        return Err(parse_error("extra content at the end of the document"));
                    }
                    let name = decode_markup(decoder, e.name().as_ref())?;
                    document.append(parent, Node::element(name));
                }
                Event::End(_) => {
                    open.pop();
                }
                Event::Text(e) => {
                    let text = e
                        .xml_content()
                        .map_err(|e| parse_error(format!("failed to decode XML text: {e}")))?;
                    if open.is_empty() {
                        if !text.trim().is_empty() {
                            return Err(parse_error("character data outside of the root element"));
                        }
                    } else {
                        document.append_text(parent, &text);
                    }
                }
                Event::GeneralRef(e) => {
                    if open.is_empty() {
                        return Err(parse_error("entity reference outside of the root element"));
                    }
                    let resolved = resolve_reference(&e, &entities)?;
                    document.append_text(parent, &resolved);
                }
                Event::CData(e) => {
                    if open.is_empty() {
                        return Err(parse_error("CDATA section outside of the root element"));
                    }
                    let content = e
                        .xml_content()
                        .map_err(|e| parse_error(format!("failed to decode CDATA section: {e}")))?
                        .into_owned();
                    document.append(parent, Node::new(NodeKind::CData, String::new(), content));
                }
                Event::DocType(e) => {
                    let doctype = e
                        .decode()
                        .map_err(|e| parse_error(format!("failed to decode DOCTYPE: {e}")))?;
                    entities = EntityTable::from_doctype(&doctype);
                }
                Event::Comment(e) => {
                    let content = decode_markup(decoder, &e)?;
                    document.append(parent, Node::new(NodeKind::Comment, String::new(), content));
                }
                Event::PI(e) => {
                    let target = decode_markup(decoder, e.target())?;
                    document.append(
                        parent,
                        Node::new(NodeKind::ProcessingInstruction, target, String::new()),
                    );
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(&unclosed) = open.last() {
            return Err(parse_error(format!(
                "premature end of data, <{}> is not closed",
                document.name(unclosed)
            )));
        }

        Ok(document)
    }
}
