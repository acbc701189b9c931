//! Parser for venue SVG markup → `SvgDocument`.
//!
//! Built on `quick-xml`. Elements, attributes and text/CDATA content are
//! kept; comments, processing instructions, the XML declaration and the
//! doctype are dropped. Whitespace-only text between elements is trimmed.

use crate::document::{SvgDocument, SvgElement, SvgNode};
use crate::error::ParseError;
use petgraph::graph::NodeIndex;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse SVG markup into a document tree.
///
/// The top level must contain an `<svg>` element; anything else (an HTML
/// error page served with a success status, for example) is rejected.
#[must_use = "parsing result should be used"]
pub fn parse_svg(input: &str) -> Result<SvgDocument, ParseError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut doc = SvgDocument::new();
    let mut stack: Vec<NodeIndex> = vec![doc.root];

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|source| ParseError::Xml { position, source })?;

        match event {
            Event::Start(ref e) => {
                let el = element_from(e, position)?;
                let parent = *stack.last().unwrap_or(&doc.root);
                let idx = doc.append(parent, SvgNode::Element(el));
                stack.push(idx);
            }
            Event::Empty(ref e) => {
                let el = element_from(e, position)?;
                let parent = *stack.last().unwrap_or(&doc.root);
                doc.append(parent, SvgNode::Element(el));
            }
            Event::End(_) => {
                // quick-xml checks that end names match their start tags.
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|source| ParseError::Xml { position, source })?;
                if !text.is_empty() && stack.len() > 1 {
                    let parent = *stack.last().unwrap_or(&doc.root);
                    doc.append(parent, SvgNode::Text(text.into_owned()));
                }
            }
            Event::CData(e) => {
                if stack.len() > 1 {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    let parent = *stack.last().unwrap_or(&doc.root);
                    doc.append(parent, SvgNode::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack
            .last()
            .and_then(|&idx| doc.element(idx))
            .map(|el| el.tag.clone())
            .unwrap_or_default();
        return Err(ParseError::Unclosed(open));
    }

    let has_svg_root = doc
        .children(doc.root)
        .into_iter()
        .any(|idx| doc.element(idx).is_some_and(|el| el.local_name() == "svg"));
    if !has_svg_root {
        return Err(ParseError::NoSvgRoot);
    }

    log::debug!(
        "parsed SVG document with {} nodes",
        doc.graph.node_count().saturating_sub(1)
    );
    Ok(doc)
}

fn element_from(start: &BytesStart<'_>, position: u64) -> Result<SvgElement, ParseError> {
    let tag = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut el = SvgElement::new(&tag);
    for attr in start.attributes() {
        let attr = attr.map_err(|source| ParseError::Attribute { position, source })?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|source| ParseError::Xml { position, source })?;
        el.attrs.push((key, value.into_owned()));
    }
    Ok(el)
}
