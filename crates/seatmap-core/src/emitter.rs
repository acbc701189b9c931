//! Emitter: `SvgDocument` → SVG markup.
//!
//! Produces compact markup (no indentation) so the result can be dropped
//! straight into a container's `innerHTML`. Elements without children are
//! self-closed.

use crate::document::{SvgDocument, SvgNode};
use petgraph::graph::NodeIndex;

/// Emit the whole document.
#[must_use]
pub fn emit_svg(doc: &SvgDocument) -> String {
    let mut out = String::with_capacity(1024);
    for child in doc.children(doc.root) {
        emit_node(&mut out, doc, child);
    }
    out
}

/// Emit a single subtree.
#[must_use]
pub fn emit_subtree(doc: &SvgDocument, idx: NodeIndex) -> String {
    let mut out = String::new();
    emit_node(&mut out, doc, idx);
    out
}

fn emit_node(out: &mut String, doc: &SvgDocument, idx: NodeIndex) {
    match &doc.graph[idx] {
        SvgNode::Root => {
            for child in doc.children(idx) {
                emit_node(out, doc, child);
            }
        }
        SvgNode::Text(text) => escape_into(out, text, false),
        SvgNode::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (key, value) in &el.attrs {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                escape_into(out, value, true);
                out.push('"');
            }
            let children = doc.children(idx);
            if children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for child in children {
                emit_node(out, doc, child);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

fn escape_into(out: &mut String, s: &str, attr: bool) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_svg;
    use pretty_assertions::assert_eq;

    #[test]
    fn emit_compact() {
        let doc = parse_svg(
            r#"<svg viewBox="0 0 1 1">
  <g id="shapes"><path d="M0 0" data-section="a"/></g>
  <text>A &lt; B</text>
</svg>"#,
        )
        .unwrap();
        assert_eq!(
            emit_svg(&doc),
            r#"<svg viewBox="0 0 1 1"><g id="shapes"><path d="M0 0" data-section="a"/></g><text>A &lt; B</text></svg>"#
        );
    }

    #[test]
    fn attribute_quotes_are_escaped() {
        let mut doc = parse_svg(r#"<svg><path/></svg>"#).unwrap();
        let path = doc.select(|el| el.tag == "path")[0];
        doc.element_mut(path)
            .unwrap()
            .set_attr("data-section-name", r#"The "Kop" & Co"#);
        assert_eq!(
            emit_subtree(&doc, path),
            r#"<path data-section-name="The &quot;Kop&quot; &amp; Co"/>"#
        );
    }

    #[test]
    fn emitted_markup_reparses_identically() {
        let source = r#"<svg><g id="shapes"><path class="a b" style="fill: red;"/></g></svg>"#;
        let once = emit_svg(&parse_svg(source).unwrap());
        let twice = emit_svg(&parse_svg(&once).unwrap());
        assert_eq!(once, twice);
    }
}
