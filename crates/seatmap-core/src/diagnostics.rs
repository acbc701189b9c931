//! Binding diagnostics for venue maps.
//!
//! Reports mismatches between section records and a venue SVG without
//! modifying either. Nothing reported here stops a map from loading; the
//! report exists so venue files and section data can be checked offline.

use crate::document::SvgDocument;
use crate::id::SectionId;
use crate::model::SectionRecord;
use petgraph::graph::NodeIndex;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a binding finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Likely a data mistake.
    Warning,
    /// Expected in practice (venues need not use every section).
    Info,
}

/// What a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Section(SectionId),
    Shape(NodeIndex),
}

#[derive(Debug, Clone)]
pub struct BindingDiagnostic {
    pub subject: Subject,
    pub message: String,
    pub severity: Severity,
    /// Short rule identifier (e.g. "unbound-section").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Check section records against a document and return every finding.
#[must_use]
pub fn check_bindings(doc: &SvgDocument, sections: &[SectionRecord]) -> Vec<BindingDiagnostic> {
    let mut diags = Vec::new();
    check_sections(doc, sections, &mut diags);
    check_contested_shapes(doc, sections, &mut diags);
    check_unmapped_shapes(doc, sections, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn check_sections(doc: &SvgDocument, sections: &[SectionRecord], diags: &mut Vec<BindingDiagnostic>) {
    for section in sections {
        if section.parsed_color().is_none() {
            diags.push(BindingDiagnostic {
                subject: Subject::Section(section.id),
                message: format!(
                    "Section `{}` has color {:?}, which is neither hex nor a known name; it will be drawn with fill-opacity instead.",
                    section.id, section.color
                ),
                severity: Severity::Warning,
                rule: "unparsed-color",
            });
        }

        if !section.is_bindable() {
            diags.push(BindingDiagnostic {
                subject: Subject::Section(section.id),
                message: format!("Section `{}` has no SVG key.", section.id),
                severity: Severity::Warning,
                rule: "missing-key",
            });
            continue;
        }

        if doc.shapes_for_key(&section.svg_key).is_empty() {
            diags.push(BindingDiagnostic {
                subject: Subject::Section(section.id),
                message: format!(
                    "Section `{}` ({}) matches no shape for key `{}`.",
                    section.id, section.name, section.svg_key
                ),
                severity: Severity::Info,
                rule: "unbound-section",
            });
        }
    }
}

fn check_contested_shapes(
    doc: &SvgDocument,
    sections: &[SectionRecord],
    diags: &mut Vec<BindingDiagnostic>,
) {
    for idx in doc.elements() {
        let mut distinct: Vec<SectionId> = sections
            .iter()
            .filter(|s| s.is_bindable() && matches_key(doc, idx, &s.svg_key))
            .map(|s| s.id)
            .collect();
        distinct.dedup();
        if distinct.len() > 1 {
            let names: Vec<&str> = distinct.iter().map(|id| id.as_str()).collect();
            diags.push(BindingDiagnostic {
                subject: Subject::Shape(idx),
                message: format!(
                    "Shape is claimed by sections [{}]; the last one wins.",
                    names.join(", ")
                ),
                severity: Severity::Warning,
                rule: "contested-shape",
            });
        }
    }
}

fn check_unmapped_shapes(
    doc: &SvgDocument,
    sections: &[SectionRecord],
    diags: &mut Vec<BindingDiagnostic>,
) {
    for idx in doc.interactive_shapes() {
        let mapped = sections
            .iter()
            .any(|s| s.is_bindable() && matches_key(doc, idx, &s.svg_key));
        if !mapped {
            let marker = doc
                .element(idx)
                .and_then(|el| el.attr("data-section").or_else(|| el.attr("id")))
                .unwrap_or("<anonymous>");
            diags.push(BindingDiagnostic {
                subject: Subject::Shape(idx),
                message: format!("Shape `{marker}` is not mapped to any section."),
                severity: Severity::Info,
                rule: "unmapped-shape",
            });
        }
    }
}

fn matches_key(doc: &SvgDocument, idx: NodeIndex, key: &str) -> bool {
    doc.element(idx).is_some_and(|el| el.matches_section_key(key))
}
