//! Section ↔ shape binding.
//!
//! Binding walks the section records in order and stamps every matching
//! shape with the owning section's id, name and base color. A shape claimed
//! by several records ends up with the last one. The resulting
//! `BindingTable` is derived state: it can always be rebuilt from the record
//! list, or re-read from the stamps left on the document.

use crate::document::SvgDocument;
use crate::id::SectionId;
use crate::model::{Color, SectionRecord};
use indexmap::IndexMap;
use petgraph::graph::NodeIndex;
use smallvec::SmallVec;
use std::collections::HashMap;

pub const STAMP_SECTION_ID: &str = "data-section-id";
pub const STAMP_SECTION_NAME: &str = "data-section-name";
pub const STAMP_SECTION_COLOR: &str = "data-section-color";

const STAMPS: [&str; 3] = [STAMP_SECTION_ID, STAMP_SECTION_NAME, STAMP_SECTION_COLOR];

/// Shapes per section, in document order.
pub type ShapeList = SmallVec<[NodeIndex; 4]>;

/// Derived association between shapes and the sections they represent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTable {
    by_section: IndexMap<SectionId, ShapeList>,
    by_shape: HashMap<NodeIndex, SectionId>,
}

impl BindingTable {
    /// Owning section of a shape, `None` for unmapped shapes.
    pub fn section_of(&self, shape: NodeIndex) -> Option<SectionId> {
        self.by_shape.get(&shape).copied()
    }

    /// Every shape bound to a section (empty for unbound sections).
    pub fn shapes_of(&self, id: SectionId) -> &[NodeIndex] {
        self.by_section.get(&id).map(|s| s.as_slice()).unwrap_or(&[])
    }

    pub fn is_bound(&self, id: SectionId) -> bool {
        self.by_section.contains_key(&id)
    }

    /// Bound sections, in binding order.
    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.by_section.keys().copied()
    }

    pub fn shape_count(&self) -> usize {
        self.by_shape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_shape.is_empty()
    }

    fn claim(&mut self, shape: NodeIndex, id: SectionId) {
        if let Some(previous) = self.by_shape.insert(shape, id) {
            if previous == id {
                return;
            }
            if let Some(list) = self.by_section.get_mut(&previous) {
                list.retain(|s| *s != shape);
                if list.is_empty() {
                    self.by_section.shift_remove(&previous);
                }
            }
        }
        self.by_section.entry(id).or_default().push(shape);
    }

    /// Re-derive the table from `data-section-id` stamps on the document.
    pub fn from_stamps(doc: &SvgDocument) -> Self {
        let mut table = Self::default();
        for idx in doc.elements() {
            if let Some(id) = doc.element(idx).and_then(|el| el.attr(STAMP_SECTION_ID)) {
                table.claim(idx, SectionId::intern(id));
            }
        }
        table
    }
}

/// Bind section records to shapes and stamp each matched shape.
///
/// Stale stamps from an earlier binding are removed first, so binding the
/// same document twice yields the same result.
pub fn bind_sections(doc: &mut SvgDocument, sections: &[SectionRecord]) -> BindingTable {
    for idx in doc.elements() {
        if let Some(el) = doc.element_mut(idx) {
            for stamp in STAMPS {
                el.remove_attr(stamp);
            }
        }
    }

    let mut table = BindingTable::default();
    for section in sections {
        if !section.is_bindable() {
            log::debug!("section {} has no svg key; left unbound", section.id);
            continue;
        }
        let shapes = doc.shapes_for_key(&section.svg_key);
        if shapes.is_empty() {
            log::debug!(
                "section {} ({}) matched no shapes for key {:?}",
                section.id,
                section.name,
                section.svg_key
            );
            continue;
        }
        for shape in shapes {
            if let Some(el) = doc.element_mut(shape) {
                el.set_attr(STAMP_SECTION_ID, section.id.as_str());
                el.set_attr(STAMP_SECTION_NAME, &section.name);
                el.set_attr(STAMP_SECTION_COLOR, &section.color);
            }
            table.claim(shape, section.id);
        }
    }

    log::debug!(
        "bound {} shapes to {} sections",
        table.shape_count(),
        table.by_section.len()
    );
    table
}

/// How a base color is turned into a translucent fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillPolicy {
    /// Alpha channel composited onto parseable colors.
    pub alpha: u8,
    /// `fill-opacity` used when the color cannot be parsed.
    pub fallback_opacity: f32,
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self {
            alpha: 0x99,
            fallback_opacity: 0.6,
        }
    }
}

impl FillPolicy {
    /// Fill value for a record color, plus an optional `fill-opacity`.
    pub fn fill_for(&self, color: &str) -> (String, Option<String>) {
        match Color::parse(color) {
            Some(c) => (c.with_alpha(self.alpha).to_hex(), None),
            None => (
                color.trim().to_string(),
                Some(self.fallback_opacity.to_string()),
            ),
        }
    }
}

/// Set every bound shape's fill to its section's translucent base color.
pub fn apply_base_colors(
    doc: &mut SvgDocument,
    table: &BindingTable,
    sections: &[SectionRecord],
    policy: FillPolicy,
) {
    for section in sections {
        let shapes = table.shapes_of(section.id);
        if shapes.is_empty() {
            continue;
        }
        let (fill, opacity) = policy.fill_for(&section.color);
        for &shape in shapes {
            if let Some(el) = doc.element_mut(shape) {
                el.set_style("fill", &fill);
                match &opacity {
                    Some(o) => el.set_style("fill-opacity", o),
                    None => {
                        el.remove_style("fill-opacity");
                    }
                }
            }
        }
    }
}
