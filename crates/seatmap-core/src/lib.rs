pub mod binding;
pub mod diagnostics;
pub mod document;
pub mod emitter;
pub mod error;
pub mod id;
pub mod model;
pub mod naming;
pub mod parser;
pub mod style;

pub use binding::{BindingTable, FillPolicy, apply_base_colors, bind_sections};
pub use diagnostics::{BindingDiagnostic, Severity, check_bindings};
pub use document::{SvgDocument, SvgElement, SvgNode};
pub use emitter::emit_svg;
pub use error::ParseError;
pub use id::SectionId;
pub use model::*;
pub use naming::{AliasTable, normalize_section_name, venue_key_for_stadium};
pub use parser::parse_svg;

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
