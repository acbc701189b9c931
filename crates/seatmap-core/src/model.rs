//! Section records and colors.
//!
//! A `SectionRecord` is the externally supplied description of a sellable
//! seating block. Records are immutable for the viewer's purposes; every
//! per-shape field derived from them (stamps, fills) is a cache that can be
//! rebuilt from the record list at any time.

use crate::id::SectionId;
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// CSS named colors accepted in section records.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xFF, 0xFF, 0xFF]),
    ("red", [0xFF, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("lime", [0x00, 0xFF, 0x00]),
    ("blue", [0x00, 0x00, 0xFF]),
    ("yellow", [0xFF, 0xFF, 0x00]),
    ("orange", [0xFF, 0xA5, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("silver", [0xC0, 0xC0, 0xC0]),
    ("gold", [0xFF, 0xD7, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("teal", [0x00, 0x80, 0x80]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("aqua", [0x00, 0xFF, 0xFF]),
    ("cyan", [0x00, 0xFF, 0xFF]),
    ("fuchsia", [0xFF, 0x00, 0xFF]),
    ("magenta", [0xFF, 0x00, 0xFF]),
    ("pink", [0xFF, 0xC0, 0xCB]),
    ("brown", [0xA5, 0x2A, 0x2A]),
];

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut ch = [0xFFu8; 4];
                for (i, &b) in bytes.iter().enumerate() {
                    ch[i] = hex_val(b)? * 17;
                }
                Some(Self::rgba(ch[0], ch[1], ch[2], ch[3]))
            }
            6 | 8 => {
                let mut ch = [0xFFu8; 4];
                for (i, pair) in bytes.chunks(2).enumerate() {
                    ch[i] = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                Some(Self::rgba(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => None,
        }
    }

    /// Parse a record color: hex (with `#`) or a CSS color name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, [r, g, b])| Self::rgb(*r, *g, *b))
    }

    /// Same color with the alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

// ─── Sections ────────────────────────────────────────────────────────────

/// A sellable seating block, as supplied by the hosting page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: SectionId,
    pub name: String,
    /// Base color (hex or CSS name) for unselected, unhovered rendering.
    pub color: String,
    /// Matched against a shape's `data-section` marker or `data-tags` list.
    #[serde(rename = "svg_section_key", alias = "svgKey", default)]
    pub svg_key: String,
}

impl SectionRecord {
    pub fn new(id: &str, name: &str, color: &str, svg_key: &str) -> Self {
        Self {
            id: SectionId::intern(id),
            name: name.to_string(),
            color: color.to_string(),
            svg_key: svg_key.to_string(),
        }
    }

    /// An empty key would match every tag list, so it binds nothing.
    pub fn is_bindable(&self) -> bool {
        !self.svg_key.trim().is_empty()
    }

    pub fn parsed_color(&self) -> Option<Color> {
        Color::parse(&self.color)
    }
}
