use lasso::{Spur, ThreadedRodeo};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for section IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for seating sections.
/// Internally a 4-byte `Spur` index, so comparison and hashing are O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(Spur);

impl SectionId {
    /// Intern a new string as a SectionId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        SectionId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self::intern(s)
    }
}

impl Serialize for SectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Server-rendered section lists carry database keys, so an id may arrive
/// as a JSON number as well as a string.
impl<'de> Deserialize<'de> for SectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionIdVisitor;

        impl Visitor<'_> for SectionIdVisitor {
            type Value = SectionId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a section id string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SectionId, E> {
                Ok(SectionId::intern(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SectionId, E> {
                Ok(SectionId::intern(&v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SectionId, E> {
                Ok(SectionId::intern(&v.to_string()))
            }
        }

        deserializer.deserialize_any(SectionIdVisitor)
    }
}
