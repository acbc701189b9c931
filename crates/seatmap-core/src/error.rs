use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Failure to turn fetched markup into an [`SvgDocument`](crate::SvgDocument).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed SVG near byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute near byte {position}: {source}")]
    Attribute {
        position: u64,
        #[source]
        source: AttrError,
    },

    #[error("invalid UTF-8 in element or attribute name")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unclosed element <{0}>")]
    Unclosed(String),

    #[error("document has no <svg> root element")]
    NoSvgRoot,
}
