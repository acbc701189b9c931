//! Inline `style="..."` declarations.
//!
//! Built on `winnow` 0.7. Malformed declarations are skipped up to the next
//! `;` so a single bad entry in hand-authored SVG doesn't drop the rest.
//! A `;` inside quotes or parentheses (`url(data:...;base64,...)`) belongs
//! to the value.

use std::fmt;
use winnow::ascii::multispace0;
use winnow::combinator::{delimited, separated_pair};
use winnow::prelude::*;
use winnow::token::take_while;

/// Ordered list of `property: value` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    decls: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn parse(input: &str) -> Self {
        let mut rest = input;
        let mut decls: Vec<(String, String)> = Vec::new();

        loop {
            rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ';');
            if rest.is_empty() {
                break;
            }
            match declaration.parse_next(&mut rest) {
                Ok((prop, value)) => {
                    let prop = prop.to_ascii_lowercase();
                    // Later declarations win, as in CSS.
                    match decls.iter_mut().find(|(p, _)| *p == prop) {
                        Some(slot) => slot.1 = value.to_string(),
                        None => decls.push((prop, value.to_string())),
                    }
                }
                Err(_) => {
                    log::debug!("skipping malformed style declaration in {input:?}");
                    rest = rest.get(value_end(rest) + 1..).unwrap_or("");
                }
            }
        }

        Self { decls }
    }

    pub fn get(&self, prop: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace a declaration, keeping its original position.
    pub fn set(&mut self, prop: &str, value: &str) {
        match self.decls.iter_mut().find(|(p, _)| p == prop) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.decls.push((prop.to_string(), value.to_string())),
        }
    }

    /// Remove a declaration. Returns true if it was present.
    pub fn remove(&mut self, prop: &str) -> bool {
        let before = self.decls.len();
        self.decls.retain(|(p, _)| p != prop);
        self.decls.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (prop, value)) in self.decls.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{prop}: {value};")?;
        }
        Ok(())
    }
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn property<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited(
        multispace0,
        take_while(1.., |c: char| {
            c.is_ascii_alphanumeric() || c == '-' || c == '_'
        }),
        multispace0,
    )
    .parse_next(input)
}

fn value<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    let (value, rest) = input.split_at(value_end(input));
    *input = rest;
    Ok(value.trim())
}

/// Byte offset of the `;` that ends the value at the start of `s`, or
/// `s.len()` if there is none.
fn value_end(s: &str) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => return i,
            _ => {}
        }
    }
    s.len()
}

fn declaration<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    separated_pair(property, ':', value).parse_next(input)
}
