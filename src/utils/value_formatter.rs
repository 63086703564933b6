//! Number formatting for node values, using d3-format specifiers:
//! `[[fill]align][sign][symbol][0][width][,][.precision][~][type]`.

use d3rs::format::format as d3_format;
use eyre::{bail, Result};
use std::rc::Rc;

const FORMAT_TYPES: &str = "efgrs%pbodxXc";

/// Checks `spec` against the d3-format grammar.
///
/// The d3rs parser silently falls back to defaults on malformed input, so
/// configuration errors are caught here instead.
pub fn validate_specifier(spec: &str) -> Result<()> {
    let chars: Vec<char> = spec.chars().collect();
    let is_align = |c: &char| matches!(c, '<' | '>' | '=' | '^');
    let mut i = 0;

    if chars.get(1).is_some_and(is_align) {
        i = 2;
    } else if chars.first().is_some_and(is_align) {
        i = 1;
    }
    if chars.get(i).is_some_and(|c| matches!(c, '+' | '-' | ' ' | '(')) {
        i += 1;
    }
    if chars.get(i).is_some_and(|c| matches!(c, '$' | '#')) {
        i += 1;
    }
    if chars.get(i) == Some(&'0') {
        i += 1;
    }
    while chars.get(i).is_some_and(char::is_ascii_digit) {
        i += 1;
    }
    if chars.get(i) == Some(&',') {
        i += 1;
    }
    if chars.get(i) == Some(&'.') {
        i += 1;
        let start = i;
        while chars.get(i).is_some_and(char::is_ascii_digit) {
            i += 1;
        }
        if i == start {
            bail!("missing precision after '.' in value format {spec:?}");
        }
    }
    if chars.get(i) == Some(&'~') {
        i += 1;
    }
    if let Some(&c) = chars.get(i) {
        if !FORMAT_TYPES.contains(c) {
            bail!("unsupported value format type {c:?} in {spec:?}");
        }
        i += 1;
    }
    if i < chars.len() {
        let rest: String = chars[i..].iter().collect();
        bail!("unexpected {rest:?} at the end of value format {spec:?}");
    }
    Ok(())
}

/// Formatter applied to node values when a value format is configured.
#[derive(Clone)]
pub enum ValueFormat {
    Spec {
        specifier: String,
        formatter: Rc<dyn Fn(f64) -> String>,
    },
    Custom(Rc<dyn Fn(f64) -> String>),
}

impl ValueFormat {
    pub fn parse(spec: &str) -> Result<Self> {
        validate_specifier(spec)?;
        Ok(Self::Spec {
            specifier: spec.to_string(),
            formatter: Rc::new(d3_format(spec)),
        })
    }

    pub fn custom(f: impl Fn(f64) -> String + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn specifier(&self) -> Option<&str> {
        match self {
            Self::Spec { specifier, .. } => Some(specifier),
            Self::Custom(_) => None,
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Spec { formatter, .. } => formatter(value),
            Self::Custom(f) => f(value),
        }
    }
}

impl std::fmt::Debug for ValueFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spec { specifier, .. } => f.debug_tuple("Spec").field(specifier).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
