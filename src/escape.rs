//! Escaping of string leaves for a target output syntax.

use log::debug;
use serde_json::Value;
use std::str::FromStr;

const LATEX_TABLE: &[(char, &str)] = &[
    ('\\', r"\\"),
    ('{', r"\{"),
    ('}', r"\}"),
    ('[', r"{[}"),
    (']', r"{]}"),
    ('^', r"\^{}"),
    ('_', r"\_"),
    ('~', r"\textasciitilde{}"),
    ('&', r"\&"),
    ('%', r"\%"),
    ('$', r"\$"),
    ('#', r"\#"),
    ('<', r"\textless{}"),
    ('>', r"\textgreater{}"),
];

/// Output syntaxes with a known substitution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeFormat {
    Latex,
}

impl FromStr for EscapeFormat {
    type Err = ();

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "latex" => Ok(Self::Latex),
            _ => Err(()),
        }
    }
}

impl EscapeFormat {
    fn table(self) -> &'static [(char, &'static str)] {
        match self {
            Self::Latex => LATEX_TABLE,
        }
    }

    /// Substitutes every character found in the format's table.
    ///
    /// Not idempotent: escaping an escaped string escapes the backslashes
    /// again.
    pub fn escape_str(self, input: &str) -> String {
        let table = self.table();
        let mut escaped = String::with_capacity(input.len());
        for c in input.chars() {
            match table.iter().find(|(special, _)| *special == c) {
                Some((_, replacement)) => escaped.push_str(replacement),
                None => escaped.push(c),
            }
        }
        escaped
    }
}

/// Rewrites every string leaf of `data` in place.
pub fn escape_strings(data: &mut Value, format: EscapeFormat) {
    match data {
        Value::Object(map) => map.values_mut().for_each(|v| escape_strings(v, format)),
        Value::Array(items) => items.iter_mut().for_each(|v| escape_strings(v, format)),
        Value::String(s) => *s = format.escape_str(s),
        _ => {}
    }
}

/// Escapes `context` for the format named by `tag`.
///
/// An unknown tag leaves the context untouched. Returns whether escaping
/// took place.
pub fn escape_context(context: &mut Value, tag: &str) -> bool {
    match tag.parse::<EscapeFormat>() {
        Ok(format) => {
            debug!("Escaping context strings as {format:?}");
            escape_strings(context, format);
            true
        }
        Err(()) => {
            debug!("Unknown escape format '{tag}', context left unchanged");
            false
        }
    }
}
