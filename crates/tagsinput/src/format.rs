//! Display format specifiers for numeric tag widgets.
//!
//! The core never formats numbers itself. It only carries a d3-format
//! specifier for the display surface and refuses strings that are not one:
//!
//! ```text
//! [[fill]align][sign][symbol][0][width][,][.precision][type]
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagsError;

const ALIGNS: &[char] = &['<', '>', '=', '^'];
const SIGNS: &[char] = &['+', '-', '(', ' '];
const SYMBOLS: &[char] = &['$', '#'];

/// Presentation types understood by the display surface.
pub const FORMAT_TYPES: &[char] = &[
    'e', 'f', 'g', 'r', 's', '%', 'p', 'b', 'o', 'd', 'x', 'X', 'c', 'n',
];

/// A syntactically valid d3-format specifier, e.g. `.1f` or `,.3g`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberFormat(String);

impl NumberFormat {
    pub fn parse(spec: impl Into<String>) -> Result<Self, TagsError> {
        let spec = spec.into();
        check_spec(&spec)?;
        Ok(Self(spec))
    }

    /// Wraps a specifier that is known to be valid, such as a built-in default.
    pub(crate) fn builtin(spec: &'static str) -> Self {
        debug_assert!(check_spec(spec).is_ok(), "invalid built-in format {spec:?}");
        Self(spec.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NumberFormat {
    type Err = TagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumberFormat::parse(s)
    }
}

impl TryFrom<String> for NumberFormat {
    type Error = TagsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NumberFormat::parse(value)
    }
}

impl From<NumberFormat> for String {
    fn from(format: NumberFormat) -> Self {
        format.0
    }
}

fn check_spec(spec: &str) -> Result<(), TagsError> {
    let chars: Vec<char> = spec.chars().collect();

    // The fill character is optional, so the alignment may sit at index 1 or 0.
    let mut starts = Vec::with_capacity(3);
    if chars.len() >= 2 && ALIGNS.contains(&chars[1]) {
        starts.push(2);
    }
    if chars.first().is_some_and(|c| ALIGNS.contains(c)) {
        starts.push(1);
    }
    starts.push(0);

    let mut last_err = None;
    for start in starts {
        match check_after_align(&chars[start..]) {
            Ok(()) => return Ok(()),
            Err(err) => last_err = Some(err),
        }
    }
    Err(TagsError::InvalidFormat(match last_err {
        Some(reason) => format!("{:?}: {}", spec, reason),
        None => format!("{:?}", spec),
    }))
}

fn skip_one<'a>(rest: &'a [char], set: &[char]) -> &'a [char] {
    match rest.first() {
        Some(c) if set.contains(c) => &rest[1..],
        _ => rest,
    }
}

fn check_after_align(chars: &[char]) -> Result<(), String> {
    let mut rest = skip_one(chars, SIGNS);
    rest = skip_one(rest, SYMBOLS);
    // Zero padding and width are both digit runs.
    while rest.first().is_some_and(|c| c.is_ascii_digit()) {
        rest = &rest[1..];
    }
    rest = skip_one(rest, &[',']);

    if rest.first() == Some(&'.') {
        let digits = rest[1..].iter().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return Err("precision needs at least one digit".to_string());
        }
        rest = &rest[1 + digits..];
    }

    match rest {
        [] => Ok(()),
        [ty] if FORMAT_TYPES.contains(ty) => Ok(()),
        [ty] if ty.is_ascii_alphabetic() || *ty == '%' => Err(format!(
            "type specifier must be one of {}, got '{}'",
            FORMAT_TYPES.iter().collect::<String>(),
            ty
        )),
        _ => Err("not a number format specifier".to_string()),
    }
}
