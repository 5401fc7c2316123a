//! Predefined tag styles for string and numeric tag widgets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagsError;

/// Styling applied to every chip of a string or numeric tag widget.
///
/// Parsing is case-insensitive. The wire form is the lowercase name, and
/// [`TagStyle::None`] travels as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TagStyle {
    Primary,
    Success,
    Info,
    Warning,
    Danger,
    #[default]
    None,
}

impl TagStyle {
    pub const ALL: [TagStyle; 6] = [
        TagStyle::Primary,
        TagStyle::Success,
        TagStyle::Info,
        TagStyle::Warning,
        TagStyle::Danger,
        TagStyle::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagStyle::Primary => "primary",
            TagStyle::Success => "success",
            TagStyle::Info => "info",
            TagStyle::Warning => "warning",
            TagStyle::Danger => "danger",
            TagStyle::None => "",
        }
    }
}

impl fmt::Display for TagStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagStyle {
    type Err = TagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TagsError::InvalidStyle(s.to_string()))
    }
}

impl TryFrom<String> for TagStyle {
    type Error = TagsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TagStyle> for String {
    fn from(style: TagStyle) -> Self {
        style.as_str().to_string()
    }
}
