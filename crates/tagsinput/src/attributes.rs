//! Attribute registry.
//!
//! Every piece of widget state the display surface can read or write is an
//! [`Attribute`]. The [`ATTRIBUTES`] table records the wire name of each one
//! and which widget kinds carry it, so name lookup and capability checks go
//! through a single place.
//!
//! | Attribute | strings | colors | floats | ints |
//! |-----------|---------|--------|--------|------|
//! | `value` | ✓ | ✓ | ✓ | ✓ |
//! | `allowed_tags` | ✓ | ✓ | ✓ | ✓ |
//! | `allow_duplicates` | ✓ | ✓ | ✓ | ✓ |
//! | `tag_style` | ✓ | | ✓ | ✓ |
//! | `format` | | | ✓ | ✓ |
//! | `min` / `max` | | | ✓ | ✓ |

use std::fmt;

use crate::widgets::WidgetKind;

/// A synchronized widget attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Value,
    AllowedTags,
    AllowDuplicates,
    TagStyle,
    Format,
    Min,
    Max,
}

impl Attribute {
    /// The attribute name used in synchronized state.
    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Look up an attribute by its synchronized name.
    pub fn from_name(name: &str) -> Option<Attribute> {
        get_spec(name).map(|spec| spec.attribute)
    }

    pub fn spec(&self) -> &'static AttributeSpec {
        &ATTRIBUTES[*self as usize]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const ALL_KINDS: &[WidgetKind] = &[
    WidgetKind::Strings,
    WidgetKind::Colors,
    WidgetKind::Floats,
    WidgetKind::Ints,
];

const NUMERIC_KINDS: &[WidgetKind] = &[WidgetKind::Floats, WidgetKind::Ints];

const STYLED_KINDS: &[WidgetKind] = &[WidgetKind::Strings, WidgetKind::Floats, WidgetKind::Ints];

/// Specification for a single attribute.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub attribute: Attribute,

    /// The key used in synchronized state (e.g., "value", "allowed_tags")
    pub name: &'static str,

    /// Widget kinds that carry this attribute
    pub kinds: &'static [WidgetKind],
}

impl AttributeSpec {
    const fn new(attribute: Attribute, name: &'static str, kinds: &'static [WidgetKind]) -> Self {
        Self {
            attribute,
            name,
            kinds,
        }
    }

    pub fn supported_by(&self, kind: WidgetKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Registry of all synchronized attributes.
///
/// Entries are in [`Attribute`] declaration order; [`Attribute::spec`] indexes by it.
pub const ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::new(Attribute::Value, "value", ALL_KINDS),
    AttributeSpec::new(Attribute::AllowedTags, "allowed_tags", ALL_KINDS),
    AttributeSpec::new(Attribute::AllowDuplicates, "allow_duplicates", ALL_KINDS),
    AttributeSpec::new(Attribute::TagStyle, "tag_style", STYLED_KINDS),
    AttributeSpec::new(Attribute::Format, "format", NUMERIC_KINDS),
    AttributeSpec::new(Attribute::Min, "min", NUMERIC_KINDS),
    AttributeSpec::new(Attribute::Max, "max", NUMERIC_KINDS),
];

/// Look up an attribute spec by name.
pub fn get_spec(name: &str) -> Option<&'static AttributeSpec> {
    ATTRIBUTES.iter().find(|spec| spec.name == name)
}

/// Attributes carried by a widget kind, in registry order.
pub fn attributes_of(kind: WidgetKind) -> impl Iterator<Item = Attribute> {
    ATTRIBUTES
        .iter()
        .filter(move |spec| spec.supported_by(kind))
        .map(|spec| spec.attribute)
}
