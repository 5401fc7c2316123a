//! # Tag Widgets
//!
//! Four widget kinds share one set of rules and differ only in element type
//! and the extra attributes they carry:
//!
//! | Widget | Element | Extra attributes | Extra rule |
//! |--------|---------|------------------|------------|
//! | [`StringTagCollection`] | `String` | `tag_style` | none |
//! | [`ColorTagCollection`] | [`Color`] | none | none |
//! | [`FloatTagCollection`] | `f64` | `tag_style`, `format`, `min`, `max` | range |
//! | [`IntTagCollection`] | `i64` | `tag_style`, `format`, `min`, `max` | range |
//!
//! Every kind implements [`TagInput`]. [`TagCollection`] wraps the four kinds
//! in one enum so hosts can hold any of them and dispatch on the tag.
//!
//! ## Proposing a Value
//!
//! `set_value` is the only way to change the tag list and it replaces the
//! whole list. The shared rules always run first (no blank tags, allow-list
//! membership), then the range rule for numeric kinds. Either the full list is
//! accepted verbatim or nothing changes.

use std::fmt;

use crate::collection::{NumericRange, TagList};
use crate::color::Color;
use crate::config::TagsConfig;
use crate::element::{NumericTag, TagElement};
use crate::error::Result;
use crate::format::NumberFormat;
use crate::style::TagStyle;
use crate::validation::ValidationError;

/// The kind of a tag widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Strings,
    Colors,
    Floats,
    Ints,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Strings,
        WidgetKind::Colors,
        WidgetKind::Floats,
        WidgetKind::Ints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Strings => "strings",
            WidgetKind::Colors => "colors",
            WidgetKind::Floats => "floats",
            WidgetKind::Ints => "ints",
        }
    }

    /// Model name the display surface uses to pick its model class.
    pub fn model_name(&self) -> &'static str {
        match self {
            WidgetKind::Strings => "TagsInputModel",
            WidgetKind::Colors => "ColorsInputModel",
            WidgetKind::Floats => "FloatsInputModel",
            WidgetKind::Ints => "IntsInputModel",
        }
    }

    /// View name the display surface uses to pick its rendering control.
    pub fn view_name(&self) -> &'static str {
        match self {
            WidgetKind::Strings => "TagsInputView",
            WidgetKind::Colors => "ColorsInputView",
            WidgetKind::Floats => "FloatsInputView",
            WidgetKind::Ints => "IntsInputView",
        }
    }

    pub fn from_model_name(name: &str) -> Option<WidgetKind> {
        Self::ALL.into_iter().find(|kind| kind.model_name() == name)
    }

    /// Whether widgets of this kind carry `attribute`.
    pub fn supports(&self, attribute: crate::attributes::Attribute) -> bool {
        attribute.spec().supported_by(*self)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations shared by every tag widget.
pub trait TagInput {
    type Element: TagElement;

    fn tag_list(&self) -> &TagList<Self::Element>;

    /// Runs every rule of this widget against `proposed` without committing.
    fn validate(&self, proposed: &[Self::Element]) -> std::result::Result<(), ValidationError>;

    /// Replaces the whole tag list, or leaves it untouched on rejection.
    fn set_value(
        &mut self,
        proposed: Vec<Self::Element>,
    ) -> std::result::Result<(), ValidationError>;

    fn set_allowed_tags(&mut self, allowed_tags: Vec<Self::Element>);

    fn set_allow_duplicates(&mut self, allow_duplicates: bool);

    fn value(&self) -> &[Self::Element] {
        self.tag_list().value()
    }

    fn allowed_tags(&self) -> &[Self::Element] {
        self.tag_list().allowed_tags()
    }

    fn allow_duplicates(&self) -> bool {
        self.tag_list().allow_duplicates()
    }
}

/// A list of free-form string tags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringTagCollection {
    tags: TagList<String>,
    tag_style: TagStyle,
}

impl StringTagCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag_style(&self) -> TagStyle {
        self.tag_style
    }

    pub fn set_tag_style(&mut self, tag_style: TagStyle) {
        self.tag_style = tag_style;
    }
}

impl TagInput for StringTagCollection {
    type Element = String;

    fn tag_list(&self) -> &TagList<String> {
        &self.tags
    }

    fn validate(&self, proposed: &[String]) -> std::result::Result<(), ValidationError> {
        self.tags.validate(proposed)
    }

    fn set_value(&mut self, proposed: Vec<String>) -> std::result::Result<(), ValidationError> {
        self.tags.set_value(proposed)
    }

    fn set_allowed_tags(&mut self, allowed_tags: Vec<String>) {
        self.tags.set_allowed_tags(allowed_tags);
    }

    fn set_allow_duplicates(&mut self, allow_duplicates: bool) {
        self.tags.set_allow_duplicates(allow_duplicates);
    }
}

/// A list of color tags. Elements are checked for shape when parsed into
/// [`Color`], so the widget itself adds no rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorTagCollection {
    tags: TagList<Color>,
}

impl ColorTagCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TagInput for ColorTagCollection {
    type Element = Color;

    fn tag_list(&self) -> &TagList<Color> {
        &self.tags
    }

    fn validate(&self, proposed: &[Color]) -> std::result::Result<(), ValidationError> {
        self.tags.validate(proposed)
    }

    fn set_value(&mut self, proposed: Vec<Color>) -> std::result::Result<(), ValidationError> {
        self.tags.set_value(proposed)
    }

    fn set_allowed_tags(&mut self, allowed_tags: Vec<Color>) {
        self.tags.set_allowed_tags(allowed_tags);
    }

    fn set_allow_duplicates(&mut self, allow_duplicates: bool) {
        self.tags.set_allow_duplicates(allow_duplicates);
    }
}

/// A list of numeric tags with optional inclusive bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTagCollection<T> {
    tags: TagList<T>,
    range: NumericRange<T>,
    tag_style: TagStyle,
    format: NumberFormat,
}

/// Real-valued tags, displayed with `.1f` unless configured otherwise.
pub type FloatTagCollection = NumericTagCollection<f64>;

/// Integer tags with integer bounds, displayed with `.3g` unless configured otherwise.
pub type IntTagCollection = NumericTagCollection<i64>;

impl<T: NumericTag> Default for NumericTagCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NumericTag> NumericTagCollection<T> {
    pub fn new() -> Self {
        Self::with_format(NumberFormat::builtin(T::DEFAULT_FORMAT))
    }

    pub fn with_format(format: NumberFormat) -> Self {
        Self {
            tags: TagList::new(),
            range: NumericRange::unbounded(),
            tag_style: TagStyle::None,
            format,
        }
    }

    pub fn range(&self) -> NumericRange<T> {
        self.range
    }

    pub fn min(&self) -> Option<T> {
        self.range.min
    }

    pub fn max(&self) -> Option<T> {
        self.range.max
    }

    /// Changing a bound does not re-check the current value.
    pub fn set_min(&mut self, min: Option<T>) {
        self.range.min = min;
    }

    /// Changing a bound does not re-check the current value.
    pub fn set_max(&mut self, max: Option<T>) {
        self.range.max = max;
    }

    pub fn set_range(&mut self, range: NumericRange<T>) {
        self.range = range;
    }

    pub fn tag_style(&self) -> TagStyle {
        self.tag_style
    }

    pub fn set_tag_style(&mut self, tag_style: TagStyle) {
        self.tag_style = tag_style;
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    pub fn set_format(&mut self, format: NumberFormat) {
        self.format = format;
    }
}

impl<T: NumericTag> TagInput for NumericTagCollection<T> {
    type Element = T;

    fn tag_list(&self) -> &TagList<T> {
        &self.tags
    }

    fn validate(&self, proposed: &[T]) -> std::result::Result<(), ValidationError> {
        self.tags.validate(proposed)?;
        self.range.validate(proposed)
    }

    fn set_value(&mut self, proposed: Vec<T>) -> std::result::Result<(), ValidationError> {
        let range = self.range;
        self.tags.commit(proposed, |p| range.validate(p))
    }

    fn set_allowed_tags(&mut self, allowed_tags: Vec<T>) {
        self.tags.set_allowed_tags(allowed_tags);
    }

    fn set_allow_duplicates(&mut self, allow_duplicates: bool) {
        self.tags.set_allow_duplicates(allow_duplicates);
    }
}

/// Any tag widget, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TagCollection {
    Strings(StringTagCollection),
    Colors(ColorTagCollection),
    Floats(FloatTagCollection),
    Ints(IntTagCollection),
}

impl TagCollection {
    /// A widget of `kind` with built-in defaults.
    pub fn new(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Strings => StringTagCollection::new().into(),
            WidgetKind::Colors => ColorTagCollection::new().into(),
            WidgetKind::Floats => FloatTagCollection::new().into(),
            WidgetKind::Ints => IntTagCollection::new().into(),
        }
    }

    /// A widget of `kind` with defaults taken from `config`.
    pub fn from_config(kind: WidgetKind, config: &TagsConfig) -> Result<Self> {
        let mut collection = match kind {
            WidgetKind::Strings => {
                let mut strings = StringTagCollection::new();
                strings.set_tag_style(config.tag_style()?);
                TagCollection::Strings(strings)
            }
            WidgetKind::Colors => TagCollection::Colors(ColorTagCollection::new()),
            WidgetKind::Floats => {
                let mut floats = FloatTagCollection::with_format(config.float_format()?);
                floats.set_tag_style(config.tag_style()?);
                TagCollection::Floats(floats)
            }
            WidgetKind::Ints => {
                let mut ints = IntTagCollection::with_format(config.int_format()?);
                ints.set_tag_style(config.tag_style()?);
                TagCollection::Ints(ints)
            }
        };
        collection.set_allow_duplicates(config.allow_duplicates);
        Ok(collection)
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            TagCollection::Strings(_) => WidgetKind::Strings,
            TagCollection::Colors(_) => WidgetKind::Colors,
            TagCollection::Floats(_) => WidgetKind::Floats,
            TagCollection::Ints(_) => WidgetKind::Ints,
        }
    }

    /// Number of tags currently held.
    pub fn len(&self) -> usize {
        match self {
            TagCollection::Strings(w) => w.value().len(),
            TagCollection::Colors(w) => w.value().len(),
            TagCollection::Floats(w) => w.value().len(),
            TagCollection::Ints(w) => w.value().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn allow_duplicates(&self) -> bool {
        match self {
            TagCollection::Strings(w) => w.allow_duplicates(),
            TagCollection::Colors(w) => w.allow_duplicates(),
            TagCollection::Floats(w) => w.allow_duplicates(),
            TagCollection::Ints(w) => w.allow_duplicates(),
        }
    }

    pub fn set_allow_duplicates(&mut self, allow_duplicates: bool) {
        match self {
            TagCollection::Strings(w) => w.set_allow_duplicates(allow_duplicates),
            TagCollection::Colors(w) => w.set_allow_duplicates(allow_duplicates),
            TagCollection::Floats(w) => w.set_allow_duplicates(allow_duplicates),
            TagCollection::Ints(w) => w.set_allow_duplicates(allow_duplicates),
        }
    }

    pub fn as_strings(&self) -> Option<&StringTagCollection> {
        match self {
            TagCollection::Strings(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_colors(&self) -> Option<&ColorTagCollection> {
        match self {
            TagCollection::Colors(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&FloatTagCollection> {
        match self {
            TagCollection::Floats(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&IntTagCollection> {
        match self {
            TagCollection::Ints(w) => Some(w),
            _ => None,
        }
    }
}

impl From<StringTagCollection> for TagCollection {
    fn from(widget: StringTagCollection) -> Self {
        TagCollection::Strings(widget)
    }
}

impl From<ColorTagCollection> for TagCollection {
    fn from(widget: ColorTagCollection) -> Self {
        TagCollection::Colors(widget)
    }
}

impl From<FloatTagCollection> for TagCollection {
    fn from(widget: FloatTagCollection) -> Self {
        TagCollection::Floats(widget)
    }
}

impl From<IntTagCollection> for TagCollection {
    fn from(widget: IntTagCollection) -> Self {
        TagCollection::Ints(widget)
    }
}
