//! Element types a tag collection can hold.
//!
//! [`TagElement`] is the seam the shared validation rules work through: it
//! knows how to render an element for diagnostics and whether an element
//! counts as blank. [`NumericTag`] adds the ordering the range rule needs and
//! the way numbers are read from synchronized state.

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;

use crate::color::Color;

/// An element that can be stored in a tag collection.
pub trait TagElement: Clone + PartialEq + fmt::Debug + fmt::Display {
    /// Whether this element is a blank tag.
    ///
    /// Only strings can ever be blank; every other element type keeps the
    /// default and the blank rule passes trivially for it.
    fn is_blank(&self) -> bool {
        false
    }
}

impl TagElement for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl TagElement for Color {
    fn is_blank(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl TagElement for f64 {}

impl TagElement for i64 {}

/// A numeric element that supports inclusive range bounds.
pub trait NumericTag: TagElement + PartialOrd + Copy {
    /// Display format used when a widget is created without configuration.
    const DEFAULT_FORMAT: &'static str;

    /// Reads one element from synchronized state.
    fn deserialize_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>;
}

impl NumericTag for f64 {
    const DEFAULT_FORMAT: &'static str = ".1f";

    fn deserialize_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer)
    }
}

impl NumericTag for i64 {
    const DEFAULT_FORMAT: &'static str = ".3g";

    /// Accepts integers and integer-valued floats such as `5.0`.
    fn deserialize_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IntTagVisitor)
    }
}

struct IntTagVisitor;

impl<'de> Visitor<'de> for IntTagVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer-valued number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        // i64::MAX as f64 rounds up to 2^63, which is out of range.
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

/// Adapter that reads a single numeric tag through [`NumericTag::deserialize_tag`].
struct Tag<T>(T);

impl<'de, T: NumericTag> Deserialize<'de> for Tag<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize_tag(deserializer).map(Tag)
    }
}

/// Reads a list of numeric tags.
pub(crate) fn deserialize_tags<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: NumericTag,
{
    let tags = Vec::<Tag<T>>::deserialize(deserializer)?;
    Ok(tags.into_iter().map(|Tag(tag)| tag).collect())
}

/// Reads an optional bound; `null` clears it.
pub(crate) fn deserialize_bound<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: NumericTag,
{
    Ok(Option::<Tag<T>>::deserialize(deserializer)?.map(|Tag(tag)| tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_string_is_blank() {
        assert!(String::new().is_blank());
        assert!(!"a".to_string().is_blank());
    }

    #[test]
    fn whitespace_is_not_blank() {
        // Only the empty string counts.
        assert!(!" ".to_string().is_blank());
    }

    #[test]
    fn numbers_are_never_blank() {
        assert!(!0.0f64.is_blank());
        assert!(!0i64.is_blank());
    }

    #[test]
    fn ints_accept_integer_valued_floats() {
        assert_eq!(i64::deserialize_tag(&json!(5)).unwrap(), 5);
        assert_eq!(i64::deserialize_tag(&json!(5.0)).unwrap(), 5);
        assert_eq!(i64::deserialize_tag(&json!(-10.0)).unwrap(), -10);
    }

    #[test]
    fn ints_reject_fractional_and_out_of_range() {
        assert!(i64::deserialize_tag(&json!(1.5)).is_err());
        assert!(i64::deserialize_tag(&json!(1e19)).is_err());
        assert!(i64::deserialize_tag(&json!(u64::MAX)).is_err());
        assert!(i64::deserialize_tag(&json!("5")).is_err());
    }

    #[test]
    fn floats_accept_integers() {
        assert_eq!(f64::deserialize_tag(&json!(3)).unwrap(), 3.0);
    }

    #[test]
    fn tag_lists_and_bounds() {
        let tags: Vec<i64> = deserialize_tags(&json!([5.0, 10, 0])).unwrap();
        assert_eq!(tags, vec![5, 10, 0]);
        assert_eq!(deserialize_bound::<_, i64>(&json!(null)).unwrap(), None);
        assert_eq!(deserialize_bound::<_, i64>(&json!(10.0)).unwrap(), Some(10));
        assert!(deserialize_tags::<_, i64>(&json!([1, 2.5])).is_err());
    }

    #[test]
    fn default_formats() {
        assert_eq!(<f64 as NumericTag>::DEFAULT_FORMAT, ".1f");
        assert_eq!(<i64 as NumericTag>::DEFAULT_FORMAT, ".3g");
    }
}
