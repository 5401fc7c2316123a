//! Validation rules applied to every proposed replacement of a tag list.
//!
//! Two validators exist:
//!
//! - [`validate_tags`] is shared by every widget kind. It rejects blank tags
//!   and, when an allow-list is configured, tags outside of it.
//! - [`validate_range`] is layered on top for numeric widgets. It rejects tags
//!   below `min` or above `max`; an unset bound is unbounded on that side.
//!
//! Both validators look at the whole proposed list and either accept it as is
//! or return the first violation. They never coerce, reorder or deduplicate.

use std::fmt;

use thiserror::Error;

use crate::element::{NumericTag, TagElement};

/// The bound a numeric tag violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBound {
    Min(String),
    Max(String),
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Min(min) => write!(f, ">= {}", min),
            RangeBound::Max(max) => write!(f, "<= {}", max),
        }
    }
}

/// Why a proposed tag list was rejected.
///
/// Offending elements are carried in their display form so the error can be
/// shown as is, whatever the element type of the widget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The value of a TagsInput widget cannot contain blank strings")]
    BlankValue,

    #[error("Tag value {value} is not allowed, allowed tags are [{}]", .allowed.join(", "))]
    NotAllowed { value: String, allowed: Vec<String> },

    #[error("Tag value {value} should be {bound}")]
    OutOfRange { value: String, bound: RangeBound },
}

/// Checks a proposed tag list against the blank rule and the allow-list.
///
/// The blank rule runs over the whole list before the allow-list is consulted,
/// so a list that is both blank and disallowed reports [`ValidationError::BlankValue`].
/// An empty `allowed` slice means no restriction.
///
/// # Examples
/// ```
/// use tagsinput::validation::{validate_tags, ValidationError};
///
/// let allowed = vec!["a".to_string(), "b".to_string()];
/// assert!(validate_tags(&["a".to_string(), "a".to_string()], &allowed).is_ok());
/// assert_eq!(
///     validate_tags(&["a".to_string(), String::new()], &[]),
///     Err(ValidationError::BlankValue)
/// );
/// ```
pub fn validate_tags<T: TagElement>(proposed: &[T], allowed: &[T]) -> Result<(), ValidationError> {
    if proposed.iter().any(TagElement::is_blank) {
        return Err(ValidationError::BlankValue);
    }

    if allowed.is_empty() {
        return Ok(());
    }

    match proposed.iter().find(|tag| !allowed.contains(*tag)) {
        Some(tag) => Err(ValidationError::NotAllowed {
            value: tag.to_string(),
            allowed: allowed.iter().map(ToString::to_string).collect(),
        }),
        None => Ok(()),
    }
}

/// Checks every numeric tag against optional inclusive bounds.
///
/// Tags are checked in order; for each tag the lower bound is checked first.
pub fn validate_range<T: NumericTag>(
    proposed: &[T],
    min: Option<T>,
    max: Option<T>,
) -> Result<(), ValidationError> {
    for tag in proposed {
        if let Some(min) = min {
            if *tag < min {
                return Err(ValidationError::OutOfRange {
                    value: tag.to_string(),
                    bound: RangeBound::Min(min.to_string()),
                });
            }
        }
        if let Some(max) = max {
            if *tag > max {
                return Err(ValidationError::OutOfRange {
                    value: tag.to_string(),
                    bound: RangeBound::Max(max.to_string()),
                });
            }
        }
    }
    Ok(())
}
