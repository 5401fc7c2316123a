//! Shared tag list state.
//!
//! [`TagList`] owns the attributes every widget kind has: the current value,
//! the allow-list and the duplicate flag. [`NumericRange`] holds the optional
//! bounds numeric widgets add on top.
//!
//! A proposed value is committed only after every rule accepted it. On
//! rejection the previous value stays in place untouched.

use crate::element::{NumericTag, TagElement};
use crate::validation::{validate_range, validate_tags, ValidationError};

/// The ordered tag list of a widget plus the constraints shared by all kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct TagList<T> {
    value: Vec<T>,
    allowed_tags: Vec<T>,
    allow_duplicates: bool,
}

impl<T: TagElement> Default for TagList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TagElement> TagList<T> {
    /// An empty list with no allow-list. Duplicates are allowed.
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            allowed_tags: Vec::new(),
            allow_duplicates: true,
        }
    }

    pub fn value(&self) -> &[T] {
        &self.value
    }

    pub fn allowed_tags(&self) -> &[T] {
        &self.allowed_tags
    }

    /// Carried for the display surface. No rule reads it; duplicates are
    /// accepted whatever its value.
    pub fn allow_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Replaces the allow-list. An empty list lifts the restriction.
    ///
    /// The current value is not re-checked against the new allow-list.
    pub fn set_allowed_tags(&mut self, allowed_tags: Vec<T>) {
        self.allowed_tags = allowed_tags;
    }

    pub fn set_allow_duplicates(&mut self, allow_duplicates: bool) {
        self.allow_duplicates = allow_duplicates;
    }

    /// Runs the shared rules against a proposed value without committing it.
    pub fn validate(&self, proposed: &[T]) -> Result<(), ValidationError> {
        validate_tags(proposed, &self.allowed_tags)
    }

    /// Replaces the value if the shared rules accept it.
    pub fn set_value(&mut self, proposed: Vec<T>) -> Result<(), ValidationError> {
        self.commit(proposed, |_| Ok(()))
    }

    /// Replaces the value if the shared rules and then `extra` accept it.
    pub(crate) fn commit<F>(&mut self, proposed: Vec<T>, extra: F) -> Result<(), ValidationError>
    where
        F: FnOnce(&[T]) -> Result<(), ValidationError>,
    {
        match self.validate(&proposed).and_then(|()| extra(&proposed)) {
            Ok(()) => {
                tracing::trace!(len = proposed.len(), "accepted tag list");
                self.value = proposed;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, len = proposed.len(), "rejected tag list");
                Err(err)
            }
        }
    }
}

/// Optional inclusive bounds for numeric tags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for NumericRange<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: NumericTag> NumericRange<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn validate(&self, proposed: &[T]) -> Result<(), ValidationError> {
        validate_range(proposed, self.min, self.max)
    }

    pub fn contains(&self, tag: T) -> bool {
        self.validate(&[tag]).is_ok()
    }
}
